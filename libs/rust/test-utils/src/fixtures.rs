//! Test fixtures with sample data.

use customer_service::NewCustomer;
use vault_transit_client::VaultConfig;

/// Name used in the reference scenarios.
pub const PETER_PARKER: &str = "Peter Parker";

/// Account number used in the reference scenarios.
pub const PETER_PARKER_ACCOUNT: &str = "4169936079246876";

/// Token accepted by the mocked transit engine.
pub const TEST_TOKEN: &str = "s.test-token";

/// Transit key name used by the mocked transit engine.
pub const TEST_KEY: &str = "customers";

/// The reference customer.
#[must_use]
pub fn peter_parker() -> NewCustomer {
    NewCustomer::new(PETER_PARKER, PETER_PARKER_ACCOUNT)
}

/// Vault settings pointing at a mocked transit engine at `addr`.
#[must_use]
pub fn vault_config(addr: &str) -> VaultConfig {
    VaultConfig::new(addr, TEST_TOKEN, TEST_KEY)
}
