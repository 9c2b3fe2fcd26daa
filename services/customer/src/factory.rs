//! Wiring of the adding and getting services.

use crate::adding;
use crate::config::Config;
use crate::error::CustomerError;
use crate::getting;
use crate::storage::SqliteCustomerRepository;
use std::sync::Arc;
use tracing::{debug, info};
use vault_transit_client::{Decrypter, Encrypter, VaultClient};

/// Both customer services over one store and one crypto provider.
pub struct Services<S, C> {
    /// Encrypt-then-store service
    pub adding: adding::Service<S, C>,
    /// Fetch-then-decrypt service
    pub getting: getting::Service<S, C>,
}

impl<S, C> Services<S, C>
where
    S: adding::Repository + getting::Repository,
    C: Encrypter + Decrypter,
{
    /// Build both services sharing `store` and `crypto`.
    #[must_use]
    pub fn new(store: Arc<S>, crypto: Arc<C>) -> Self {
        Self {
            adding: adding::Service::new(Arc::clone(&store), Arc::clone(&crypto)),
            getting: getting::Service::new(store, crypto),
        }
    }
}

/// Production services: SQLite store and Vault transit.
pub type VaultServices = Services<SqliteCustomerRepository, VaultClient>;

/// Creates [`VaultServices`] from configuration.
pub struct ServiceFactory;

impl ServiceFactory {
    /// Install logging, open the store, build the Vault client and wire
    /// both services. An already installed subscriber is kept.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::Store`] if the database cannot be opened and
    /// [`CustomerError::Vault`] if the Vault client cannot be built.
    pub fn create(config: &Config) -> Result<VaultServices, CustomerError> {
        if let Err(e) = config.init_tracing() {
            debug!(error = %e, "Keeping existing tracing subscriber");
        }

        let store = Arc::new(SqliteCustomerRepository::open(&config.database_path)?);
        let vault = Arc::new(VaultClient::new(config.vault.clone())?);

        info!(
            database = %config.database_path.display(),
            vault_addr = %config.vault.addr,
            key = %config.vault.key_name,
            "Customer services ready"
        );

        Ok(Services::new(store, vault))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_transit_client::VaultConfig;

    #[test]
    fn test_create_with_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(
            dir.path().join("customers.db"),
            VaultConfig::new("http://127.0.0.1:8200", "token", "customers"),
        );

        assert!(ServiceFactory::create(&config).is_ok());
    }

    #[test]
    fn test_create_installs_configured_subscriber() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(
            dir.path().join("customers.db"),
            VaultConfig::new("http://127.0.0.1:8200", "token", "customers"),
        );
        config.tracing = config.tracing.with_format(rust_common::LogFormat::Json);

        assert!(ServiceFactory::create(&config).is_ok());

        assert!(config.init_tracing().is_err());
    }

    #[test]
    fn test_create_rejects_invalid_vault_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(
            dir.path().join("customers.db"),
            VaultConfig::new("\n", "token", "keyname"),
        );

        let err = ServiceFactory::create(&config).err().unwrap();
        assert!(matches!(err, CustomerError::Vault(_)));
    }

    #[test]
    fn test_create_reports_store_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(
            dir.path().join("missing").join("customers.db"),
            VaultConfig::new("http://127.0.0.1:8200", "token", "customers"),
        );

        let err = ServiceFactory::create(&config).err().unwrap();
        assert!(matches!(err, CustomerError::Store(_)));
    }
}
