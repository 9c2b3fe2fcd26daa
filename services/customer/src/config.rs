//! Centralized configuration for the customer service.
//!
//! Loaded from environment variables (a `.env` file is honoured) and
//! validated before any collaborator is built.

use crate::error::CustomerError;
use rust_common::{LogFormat, TracingConfig, TryInitError, try_init_tracing};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use vault_transit_client::VaultConfig;
use vault_transit_client::config::DEFAULT_TRANSIT_MOUNT;

/// Customer service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file
    pub database_path: PathBuf,
    /// Vault transit client settings
    pub vault: VaultConfig,
    /// Log output settings
    pub tracing: TracingConfig,
}

impl Config {
    /// Create a configuration from its parts.
    #[must_use]
    pub fn new(database_path: impl Into<PathBuf>, vault: VaultConfig) -> Self {
        Self {
            database_path: database_path.into(),
            vault,
            tracing: TracingConfig::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the Vault settings
    /// do not validate.
    pub fn from_env() -> Result<Self, CustomerError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_vars<F>(lookup: F) -> Result<Self, CustomerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let database_path = PathBuf::from(var("CUSTOMER_DB_PATH", "customers.db"));

        let vault = VaultConfig::new(
            var("VAULT_ADDR", "http://127.0.0.1:8200"),
            var("VAULT_TOKEN", ""),
            var("VAULT_TRANSIT_KEY", "customers"),
        )
        .with_transit_mount(var("VAULT_TRANSIT_MOUNT", DEFAULT_TRANSIT_MOUNT))
        .with_timeout(Duration::from_secs(parse_var(&lookup, "VAULT_TIMEOUT_SECS", 30)?));
        vault.validate()?;

        let format = if parse_var(&lookup, "LOG_JSON", false)? {
            LogFormat::Json
        } else {
            LogFormat::Compact
        };
        let tracing = TracingConfig::new("customer-service")
            .with_filter(var("LOG_LEVEL", "info"))
            .with_format(format);

        Ok(Self {
            database_path,
            vault,
            tracing,
        })
    }

    /// Install the global subscriber from `LOG_LEVEL` and `LOG_JSON`.
    ///
    /// # Errors
    ///
    /// Returns [`TryInitError`] if a subscriber is already installed.
    pub fn init_tracing(&self) -> Result<(), TryInitError> {
        try_init_tracing(&self.tracing)
    }
}

/// Parse a variable with a default value.
fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, CustomerError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(val) => val
            .parse()
            .map_err(|e| CustomerError::config(format!("Invalid {name}: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();

        assert_eq!(config.database_path, PathBuf::from("customers.db"));
        assert_eq!(config.vault.addr, "http://127.0.0.1:8200");
        assert_eq!(config.vault.key_name, "customers");
        assert_eq!(config.vault.transit_mount, "transit");
        assert_eq!(config.vault.timeout, Duration::from_secs(30));
        assert_eq!(config.tracing.filter, "info");
        assert_eq!(config.tracing.format, LogFormat::Compact);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("CUSTOMER_DB_PATH", "/tmp/c.db"),
            ("VAULT_ADDR", "https://vault.internal:8200"),
            ("VAULT_TOKEN", "s.abc"),
            ("VAULT_TRANSIT_KEY", "cards"),
            ("VAULT_TRANSIT_MOUNT", "eas"),
            ("VAULT_TIMEOUT_SECS", "5"),
            ("LOG_LEVEL", "debug"),
            ("LOG_JSON", "true"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/c.db"));
        assert_eq!(config.vault.addr, "https://vault.internal:8200");
        assert_eq!(config.vault.token.expose_secret(), "s.abc");
        assert_eq!(config.vault.key_name, "cards");
        assert_eq!(config.vault.transit_mount, "eas");
        assert_eq!(config.vault.timeout, Duration::from_secs(5));
        assert_eq!(config.tracing.filter, "debug");
        assert_eq!(config.tracing.format, LogFormat::Json);
    }

    #[test]
    fn test_log_settings_drive_subscriber_setup() {
        let config = Config::from_vars(vars(&[("LOG_JSON", "true"), ("LOG_LEVEL", "debug")])).unwrap();
        assert_eq!(config.tracing.format, LogFormat::Json);

        let _ = config.init_tracing();

        assert!(config.init_tracing().is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        let err = Config::from_vars(vars(&[("VAULT_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().starts_with("Invalid configuration: Invalid VAULT_TIMEOUT_SECS"));
    }

    #[test]
    fn test_invalid_vault_address() {
        let err = Config::from_vars(vars(&[("VAULT_ADDR", "\n")])).unwrap_err();
        assert!(matches!(err, CustomerError::Vault(_)));
    }
}
