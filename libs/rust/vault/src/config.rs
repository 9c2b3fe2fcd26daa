//! Vault client configuration.

use crate::error::{VaultError, VaultResult};
use secrecy::SecretString;
use std::time::Duration;

/// Default mount point of the transit secrets engine.
pub const DEFAULT_TRANSIT_MOUNT: &str = "transit";

/// Vault client configuration.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Vault server address
    pub addr: String,
    /// Token sent as `X-Vault-Token`
    pub token: SecretString,
    /// Mount point of the transit engine
    pub transit_mount: String,
    /// Name of the transit key used for encrypt/decrypt
    pub key_name: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            addr: std::env::var("VAULT_ADDR")
                .unwrap_or_else(|_| "http://127.0.0.1:8200".to_string()),
            token: SecretString::from(std::env::var("VAULT_TOKEN").unwrap_or_default()),
            transit_mount: std::env::var("VAULT_TRANSIT_MOUNT")
                .unwrap_or_else(|_| DEFAULT_TRANSIT_MOUNT.to_string()),
            key_name: std::env::var("VAULT_TRANSIT_KEY").unwrap_or_default(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl VaultConfig {
    /// Create a new configuration for the given address, token and key.
    #[must_use]
    pub fn new(
        addr: impl Into<String>,
        token: impl Into<String>,
        key_name: impl Into<String>,
    ) -> Self {
        Self {
            addr: addr.into(),
            token: SecretString::from(token.into()),
            transit_mount: DEFAULT_TRANSIT_MOUNT.to_string(),
            key_name: key_name.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the transit mount point.
    #[must_use]
    pub fn with_transit_mount(mut self, mount: impl Into<String>) -> Self {
        self.transit_mount = mount.into();
        self
    }

    /// Check that the address parses as a URL and that mount and key are set.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> VaultResult<()> {
        let url = url::Url::parse(&self.addr)
            .map_err(|e| VaultError::invalid_config(format!("address {:?}: {e}", self.addr)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(VaultError::invalid_config(format!(
                "address {:?}: unsupported scheme {}",
                self.addr,
                url.scheme()
            )));
        }
        if self.transit_mount.trim_matches('/').is_empty() {
            return Err(VaultError::invalid_config("transit mount is empty"));
        }
        if self.key_name.is_empty() {
            return Err(VaultError::invalid_config("transit key name is empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_new_config() {
        let config = VaultConfig::new("http://vault:8200", "root", "customers");
        assert_eq!(config.addr, "http://vault:8200");
        assert_eq!(config.token.expose_secret(), "root");
        assert_eq!(config.transit_mount, "transit");
        assert_eq!(config.key_name, "customers");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder() {
        let config = VaultConfig::new("http://vault:8200", "root", "customers")
            .with_timeout(Duration::from_secs(2))
            .with_transit_mount("eas");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.transit_mount, "eas");
    }

    #[test]
    fn test_validate_rejects_bad_address() {
        let config = VaultConfig::new("\n", "token", "keyname");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, VaultError::InvalidConfig(_)));

        let config = VaultConfig::new("ftp://vault", "token", "keyname");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_key() {
        let config = VaultConfig::new("http://vault:8200", "token", "");
        assert!(config.validate().is_err());

        let config = VaultConfig::new("http://vault:8200", "token", "k").with_transit_mount("/");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_token_not_in_debug() {
        let config = VaultConfig::new("http://vault:8200", "s.super-secret-token", "customers");
        let debug = format!("{config:?}");
        assert!(!debug.contains("s.super-secret-token"));
    }
}
