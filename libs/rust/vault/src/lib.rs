//! HashiCorp Vault transit client for vault-eas.
//!
//! Encrypts and decrypts short text values (account numbers) with a named
//! transit key. The ciphertext returned by Vault carries a `vault:v<N>:`
//! marker and is safe to store in a text column.

pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod transit;

pub use client::VaultClient;
pub use config::VaultConfig;
pub use error::{VaultError, VaultResult};
pub use provider::{Decrypter, Encrypter};
pub use transit::{CIPHERTEXT_PREFIX, is_vault_ciphertext, key_version};
