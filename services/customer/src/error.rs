//! Customer service errors.
//!
//! Orchestrator failures wrap the collaborator error as their `source()`;
//! the message adds the failing step and, for fetches, the requested id.

use crate::model::CustomerId;
use crate::storage::StoreError;
use thiserror::Error;
use vault_transit_client::VaultError;

/// Boxed collaborator error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by the customer services.
#[derive(Error, Debug)]
pub enum CustomerError {
    /// The crypto provider could not encrypt the account number.
    #[error("encryption failed: {0}")]
    EncryptionFailed(#[source] BoxError),

    /// The crypto provider could not decrypt the stored account number.
    #[error("decryption failed: {0}")]
    DecryptionFailed(#[source] BoxError),

    /// The store could not save the customer. Displays the store's message.
    #[error("{0}")]
    StorageFailed(#[source] BoxError),

    /// The store could not return the customer, including unknown ids.
    #[error("fetching customer {id} failed: {source}")]
    FetchFailed {
        /// Requested identifier
        id: CustomerId,
        /// Store error
        #[source]
        source: BoxError,
    },

    /// Configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Vault client could not be built.
    #[error(transparent)]
    Vault(#[from] VaultError),

    /// Store could not be opened.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CustomerError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the failure came from the crypto provider.
    #[must_use]
    pub const fn is_crypto_failure(&self) -> bool {
        matches!(self, Self::EncryptionFailed(_) | Self::DecryptionFailed(_))
    }

    /// Whether the failure came from the store.
    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        matches!(self, Self::StorageFailed(_) | Self::FetchFailed { .. })
    }
}
