//! Adding customers: encrypt the account number, then store the record.

use crate::error::CustomerError;
use crate::model::{Ciphertext, CustomerId, EncryptedCustomer, NewCustomer};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use vault_transit_client::Encrypter;

/// Stores at-rest customer records.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Error returned when the record cannot be saved.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Insert the record and return its newly assigned id.
    async fn insert(&self, customer: EncryptedCustomer) -> Result<CustomerId, Self::Error>;
}

/// Orchestrates encryption and storage of new customers.
pub struct Service<R, E> {
    repository: Arc<R>,
    encrypter: Arc<E>,
}

impl<R, E> Clone for Service<R, E> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            encrypter: Arc::clone(&self.encrypter),
        }
    }
}

impl<R: Repository, E: Encrypter> Service<R, E> {
    /// Create an adding service with its dependencies.
    #[must_use]
    pub const fn new(repository: Arc<R>, encrypter: Arc<E>) -> Self {
        Self {
            repository,
            encrypter,
        }
    }

    /// Encrypt the customer's account number and store the result.
    ///
    /// The store is only called once encryption has succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::EncryptionFailed`] if the provider fails and
    /// [`CustomerError::StorageFailed`] if the insert fails.
    #[instrument(skip_all)]
    pub async fn add_customer(&self, customer: NewCustomer) -> Result<CustomerId, CustomerError> {
        let NewCustomer {
            name,
            account_number,
        } = customer;

        let ciphertext = self
            .encrypter
            .encrypt(account_number.expose())
            .await
            .map_err(|e| {
                warn!(error = %e, "Account number encryption failed");
                CustomerError::EncryptionFailed(Box::new(e))
            })?;

        let record = EncryptedCustomer {
            name,
            account_number: Ciphertext::new(ciphertext),
        };

        let id = self.repository.insert(record).await.map_err(|e| {
            warn!(error = %e, "Saving customer failed");
            CustomerError::StorageFailed(Box::new(e))
        })?;

        info!(%id, "Customer added");
        Ok(id)
    }
}
