//! Getting customers: fetch the stored record, then decrypt its account number.

use crate::error::CustomerError;
use crate::model::{AccountNumber, Customer, CustomerId, StoredCustomer};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use vault_transit_client::Decrypter;

/// Reads at-rest customer records.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Error returned when the record cannot be read, including unknown ids.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the record with the given id.
    async fn fetch_by_id(&self, id: CustomerId) -> Result<StoredCustomer, Self::Error>;
}

/// Orchestrates retrieval and decryption of customers.
pub struct Service<R, D> {
    repository: Arc<R>,
    decrypter: Arc<D>,
}

impl<R, D> Clone for Service<R, D> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            decrypter: Arc::clone(&self.decrypter),
        }
    }
}

impl<R: Repository, D: Decrypter> Service<R, D> {
    /// Create a getting service with its dependencies.
    #[must_use]
    pub const fn new(repository: Arc<R>, decrypter: Arc<D>) -> Self {
        Self {
            repository,
            decrypter,
        }
    }

    /// Fetch a customer and decrypt its account number.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::FetchFailed`] if the store fails (the
    /// provider is not called) and [`CustomerError::DecryptionFailed`] if
    /// the provider fails.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, CustomerError> {
        let StoredCustomer {
            id: stored_id,
            name,
            account_number,
        } = self.repository.fetch_by_id(id).await.map_err(|e| {
            warn!(error = %e, "Fetching customer failed");
            CustomerError::FetchFailed {
                id,
                source: Box::new(e),
            }
        })?;

        let plaintext = self
            .decrypter
            .decrypt(account_number.as_str())
            .await
            .map_err(|e| {
                warn!(error = %e, "Account number decryption failed");
                CustomerError::DecryptionFailed(Box::new(e))
            })?;

        debug!("Customer retrieved");
        Ok(Customer {
            id: stored_id,
            name,
            account_number: AccountNumber::new(plaintext),
        })
    }
}
