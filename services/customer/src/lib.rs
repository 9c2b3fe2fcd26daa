//! Customer service library.
//!
//! Stores customer records whose account numbers are encrypted with Vault
//! transit before they reach the database, and decrypted after they are
//! read back. Adding and getting are separate services that share nothing
//! but their injected collaborators.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adding;
pub mod config;
pub mod error;
pub mod factory;
pub mod getting;
pub mod model;
pub mod storage;

// Re-exports for convenience
pub use config::Config;
pub use error::{BoxError, CustomerError};
pub use factory::{ServiceFactory, Services, VaultServices};
pub use model::{AccountNumber, Ciphertext, Customer, CustomerId, EncryptedCustomer, NewCustomer, StoredCustomer};
pub use storage::{SqliteCustomerRepository, StoreError};
