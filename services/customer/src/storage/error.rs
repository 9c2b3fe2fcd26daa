use crate::model::CustomerId;
use thiserror::Error;

/// Errors from the customer store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database could not be opened or initialised
    #[error("opening customer store failed: {0}")]
    Open(#[source] rusqlite::Error),

    /// The insert statement failed
    #[error("saving customer failed: {0}")]
    Insert(#[source] rusqlite::Error),

    /// No customer with this id
    #[error("customer {0} not found")]
    NotFound(CustomerId),

    /// The select statement failed
    #[error("reading customer failed: {0}")]
    Query(#[source] rusqlite::Error),

    /// A previous holder of the connection panicked
    #[error("customer store lock poisoned")]
    LockPoisoned,

    /// The blocking task running the statement did not complete
    #[error("customer store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl StoreError {
    /// Whether the error means the id does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
