//! SQLite-backed customer repository.
//!
//! Stores the at-rest representation byte for byte; no crypto happens here.

use super::error::StoreError;
use crate::adding;
use crate::getting;
use crate::model::{Ciphertext, CustomerId, EncryptedCustomer, StoredCustomer};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS customer (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    account_number TEXT NOT NULL
);
";

/// Customer repository over a single SQLite connection.
#[derive(Clone)]
pub struct SqliteCustomerRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCustomerRepository {
    /// Open (or create) a database file and ensure the `customer` table exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] if the file cannot be opened or the table
    /// cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref()).map_err(StoreError::Open)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] if SQLite cannot be initialised.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::Open)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA).map_err(StoreError::Open)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    #[cfg(test)]
    async fn count(&self) -> Result<i64, StoreError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM customer", [], |row| row.get(0))
                .map_err(StoreError::Query)
        })
        .await
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StoreError::LockPoisoned)?;
            f(&guard)
        })
        .await?
    }
}

#[async_trait]
impl adding::Repository for SqliteCustomerRepository {
    type Error = StoreError;

    #[instrument(skip_all)]
    async fn insert(&self, customer: EncryptedCustomer) -> Result<CustomerId, StoreError> {
        let id = self
            .with_conn(move |conn| {
                conn.query_row(
                    "INSERT INTO customer (name, account_number) VALUES (?1, ?2) RETURNING id",
                    params![customer.name, customer.account_number.as_str()],
                    |row| row.get::<_, i64>(0),
                )
                .map_err(StoreError::Insert)
            })
            .await?;

        debug!(id, "Inserted customer row");
        Ok(CustomerId::new(id))
    }
}

#[async_trait]
impl getting::Repository for SqliteCustomerRepository {
    type Error = StoreError;

    #[instrument(skip(self))]
    async fn fetch_by_id(&self, id: CustomerId) -> Result<StoredCustomer, StoreError> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT id, name, account_number FROM customer WHERE id = ?1",
                [id.get()],
                |row| {
                    Ok(StoredCustomer {
                        id: CustomerId::new(row.get(0)?),
                        name: row.get(1)?,
                        account_number: Ciphertext::new(row.get::<_, String>(2)?),
                    })
                },
            )
            .optional()
            .map_err(StoreError::Query)?
            .ok_or(StoreError::NotFound(id))
        })
        .await
    }
}
