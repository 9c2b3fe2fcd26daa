//! Customer representations.
//!
//! A customer exists in two shapes. Plaintext shapes ([`NewCustomer`],
//! [`Customer`]) carry an [`AccountNumber`]; at-rest shapes
//! ([`EncryptedCustomer`], [`StoredCustomer`]) carry a [`Ciphertext`]. The
//! repository traits only accept and return the at-rest shapes.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use subtle::ConstantTimeEq;
use vault_transit_client::{is_vault_ciphertext, key_version};

/// Store-assigned customer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(i64);

impl CustomerId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for CustomerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Plaintext account number. Never shown by `Debug`.
#[derive(Clone)]
pub struct AccountNumber(SecretString);

impl AccountNumber {
    /// Wrap a plaintext account number.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Borrow the plaintext value.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccountNumber([REDACTED])")
    }
}

impl PartialEq for AccountNumber {
    fn eq(&self, other: &Self) -> bool {
        self.expose().as_bytes().ct_eq(other.expose().as_bytes()).into()
    }
}

impl Eq for AccountNumber {}

impl From<&str> for AccountNumber {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AccountNumber {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Provider-generated ciphertext, stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext(String);

impl Ciphertext {
    /// Wrap ciphertext returned by the crypto provider or read from the store.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the ciphertext.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the value carries the `vault:v<N>:` marker.
    #[must_use]
    pub fn has_vault_marker(&self) -> bool {
        is_vault_ciphertext(&self.0)
    }

    /// Transit key version that produced this ciphertext, if marked.
    #[must_use]
    pub fn key_version(&self) -> Option<u32> {
        key_version(&self.0)
    }
}

/// Plaintext input to the adding service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    /// Customer name
    pub name: String,
    /// Plaintext account number
    pub account_number: AccountNumber,
}

impl NewCustomer {
    /// Create a new customer.
    #[must_use]
    pub fn new(name: impl Into<String>, account_number: impl Into<AccountNumber>) -> Self {
        Self {
            name: name.into(),
            account_number: account_number.into(),
        }
    }
}

/// Plaintext customer returned by the getting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Store-assigned identifier
    pub id: CustomerId,
    /// Customer name
    pub name: String,
    /// Decrypted account number
    pub account_number: AccountNumber,
}

/// At-rest record handed to the store for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedCustomer {
    /// Customer name
    pub name: String,
    /// Encrypted account number
    pub account_number: Ciphertext,
}

/// At-rest record read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCustomer {
    /// Store-assigned identifier
    pub id: CustomerId,
    /// Customer name
    pub name: String,
    /// Encrypted account number, as persisted
    pub account_number: Ciphertext,
}
