//! Encrypt/decrypt capability traits.
//!
//! For non-empty `p`, implementations must satisfy `decrypt(encrypt(p)) == p`.
//! Empty plaintext may encrypt but is not guaranteed to decrypt; Vault
//! answers it with an empty field, which [`crate::VaultClient`] rejects as
//! malformed. Callers that need to read a value back must not store an
//! empty one. Ciphertext is opaque text and may differ between calls for
//! the same plaintext.

use async_trait::async_trait;

/// Types able to encrypt a text value.
#[async_trait]
pub trait Encrypter: Send + Sync {
    /// Error returned when encryption fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Encrypt `plaintext`, returning storable ciphertext.
    async fn encrypt(&self, plaintext: &str) -> Result<String, Self::Error>;
}

/// Types able to decrypt ciphertext produced by a matching [`Encrypter`].
#[async_trait]
pub trait Decrypter: Send + Sync {
    /// Error returned when decryption fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Decrypt `ciphertext` back to the non-empty plaintext it was made from.
    async fn decrypt(&self, ciphertext: &str) -> Result<String, Self::Error>;
}
