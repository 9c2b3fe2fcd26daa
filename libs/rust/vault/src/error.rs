//! Transit client errors.
//!
//! Vault being unreachable ([`VaultError::Unavailable`]) is kept apart from
//! Vault answering with something unusable ([`VaultError::MalformedResponse`]).

use thiserror::Error;

/// Errors returned by [`crate::VaultClient`].
#[derive(Error, Debug)]
pub enum VaultError {
    /// No usable answer: connection refused, timeout, or a non-4xx error status
    #[error("vault unavailable: {0}")]
    Unavailable(String),

    /// 400 and other client errors, typically ciphertext Vault did not produce
    #[error("transit request rejected: {0}")]
    InvalidRequest(String),

    /// 404 on the transit path
    #[error("transit key not found at {0}")]
    KeyNotFound(String),

    /// 403 for the configured token
    #[error("token may not use {0}")]
    PermissionDenied(String),

    /// 429
    #[error("vault rate limit exceeded")]
    RateLimited,

    /// 2xx with an empty, missing or undecodable payload
    #[error("malformed transit response: {0}")]
    MalformedResponse(String),

    /// The HTTP client could not be built
    #[error("building vault HTTP client failed: {0}")]
    Client(#[source] reqwest::Error),

    /// The client settings do not validate
    #[error("invalid vault configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for Vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

impl VaultError {
    /// Classify a non-success HTTP status for a request to `path`.
    ///
    /// `detail` is Vault's error text for the response.
    #[must_use]
    pub fn from_status(status: u16, path: &str, detail: String) -> Self {
        match status {
            400 => Self::InvalidRequest(detail),
            403 => Self::PermissionDenied(path.to_string()),
            404 => Self::KeyNotFound(path.to_string()),
            429 => Self::RateLimited,
            400..=499 => Self::InvalidRequest(format!("status {status}: {detail}")),
            _ => Self::Unavailable(format!("status {status}: {detail}")),
        }
    }

    /// Whether the same request may succeed if sent again later.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::RateLimited)
    }

    /// Whether Vault answered but the payload could not be used.
    #[must_use]
    pub const fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a malformed response error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
