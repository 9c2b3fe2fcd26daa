//! Transit engine wire types and ciphertext inspection.

use serde::{Deserialize, Serialize};

/// Prefix of every ciphertext produced by the transit engine.
pub const CIPHERTEXT_PREFIX: &str = "vault:v";

/// Body of `POST {mount}/encrypt/{key}`; `plaintext` is base64.
#[derive(Debug, Serialize)]
pub struct EncryptRequest {
    /// Base64 of the UTF-8 plaintext
    pub plaintext: String,
}

/// Body of `POST {mount}/decrypt/{key}`.
#[derive(Debug, Serialize)]
pub struct DecryptRequest<'a> {
    /// Ciphertext exactly as returned by encrypt
    pub ciphertext: &'a str,
}

/// Envelope around transit responses.
#[derive(Debug, Deserialize)]
pub struct TransitResponse<T> {
    /// Operation payload; absent on some proxies' error pages
    pub data: Option<T>,
}

/// `data` of an encrypt response. Kept as raw JSON so a non-string value
/// is reported as malformed instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct EncryptData {
    /// `vault:v<N>:...` on success
    #[serde(default)]
    pub ciphertext: Option<serde_json::Value>,
}

/// `data` of a decrypt response.
#[derive(Debug, Deserialize)]
pub struct DecryptData {
    /// Base64 plaintext on success
    #[serde(default)]
    pub plaintext: Option<serde_json::Value>,
}

/// Error body returned by Vault on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reasons, possibly empty
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Key version encoded in a `vault:v<N>:<payload>` ciphertext.
///
/// Returns `None` when `value` does not carry the transit marker or has an
/// empty payload.
#[must_use]
pub fn key_version(value: &str) -> Option<u32> {
    let rest = value.strip_prefix(CIPHERTEXT_PREFIX)?;
    let (version, payload) = rest.split_once(':')?;
    if payload.is_empty() || !version.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    version.parse().ok()
}

/// Whether `value` looks like transit ciphertext.
#[must_use]
pub fn is_vault_ciphertext(value: &str) -> bool {
    key_version(value).is_some()
}
