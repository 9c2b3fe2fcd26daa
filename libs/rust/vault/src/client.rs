//! Vault HTTP client for the transit secrets engine.

use crate::{
    config::VaultConfig,
    error::{VaultError, VaultResult},
    provider::{Decrypter, Encrypter},
    transit::{DecryptData, DecryptRequest, EncryptData, EncryptRequest, ErrorResponse, TransitResponse},
};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::Client;
use rust_common::{HttpConfig, build_http_client};
use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

/// Vault client bound to a single transit key.
///
/// Safe to share between tasks; the underlying `reqwest::Client` pools
/// connections internally.
pub struct VaultClient {
    config: VaultConfig,
    http: Client,
}

impl VaultClient {
    /// Create a new Vault client.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfig`] if the configuration does not
    /// validate, or [`VaultError::Client`] if the HTTP client cannot be built.
    pub fn new(config: VaultConfig) -> VaultResult<Self> {
        config.validate()?;

        let http = build_http_client(&HttpConfig::new(config.timeout))
            .map_err(VaultError::Client)?;

        Ok(Self { config, http })
    }

    fn transit_path(&self, operation: &str) -> String {
        format!(
            "{}/{operation}/{}",
            self.config.transit_mount.trim_matches('/'),
            self.config.key_name
        )
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> VaultResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}/v1/{path}", self.config.addr.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .header("X-Vault-Token", self.config.token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| VaultError::unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = vault_error_detail(&text);
            warn!(path, status = status.as_u16(), "Vault request failed");
            return Err(VaultError::from_status(status.as_u16(), path, detail));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| VaultError::unavailable(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| VaultError::malformed(e.to_string()))
    }
}

/// Joins Vault's `errors` array, falling back to the raw body.
fn vault_error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed.errors.join("; "),
        _ => body.trim().to_string(),
    }
}

/// Extracts a non-empty string field, treating anything else as malformed.
fn non_empty_string(value: Option<serde_json::Value>, field: &str) -> VaultResult<String> {
    match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Ok(s),
        _ => Err(VaultError::malformed(format!("{field} is empty or not a string"))),
    }
}

#[async_trait]
impl Encrypter for VaultClient {
    type Error = VaultError;

    #[instrument(skip(self, plaintext), fields(key = %self.config.key_name))]
    async fn encrypt(&self, plaintext: &str) -> VaultResult<String> {
        let body = EncryptRequest {
            plaintext: BASE64.encode(plaintext.as_bytes()),
        };

        let response: TransitResponse<EncryptData> =
            self.post(&self.transit_path("encrypt"), &body).await?;

        let ciphertext = non_empty_string(response.data.and_then(|d| d.ciphertext), "ciphertext")?;

        debug!("Encrypted value with transit key");
        Ok(ciphertext)
    }
}

#[async_trait]
impl Decrypter for VaultClient {
    type Error = VaultError;

    #[instrument(skip(self, ciphertext), fields(key = %self.config.key_name))]
    async fn decrypt(&self, ciphertext: &str) -> VaultResult<String> {
        let body = DecryptRequest { ciphertext };

        let response: TransitResponse<DecryptData> =
            self.post(&self.transit_path("decrypt"), &body).await?;

        let encoded = non_empty_string(response.data.and_then(|d| d.plaintext), "plaintext")?;

        let decoded = BASE64
            .decode(encoded.as_bytes())
            .map_err(|e| VaultError::malformed(format!("plaintext is not base64: {e}")))?;

        let plaintext = String::from_utf8(decoded)
            .map_err(|e| VaultError::malformed(format!("plaintext is not UTF-8: {e}")))?;

        debug!("Decrypted value with transit key");
        Ok(plaintext)
    }
}
