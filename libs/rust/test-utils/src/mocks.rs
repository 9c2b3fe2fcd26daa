//! Collaborator doubles for the customer services.
//!
//! [`FakeCipher`] and [`InMemoryRepository`] behave like the real
//! collaborators; the `Failing*` doubles always fail. Every double counts
//! its calls so tests can assert which collaborators were reached.
//! [`MockTransit`] stands in for the Vault transit engine behind a
//! `wiremock` server.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use customer_service::{CustomerId, EncryptedCustomer, StoredCustomer, adding, getting};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;
use vault_transit_client::{Decrypter, Encrypter};
use wiremock::matchers::{header, method, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Message of [`FailingCipher`] and [`FailingRepository`] defaults.
pub const SOMETHING_WENT_WRONG: &str = "something went wrong";

/// Message returned by [`FailingRepository::insert`].
pub const SAVING_FAILED: &str = "saving customer failed";

/// Message returned by [`FailingRepository::fetch_by_id`].
pub const GETTING_FAILED: &str = "getting customer failed";

const MARKER: &str = "vault:v1:";

/// Error carrying a fixed message.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct StubError(pub String);

impl StubError {
    /// Create an error with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Seals `payload` under a fresh nonce so equal inputs never collide.
fn seal(nonce: &AtomicU64, payload: &str) -> String {
    let n = nonce.fetch_add(1, Ordering::Relaxed);
    format!("{MARKER}{}", BASE64.encode(format!("{n}|{payload}")))
}

/// Reverses [`seal`]; `None` for anything it did not produce.
fn open(ciphertext: &str) -> Option<String> {
    let body = ciphertext.strip_prefix(MARKER)?;
    let decoded = String::from_utf8(BASE64.decode(body).ok()?).ok()?;
    decoded.split_once('|').map(|(_, payload)| payload.to_string())
}

/// In-process cipher with transit-shaped, non-deterministic output.
#[derive(Debug, Default)]
pub struct FakeCipher {
    nonce: AtomicU64,
    encrypt_calls: AtomicUsize,
    decrypt_calls: AtomicUsize,
}

impl FakeCipher {
    /// Create a cipher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `encrypt` calls.
    pub fn encrypt_calls(&self) -> usize {
        self.encrypt_calls.load(Ordering::SeqCst)
    }

    /// Number of `decrypt` calls.
    pub fn decrypt_calls(&self) -> usize {
        self.decrypt_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Encrypter for FakeCipher {
    type Error = StubError;

    async fn encrypt(&self, plaintext: &str) -> Result<String, StubError> {
        self.encrypt_calls.fetch_add(1, Ordering::SeqCst);
        Ok(seal(&self.nonce, plaintext))
    }
}

#[async_trait]
impl Decrypter for FakeCipher {
    type Error = StubError;

    async fn decrypt(&self, ciphertext: &str) -> Result<String, StubError> {
        self.decrypt_calls.fetch_add(1, Ordering::SeqCst);
        open(ciphertext).ok_or_else(|| StubError::new("invalid ciphertext"))
    }
}

/// Cipher whose every call fails with the same message.
#[derive(Debug)]
pub struct FailingCipher {
    message: String,
    encrypt_calls: AtomicUsize,
    decrypt_calls: AtomicUsize,
}

impl FailingCipher {
    /// Fail every call with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            encrypt_calls: AtomicUsize::new(0),
            decrypt_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `encrypt` calls.
    pub fn encrypt_calls(&self) -> usize {
        self.encrypt_calls.load(Ordering::SeqCst)
    }

    /// Number of `decrypt` calls.
    pub fn decrypt_calls(&self) -> usize {
        self.decrypt_calls.load(Ordering::SeqCst)
    }
}

impl Default for FailingCipher {
    fn default() -> Self {
        Self::new(SOMETHING_WENT_WRONG)
    }
}

#[async_trait]
impl Encrypter for FailingCipher {
    type Error = StubError;

    async fn encrypt(&self, _plaintext: &str) -> Result<String, StubError> {
        self.encrypt_calls.fetch_add(1, Ordering::SeqCst);
        Err(StubError::new(self.message.clone()))
    }
}

#[async_trait]
impl Decrypter for FailingCipher {
    type Error = StubError;

    async fn decrypt(&self, _ciphertext: &str) -> Result<String, StubError> {
        self.decrypt_calls.fetch_add(1, Ordering::SeqCst);
        Err(StubError::new(self.message.clone()))
    }
}

/// Repository keeping rows in memory, ids starting at 1.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    rows: RwLock<BTreeMap<i64, EncryptedCustomer>>,
    insert_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl InMemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows exactly as they were inserted.
    pub async fn rows(&self) -> Vec<StoredCustomer> {
        self.rows
            .read()
            .await
            .iter()
            .map(|(id, row)| StoredCustomer {
                id: CustomerId::new(*id),
                name: row.name.clone(),
                account_number: row.account_number.clone(),
            })
            .collect()
    }

    /// Number of `insert` calls.
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_by_id` calls.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl adding::Repository for InMemoryRepository {
    type Error = StubError;

    async fn insert(&self, customer: EncryptedCustomer) -> Result<CustomerId, StubError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.write().await;
        let id = rows.keys().next_back().map_or(1, |last| last + 1);
        rows.insert(id, customer);
        Ok(CustomerId::new(id))
    }
}

#[async_trait]
impl getting::Repository for InMemoryRepository {
    type Error = StubError;

    async fn fetch_by_id(&self, id: CustomerId) -> Result<StoredCustomer, StubError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.rows
            .read()
            .await
            .get(&id.get())
            .map(|row| StoredCustomer {
                id,
                name: row.name.clone(),
                account_number: row.account_number.clone(),
            })
            .ok_or_else(|| StubError::new(format!("customer {id} not found")))
    }
}

/// Repository whose every call fails.
#[derive(Debug, Default)]
pub struct FailingRepository {
    insert_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl FailingRepository {
    /// Create a failing repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `insert` calls.
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_by_id` calls.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl adding::Repository for FailingRepository {
    type Error = StubError;

    async fn insert(&self, _customer: EncryptedCustomer) -> Result<CustomerId, StubError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        Err(StubError::new(SAVING_FAILED))
    }
}

#[async_trait]
impl getting::Repository for FailingRepository {
    type Error = StubError;

    async fn fetch_by_id(&self, _id: CustomerId) -> Result<StoredCustomer, StubError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Err(StubError::new(GETTING_FAILED))
    }
}

/// Transit engine responder for `wiremock`.
///
/// Encrypt answers with `vault:v1:` ciphertext that differs on every call;
/// decrypt accepts only ciphertext this responder produced and answers 400
/// with a Vault `errors` body otherwise.
#[derive(Debug, Clone, Default)]
pub struct MockTransit {
    nonce: Arc<AtomicU64>,
}

impl MockTransit {
    fn encrypt(&self, body: &serde_json::Value) -> ResponseTemplate {
        match body["plaintext"].as_str() {
            Some(plaintext) => ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "ciphertext": seal(&self.nonce, plaintext), "key_version": 1 }
            })),
            None => bad_request("missing plaintext"),
        }
    }

    fn decrypt(body: &serde_json::Value) -> ResponseTemplate {
        match body["ciphertext"].as_str().and_then(open) {
            Some(plaintext) => ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "plaintext": plaintext }
            })),
            None => bad_request("invalid ciphertext"),
        }
    }
}

impl Respond for MockTransit {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(body) = serde_json::from_slice::<serde_json::Value>(&request.body) else {
            return bad_request("failed to parse JSON input");
        };

        let path = request.url.path();
        if path.contains("/encrypt/") {
            self.encrypt(&body)
        } else if path.contains("/decrypt/") {
            Self::decrypt(&body)
        } else {
            ResponseTemplate::new(404).set_body_json(serde_json::json!({ "errors": [] }))
        }
    }
}

fn bad_request(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(serde_json::json!({ "errors": [message] }))
}

/// Start a server serving the transit engine for `token` and `key` under
/// the default `transit` mount.
pub async fn start_transit_server(token: &str, key: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(format!("^/v1/transit/(encrypt|decrypt)/{key}$")))
        .and(header("X-Vault-Token", token))
        .respond_with(MockTransit::default())
        .mount(&server)
        .await;
    server
}
