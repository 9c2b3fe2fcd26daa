//! Shared `reqwest` client construction.
//!
//! Remote collaborators (currently only Vault) get their client from
//! [`build_http_client`] so timeouts and TLS are set the same way everywhere.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on the time spent establishing a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for an outbound JSON client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// Connect timeout, clamped to `request_timeout` when building
    pub connect_timeout: Duration,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}

impl HttpConfig {
    /// Settings with the given request timeout and default everything else.
    #[must_use]
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            request_timeout,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: concat!("vault-eas/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Override the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Connect timeout actually applied to the client.
    #[must_use]
    pub fn effective_connect_timeout(&self) -> Duration {
        self.connect_timeout.min(self.request_timeout)
    }
}

/// Build a rustls-backed client that asks for JSON responses.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
///
/// # Examples
///
/// ```
/// use rust_common::{HttpConfig, build_http_client};
/// use std::time::Duration;
///
/// let client = build_http_client(&HttpConfig::new(Duration::from_secs(5)));
/// assert!(client.is_ok());
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    ClientBuilder::new()
        .timeout(config.request_timeout)
        .connect_timeout(config.effective_connect_timeout())
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .use_rustls_tls()
        .build()
}
