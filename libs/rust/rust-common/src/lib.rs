//! Cross-cutting setup shared by the vault-eas crates: the outbound HTTP
//! client and the tracing subscriber.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod http;
pub mod tracing_config;

pub use http::{HttpConfig, build_http_client};
pub use tracing_config::{LogFormat, TracingConfig, TryInitError, init_tracing, try_init_tracing};
