//! Process-wide `tracing` subscriber.
//!
//! `RUST_LOG` wins over the configured filter when set.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub use tracing_subscriber::util::TryInitError;

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Subscriber settings.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Service name logged once the subscriber is installed
    pub service_name: String,
    /// `EnvFilter` directives, e.g. `info` or `customer_service=debug`
    pub filter: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new("customer-service")
    }
}

impl TracingConfig {
    /// Settings for `service_name` at `info` level.
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            filter: "info".to_string(),
            format: LogFormat::Compact,
        }
    }

    /// Replace the filter directives.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Select the output format.
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.filter))
    }
}

/// Install the global subscriber.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
#[allow(clippy::expect_used)]
pub fn init_tracing(config: &TracingConfig) {
    try_init_tracing(config).expect("global tracing subscriber already installed");
}

/// Install the global subscriber unless one is already present.
///
/// # Errors
///
/// Returns [`TryInitError`] if a global subscriber is already set.
pub fn try_init_tracing(config: &TracingConfig) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .try_init()?,
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init()?,
    }

    tracing::info!(service = %config.service_name, format = ?config.format, "Logging initialized");
    Ok(())
}
