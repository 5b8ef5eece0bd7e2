//! Request layer configuration with an optional environment override. Values
//! are read once when a client is built; later base URL changes go through
//! `ApiClient::set_base_url`. Configuration values are public; do not store
//! secrets here.

use std::{env::var, time::Duration};
use url::Url;

/// Base URL used when neither the caller nor the environment provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";
/// Default request timeout (seconds) applied to every call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_BASE_URL: &str = "WAYPOINT_API_BASE_URL";
pub const ENV_TIMEOUT: &str = "WAYPOINT_API_TIMEOUT";

/// Settings shared by every request issued through an `ApiClient`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Loads defaults and applies `WAYPOINT_API_*` overrides when present.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();
        apply_overrides(&mut config, env_overrides());
        config
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Default)]
struct Overrides {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

fn env_overrides() -> Overrides {
    Overrides {
        base_url: var(ENV_BASE_URL)
            .ok()
            .and_then(|value| normalize_value(&value)),
        timeout_secs: var(ENV_TIMEOUT)
            .ok()
            .and_then(|value| normalize_value(&value))
            .and_then(|value| value.parse().ok())
            .filter(|secs| *secs > 0),
    }
}

fn apply_overrides(config: &mut ApiConfig, overrides: Overrides) {
    if let Some(value) = overrides.base_url {
        config.base_url = value;
    }
    if let Some(secs) = overrides.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Checks that a base URL is absolute and uses http(s).
///
/// # Errors
/// Returns a message suitable for CLI output when the URL is unusable.
pub fn validate_base_url(value: &str) -> Result<String, String> {
    let url = Url::parse(value.trim()).map_err(|err| format!("invalid base URL: {err}"))?;
    match url.scheme() {
        "http" | "https" => Ok(value.trim().to_string()),
        scheme => Err(format!("unsupported scheme {scheme}")),
    }
}
