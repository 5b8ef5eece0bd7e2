use std::fmt;

/// Fallback message used when a failure carries no further detail.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";
/// Message surfaced when the per-request timeout aborts a call.
pub const TIMEOUT_MESSAGE: &str = "Request timeout";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    Config(String),
    Network(String),
    Timeout,
    Http { status: u16 },
    Parse(String),
    Serialization(String),
    Unknown,
}

impl ApiError {
    /// Maps transport errors, keeping timeouts distinct from other network failures.
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Timeout => write!(formatter, "{TIMEOUT_MESSAGE}"),
            ApiError::Http { status } => write!(formatter, "HTTP error! status: {status}"),
            ApiError::Config(message)
            | ApiError::Network(message)
            | ApiError::Parse(message)
            | ApiError::Serialization(message) => {
                if message.trim().is_empty() {
                    write!(formatter, "{DEFAULT_ERROR_MESSAGE}")
                } else {
                    write!(formatter, "{message}")
                }
            }
            ApiError::Unknown => write!(formatter, "{DEFAULT_ERROR_MESSAGE}"),
        }
    }
}

impl std::error::Error for ApiError {}
