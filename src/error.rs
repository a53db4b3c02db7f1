//! Error types for route optimization and client configuration.

use thiserror::Error;

use crate::polyline::PolylineError;

/// Failure of a single optimization call.
///
/// Every kind propagates to the caller unchanged; nothing is retried or
/// recovered inside the crate.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Missing or unusable input. Never retryable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The provider could not be reached or answered with a non-2xx status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered but with a non-OK status or a payload that
    /// violates its documented contract.
    #[error("provider error: {0}")]
    Provider(String),

    /// The overview polyline could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] PolylineError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    Transport,
    Provider,
    Decode,
}

impl RouteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RouteError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            RouteError::Transport(_) => ErrorKind::Transport,
            RouteError::Provider(_) => ErrorKind::Provider,
            RouteError::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Only transport failures may be transient; retry policy is the caller's.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RouteError::Transport(_))
    }
}

impl From<reqwest::Error> for RouteError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest includes the request URL in its message, which carries the key
        RouteError::Transport(err.without_url().to_string())
    }
}

/// Startup-time configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("directions API key is not configured (set {var})")]
    MissingApiKey { var: &'static str },

    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },

    #[error("invalid directions base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
