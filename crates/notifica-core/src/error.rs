//! Error types for notifica-core

use std::sync::Arc;

use thiserror::Error;

/// Result type alias using notifica-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notifica-core operations
///
/// The enum is `Clone` so a single classified failure can be stored in a
/// cache's error slot and handed back to the caller at the same time.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Invalid or missing client configuration (fatal, never retried)
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Request could not be built (bad path, header, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP 403: the calling origin or key is not on the allowlist
    #[error(
        "This origin ({origin}) is not allowed to access the Notifica API. \
         Add it to the origin allowlist in the Notifica dashboard, \
         or use a pk_test_ key for local development."
    )]
    OriginNotAllowed { origin: String },

    /// Any other non-2xx response
    #[error("Notifica API error: {status} {status_text}{}", body_suffix(.body))]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Transport-level failure (DNS, connect, IO)
    #[error("Network error: {0}")]
    Network(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// 2xx response whose body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[source] Arc<serde_json::Error>),
}

impl Error {
    /// Wrap an underlying transport failure.
    pub fn network(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(source))
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::OriginNotAllowed { .. } => Some(403),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether a later attempt could plausibly succeed.
    ///
    /// Nothing in this crate retries; callers decide.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(Arc::new(value))
    }
}

/// Longest response excerpt quoted in an `Api` error message.
const MAX_BODY_CHARS: usize = 180;

fn body_suffix(body: &str) -> String {
    let body = body.trim().chars().take(MAX_BODY_CHARS).collect::<String>();
    if body.is_empty() {
        String::new()
    } else {
        format!(" - {body}")
    }
}
