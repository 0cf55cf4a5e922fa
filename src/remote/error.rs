//! The single failure type of the remote store client.

use thiserror::Error;

/// A failed call to the remote store.
///
/// Callers treat every variant the same way; the split only exists so logs
/// can tell a dead network apart from a server that answered badly.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The request never got a response (connection refused, DNS, reset).
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The server answered 2xx but the body was not the expected JSON.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// The configured base URL cannot address the store.
    #[error("invalid api url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl RemoteError {
    /// True for failures on the transport side, false for server-reported ones.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::InvalidUrl { .. })
    }

    /// HTTP status of a server-reported failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Result type for remote store calls.
pub type RemoteResult<T> = Result<T, RemoteError>;
