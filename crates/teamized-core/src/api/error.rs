use thiserror::Error;

/// Failure reported by a [`TeamsBackend`](super::TeamsBackend).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Non-success HTTP status with the backend's message.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Session missing or rejected.
    #[error("Not authorized")]
    Unauthorized,

    /// Connection-level failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body did not have the expected shape.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String },
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Deserialization {
            message: err.to_string(),
        }
    }
}
