// ── Core error types ──
//
// Errors surfaced by the cache. Backend failures are translated through
// `From<BackendError>` so consumers match on domain variants. `Clone` lets
// one refresh outcome be handed to every caller waiting on it.

use thiserror::Error;

use crate::api::BackendError;
use crate::store::CacheCategory;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Cache errors ─────────────────────────────────────────────────
    #[error("Team not cached: {team_id}")]
    TeamNotCached { team_id: String },

    #[error("Backend returned {got} items where {expected} was requested")]
    PayloadMismatch {
        expected: CacheCategory,
        got: CacheCategory,
    },

    #[error("Unexpected backend response to {operation}")]
    UnexpectedResponse { operation: &'static str },

    #[error("Refresh of {category} for team {team_id} ended without a result")]
    RefreshAborted {
        team_id: String,
        category: CacheCategory,
    },

    // ── Backend errors (wrapped, not exposed raw) ────────────────────
    #[error("Backend error: {message}")]
    Backend {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Not authorized by backend")]
    Unauthorized,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from backend errors ───────────────────────────────────

impl From<BackendError> for CoreError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Http { status, message } => CoreError::Backend {
                message,
                status: Some(status),
            },
            BackendError::Unauthorized => CoreError::Unauthorized,
            BackendError::Transport(message) => CoreError::Backend {
                message,
                status: None,
            },
            BackendError::Deserialization { message } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
