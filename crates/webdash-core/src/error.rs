// ── Core error types ──
//
// Errors surfaced by the session store and CRUD workflow. Consumers never
// see raw transport details: the `From<webdash_api::Error>` impl folds
// them into validation, authentication, API and network categories.

use thiserror::Error;

use crate::validate::ValidationErrors;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Client-side checks ───────────────────────────────────────────
    #[error("{0}")]
    Validation(ValidationErrors),

    // ── Session errors ───────────────────────────────────────────────
    #[error("{message}")]
    AuthenticationFailed { message: String },

    #[error("Session expired -- please log in again")]
    SessionExpired,

    #[error("Not logged in")]
    NotAuthenticated,

    // ── Backend errors ───────────────────────────────────────────────
    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    // ── Local errors ─────────────────────────────────────────────────
    #[error("Session storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    #[error("No {0} dialog is open")]
    NoDialog(&'static str),

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Shorthand for a single-field validation failure.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::default();
        errors.add(field, message);
        Self::Validation(errors)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<webdash_api::Error> for CoreError {
    fn from(err: webdash_api::Error) -> Self {
        use webdash_api::Error as ApiError;

        match err {
            ApiError::Unauthorized { .. } => CoreError::SessionExpired,
            ApiError::Rejected { message } => CoreError::Api {
                message,
                status: None,
            },
            ApiError::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            ApiError::Http { status } => CoreError::Api {
                message: format!("HTTP error! status: {status}"),
                status: Some(status),
            },
            ApiError::Transport(ref e) if err.is_network() => CoreError::Network {
                message: e.to_string(),
            },
            // A response arrived but its body could not be read.
            ApiError::Transport(e) => CoreError::Api {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::Tls(message) => CoreError::Network { message },
            ApiError::Deserialization { message, .. } => CoreError::Api {
                message: format!("Unexpected response: {message}"),
                status: None,
            },
            ApiError::Io(e) => CoreError::Unsupported(format!("I/O error: {e}")),
        }
    }
}
