use thiserror::Error;

/// Top-level error type for the `webdash-api` crate.
///
/// Covers transport failures, HTTP-level failures, and the `status: "error"`
/// envelope the backend returns with HTTP 200. `webdash-core` maps these into
/// the session and page-level error model.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── HTTP ────────────────────────────────────────────────────────
    /// The backend answered 401 (missing, expired, or revoked token).
    #[error("{message}")]
    Unauthorized { message: String },

    /// Non-2xx response whose body was not JSON.
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// Non-2xx JSON response. `message` is the body's `message` field when
    /// present, otherwise the generic `HTTP error! status: N` text.
    #[error("{message}")]
    Api { status: u16, message: String },

    // ── Envelope ────────────────────────────────────────────────────
    /// 2xx response carrying `status: "error"`.
    #[error("{message}")]
    Rejected { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Local I/O failure while preparing a request (e.g. reading an upload).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if the backend rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_network(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// A success response without the record it should carry.
    pub(crate) fn missing_data() -> Self {
        Self::Deserialization {
            message: "missing field `data`".into(),
            body: String::new(),
        }
    }

    /// HTTP status associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } | Self::Api { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
