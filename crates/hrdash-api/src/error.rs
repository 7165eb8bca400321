use std::convert::Infallible;

use thiserror::Error;

/// Top-level error type for the `hrdash-api` crate.
///
/// Covers local argument validation, transport failures and non-2xx
/// responses. `hrdash-core` normalizes these into a single message that
/// the state containers can store.
#[derive(Debug, Error)]
pub enum Error {
    // ── Local validation ────────────────────────────────────────────
    /// Arguments rejected before any request was sent.
    #[error("Invalid request: {message}")]
    Validation { message: String },

    // ── Server responses ────────────────────────────────────────────
    /// HTTP 401 from an authorized endpoint or a failed login.
    #[error("Unauthorized (HTTP 401){}", display_message(.message.as_deref()))]
    Unauthorized {
        message: Option<String>,
        body: String,
    },

    /// Any other non-2xx response.
    #[error("API error (HTTP {status}){}", display_message(.message.as_deref()))]
    Api {
        status: u16,
        /// The server's `message` field, when the body carried one.
        message: Option<String>,
        body: String,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Building the underlying HTTP client failed.
    #[error("HTTP client error: {0}")]
    Client(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON (de)serialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

fn display_message(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// The message the server attached to a failed response, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message, .. } | Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of a failed response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the session token was rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns `true` if the request never left the process.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidUrl(_))
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
