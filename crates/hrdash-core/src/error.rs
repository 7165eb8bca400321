// ── Core error types ──
//
// Every action failure ends up as a `CoreError`. Server rejections are
// normalized to one message: the server's own `message` when it sent one,
// otherwise a fixed per-operation fallback such as
// "Failed to fetch departments". That message is what the state
// containers store.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Local ────────────────────────────────────────────────────────
    /// Input rejected before any request was sent.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Server ───────────────────────────────────────────────────────
    /// The server answered with a non-2xx status or an unreadable body.
    #[error("{message}")]
    Rejected { message: String, status: Option<u16> },

    /// The token was refused (HTTP 401). The session has been cleared.
    #[error("{message}")]
    Unauthorized { message: String },

    /// The request never got an answer (connection refused, timeout).
    #[error("{message} ({reason})")]
    Unreachable { message: String, reason: String },

    // ── Local infrastructure ─────────────────────────────────────────
    #[error("Session storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Normalize an API failure, using `fallback` when the server gave no
    /// message of its own.
    pub fn from_api(err: hrdash_api::Error, fallback: &str) -> Self {
        use hrdash_api::Error as Api;

        match err {
            Api::Validation { message } => Self::Validation { message },
            Api::Unauthorized { message, .. } => Self::Unauthorized {
                message: message.unwrap_or_else(|| fallback.to_owned()),
            },
            Api::Api {
                status, message, ..
            } => Self::Rejected {
                message: message.unwrap_or_else(|| fallback.to_owned()),
                status: Some(status),
            },
            Api::Transport(e) => Self::Unreachable {
                message: fallback.to_owned(),
                reason: e.to_string(),
            },
            Api::Deserialization { message, .. } => {
                tracing::debug!(%message, "unreadable response body");
                Self::Rejected {
                    message: fallback.to_owned(),
                    status: None,
                }
            }
            Api::InvalidUrl(e) => Self::Config {
                message: format!("invalid base URL: {e}"),
            },
            Api::Client(message) => Self::Config { message },
        }
    }

    /// The normalized message a state container stores for this failure.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::Rejected { message, .. }
            | Self::Unauthorized { message }
            | Self::Unreachable { message, .. }
            | Self::Storage { message }
            | Self::Config { message } => message,
        }
    }

    /// HTTP status of a server rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => *status,
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<hrdash_api::Error> for CoreError {
    fn from(err: hrdash_api::Error) -> Self {
        Self::from_api(err, "Request failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = CoreError::from_api(
            hrdash_api::Error::Api {
                status: 409,
                message: Some("Duplicate department".into()),
                body: String::new(),
            },
            "Failed to add department",
        );
        assert_eq!(err.message(), "Duplicate department");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn fallback_when_server_is_silent() {
        let err = CoreError::from_api(
            hrdash_api::Error::Api {
                status: 500,
                message: None,
                body: "<html>".into(),
            },
            "Failed to fetch departments",
        );
        assert_eq!(err.message(), "Failed to fetch departments");
        assert_eq!(err.to_string(), "Failed to fetch departments");
    }

    #[test]
    fn unreadable_body_uses_fallback() {
        let err = CoreError::from_api(
            hrdash_api::Error::Deserialization {
                message: "expected value".into(),
                body: "oops".into(),
            },
            "Failed to filter projects",
        );
        assert_eq!(err.message(), "Failed to filter projects");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn unauthorized_is_flagged() {
        let err = CoreError::from_api(
            hrdash_api::Error::Unauthorized {
                message: None,
                body: String::new(),
            },
            "Failed to delete employee",
        );
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Failed to delete employee");
    }

    #[test]
    fn local_validation_passes_through() {
        let err = CoreError::from(hrdash_api::Error::Validation {
            message: "page size must be greater than zero".into(),
        });
        assert!(matches!(err, CoreError::Validation { .. }));
        assert_eq!(err.message(), "page size must be greater than zero");
    }
}
