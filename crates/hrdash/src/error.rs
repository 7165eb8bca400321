//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use hrdash_config::ConfigError;
use hrdash_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("{message}: could not reach the API ({reason})")]
    #[diagnostic(
        code(hrdash::connection_failed),
        help(
            "Check that the server is running and the base URL is right.\n\
             Try: hrdash config show"
        )
    )]
    ConnectionFailed { message: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Not logged in")]
    #[diagnostic(code(hrdash::not_logged_in), help("Run: hrdash login"))]
    NotLoggedIn,

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(hrdash::auth_failed),
        help("Check your email and password, then run: hrdash login")
    )]
    AuthFailed { message: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(hrdash::not_found))]
    NotFound { message: String },

    #[error("{message}")]
    #[diagnostic(code(hrdash::conflict))]
    Conflict { message: String },

    #[error("{message}")]
    #[diagnostic(code(hrdash::api_error))]
    Api { message: String, status: Option<u16> },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hrdash::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(hrdash::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: hrdash config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("{0}")]
    #[diagnostic(code(hrdash::config))]
    Config(String),

    #[error("Session storage failed: {0}")]
    #[diagnostic(
        code(hrdash::storage),
        help("Check permissions on the hrdash data directory.")
    )]
    Storage(String),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(hrdash::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(hrdash::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotLoggedIn | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. }
            | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Unauthorized { message } => Self::AuthFailed { message },
            CoreError::Rejected {
                message,
                status: Some(404),
            } => Self::NotFound { message },
            CoreError::Rejected {
                message,
                status: Some(409),
            } => Self::Conflict { message },
            CoreError::Rejected { message, status } => Self::Api { message, status },
            CoreError::Unreachable { message, reason } => Self::ConnectionFailed { message, reason },
            CoreError::Storage { message } => Self::Storage(message),
            CoreError::Config { message } => Self::Config(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownProfile { name } => Self::ProfileNotFound {
                name,
                available: "(see: hrdash config profiles)".into(),
            },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(other.to_string()),
        }
    }
}
