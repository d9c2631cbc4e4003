//! Error types module
//!
//! All failures of the submission pipeline are unified under [`AppError`]. Each
//! variant self-describes how it should be presented to the user through the
//! [`ErrorMetadata`] trait, so the boundary code (orchestrator, feed loader, CLI)
//! never has to decide on its own whether a message is safe to show.
//!
//! [`BackendError`] is the structured error returned by the hosted backend. Its
//! classifiable code is translated into the closed [`BackendErrorKind`] set in a
//! single place, [`BackendErrorKind::from_code`].

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::validation::SanitizationWarning;

/// Postgres SQLSTATE raised on a unique constraint violation.
pub const UNIQUE_VIOLATION_CODE: &str = "23505";

/// Postgres SQLSTATE raised on a not-null constraint violation.
pub const NOT_NULL_VIOLATION_CODE: &str = "23502";

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable remote issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error presentation - defines how an error should be shown to the user
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "VALIDATION_FAILED")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (the user can retry)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether internal details must be hidden from the user
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Closed classification of backend failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendErrorKind {
    /// A matching record already exists
    UniquenessViolation,
    /// A required column was left empty
    RequiredFieldMissing,
    Other,
}

impl BackendErrorKind {
    /// Translate a backend error code into a kind.
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some(UNIQUE_VIOLATION_CODE) => BackendErrorKind::UniquenessViolation,
            Some(NOT_NULL_VIOLATION_CODE) => BackendErrorKind::RequiredFieldMissing,
            _ => BackendErrorKind::Other,
        }
    }

    /// Fixed user-facing message for this kind
    pub fn user_message(&self) -> &'static str {
        match self {
            BackendErrorKind::UniquenessViolation => "An event with these details already exists.",
            BackendErrorKind::RequiredFieldMissing => "All required fields must be filled.",
            BackendErrorKind::Other => "Could not create the event. Please try again in a few moments.",
        }
    }
}

impl Display for BackendErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BackendErrorKind::UniquenessViolation => write!(f, "uniqueness_violation"),
            BackendErrorKind::RequiredFieldMissing => write!(f, "required_field_missing"),
            BackendErrorKind::Other => write!(f, "other"),
        }
    }
}

/// Structured error returned by the hosted backend (insert or query API).
///
/// The field names match the JSON error body of the REST backend so the client can
/// deserialize it directly. `message`, `details` and `hint` are internal only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    /// HTTP status of the response, when there was one
    #[serde(skip)]
    pub status: Option<u16>,
}

impl BackendError {
    pub fn new(code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            ..Self::default()
        }
    }

    /// Error for a request that never produced a backend response
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn kind(&self) -> BackendErrorKind {
        BackendErrorKind::from_code(self.code.as_deref())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {}", .errors.join("; "))]
    Validation {
        errors: Vec<String>,
        warnings: Vec<SanitizationWarning>,
    },

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("Backend insert failed: {0}")]
    Backend(#[source] BackendError),

    #[error("Backend query failed: {0}")]
    Fetch(#[source] BackendError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, sensitive, log_level).
/// client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (&'static str, bool, Option<&'static str>, bool, LogLevel) {
    match err {
        AppError::Validation { .. } => (
            "VALIDATION_FAILED",
            true,
            Some("Correct the highlighted fields and submit again"),
            false,
            LogLevel::Debug,
        ),
        AppError::AuthenticationRequired => (
            "AUTHENTICATION_REQUIRED",
            true,
            Some("Sign in and submit again"),
            false,
            LogLevel::Debug,
        ),
        AppError::SubmissionInProgress => (
            "SUBMISSION_IN_PROGRESS",
            true,
            Some("Wait for the current submission to finish"),
            false,
            LogLevel::Debug,
        ),
        AppError::Backend(_) => (
            "BACKEND_INSERT_FAILED",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Warn,
        ),
        AppError::Fetch(_) => (
            "BACKEND_FETCH_FAILED",
            true,
            Some("Reload the page"),
            true,
            LogLevel::Warn,
        ),
        AppError::Config(_) => (
            "CONFIGURATION_ERROR",
            false,
            Some("Check environment variables"),
            false,
            LogLevel::Error,
        ),
        AppError::InvalidInput(_) => (
            "INVALID_INPUT",
            false,
            Some("Check the input and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) => (
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Classification of a backend failure, if this is one
    pub fn backend_kind(&self) -> Option<BackendErrorKind> {
        match self {
            AppError::Backend(err) | AppError::Fetch(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Get detailed error information including error chain (for logs only)
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).2
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation { errors, .. } => errors.join("\n"),
            AppError::AuthenticationRequired => "Sign in to create an event.".to_string(),
            AppError::SubmissionInProgress => {
                "Your event is already being submitted.".to_string()
            }
            AppError::Backend(err) => err.kind().user_message().to_string(),
            AppError::Fetch(_) => "Could not load events. Try reloading the page.".to_string(),
            AppError::Config(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::Internal(_) => {
                "Something went wrong. Please try again in a few moments.".to_string()
            }
        }
    }
}
