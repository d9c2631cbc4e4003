//! Code Meet Hub Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! sanitization/validation pipeline shared by every Code Meet Hub component.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;
pub mod submission_gate;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, BackendError, BackendErrorKind, ErrorMetadata, LogLevel};
pub use models::{EventDraft, EventRecord, Identity, NewEvent};
pub use ports::{AuthContext, EventStore, StaticAuthContext};
pub use submission_gate::{SubmissionGate, SubmissionGuard};
pub use validation::{
    is_valid_email, is_valid_future_date, is_valid_url, process_tags, sanitize, sanitize_draft,
    validate_event_draft, SanitizationWarning, SanitizedDraft, TagReport, ValidationContext,
    ValidationResult,
};
