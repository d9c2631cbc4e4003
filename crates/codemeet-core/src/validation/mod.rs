//! Validation modules
//!
//! The event submission pipeline runs in two steps: [`sanitize_draft`] strips unsafe
//! content, then [`validate_event_draft`] enforces the field rules and collects every
//! violation. Neither step performs I/O.

pub mod event;
pub mod fields;
pub mod sanitize;
pub mod tags;

pub use event::{
    validate_event_draft, validate_event_draft_with, EventFieldError, ValidationResult,
    MAX_ATTENDEES_LIMIT, MAX_DESCRIPTION_LENGTH, MAX_LOCATION_LENGTH, MAX_ORGANIZER_NAME_LENGTH,
    MAX_TITLE_LENGTH,
};
pub use fields::{
    is_valid_email, is_valid_future_date, is_valid_future_date_with, is_valid_url,
    parse_event_instant, ValidationContext, MAX_MONTHS_AHEAD,
};
pub use sanitize::{sanitize, sanitize_draft, sanitize_tag, SanitizationWarning, SanitizedDraft};
pub use tags::{process_tags, process_tags_report, TagAddError, TagList, TagReport, MAX_TAGS};
