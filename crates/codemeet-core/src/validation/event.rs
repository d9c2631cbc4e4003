//! Event draft validation
//!
//! Every rule runs on every draft; the result lists all violations in a fixed field
//! order (title, date, time, location, organizer_name, organizer_email, description,
//! image_url, max_attendees) so the form can show every problem at once.

use serde::Serialize;

use super::fields::{is_valid_email, is_valid_future_date_with, is_valid_url, ValidationContext};
use crate::models::EventDraft;

/// Maximum title length (100 characters)
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum location length (200 characters)
pub const MAX_LOCATION_LENGTH: usize = 200;

/// Maximum organizer name length (100 characters)
pub const MAX_ORGANIZER_NAME_LENGTH: usize = 100;

/// Maximum description length (1000 characters)
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Largest accepted attendee cap
pub const MAX_ATTENDEES_LIMIT: i64 = 10_000;

/// Time assumed for the date check when the time field is empty
const DEFAULT_TIME: &str = "00:00";

/// A violated field rule. `Display` is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EventFieldError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title must be at most {max} characters", max = MAX_TITLE_LENGTH)]
    TitleTooLong,
    #[error("Date is required")]
    DateRequired,
    #[error("Date must be in the future and within 2 years")]
    DateOutOfRange,
    #[error("Time is required")]
    TimeRequired,
    #[error("Location is required")]
    LocationRequired,
    #[error("Location must be at most {max} characters", max = MAX_LOCATION_LENGTH)]
    LocationTooLong,
    #[error("Organizer name is required")]
    OrganizerNameRequired,
    #[error("Organizer name must be at most {max} characters", max = MAX_ORGANIZER_NAME_LENGTH)]
    OrganizerNameTooLong,
    #[error("Email is required")]
    EmailRequired,
    #[error("Email must have a valid format")]
    EmailInvalid,
    #[error("Description must be at most {max} characters", max = MAX_DESCRIPTION_LENGTH)]
    DescriptionTooLong,
    #[error("Image URL must be a valid http or https URL")]
    ImageUrlInvalid,
    #[error("Maximum attendees must be between 1 and {max}", max = MAX_ATTENDEES_LIMIT)]
    MaxAttendeesOutOfRange,
}

impl EventFieldError {
    /// Draft field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            EventFieldError::TitleRequired | EventFieldError::TitleTooLong => "title",
            EventFieldError::DateRequired | EventFieldError::DateOutOfRange => "date",
            EventFieldError::TimeRequired => "time",
            EventFieldError::LocationRequired | EventFieldError::LocationTooLong => "location",
            EventFieldError::OrganizerNameRequired | EventFieldError::OrganizerNameTooLong => {
                "organizer_name"
            }
            EventFieldError::EmailRequired | EventFieldError::EmailInvalid => "organizer_email",
            EventFieldError::DescriptionTooLong => "description",
            EventFieldError::ImageUrlInvalid => "image_url",
            EventFieldError::MaxAttendeesOutOfRange => "max_attendees",
        }
    }
}

/// Outcome of validating one draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
    #[serde(skip)]
    violations: Vec<EventFieldError>,
}

impl ValidationResult {
    fn from_violations(violations: Vec<EventFieldError>) -> Self {
        Self {
            is_valid: violations.is_empty(),
            errors: violations.iter().map(ToString::to_string).collect(),
            violations,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// User-facing messages, in field order
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn violations(&self) -> &[EventFieldError] {
        &self.violations
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

type Rule = fn(&EventDraft, &ValidationContext) -> Option<EventFieldError>;

/// Field rules in reporting order
const RULES: [Rule; 9] = [
    check_title,
    check_date,
    check_time,
    check_location,
    check_organizer_name,
    check_organizer_email,
    check_description,
    check_image_url,
    check_max_attendees,
];

fn required_with_max(
    value: &str,
    max: usize,
    required: EventFieldError,
    too_long: EventFieldError,
) -> Option<EventFieldError> {
    if value.trim().is_empty() {
        Some(required)
    } else if value.chars().count() > max {
        Some(too_long)
    } else {
        None
    }
}

fn check_title(draft: &EventDraft, _: &ValidationContext) -> Option<EventFieldError> {
    required_with_max(
        &draft.title,
        MAX_TITLE_LENGTH,
        EventFieldError::TitleRequired,
        EventFieldError::TitleTooLong,
    )
}

fn check_date(draft: &EventDraft, ctx: &ValidationContext) -> Option<EventFieldError> {
    let date = draft.date.trim();
    if date.is_empty() {
        return Some(EventFieldError::DateRequired);
    }

    let time = match draft.time.trim() {
        "" => DEFAULT_TIME,
        time => time,
    };
    let combined = format!("{}T{}", date, time);
    (!is_valid_future_date_with(&combined, ctx)).then_some(EventFieldError::DateOutOfRange)
}

fn check_time(draft: &EventDraft, _: &ValidationContext) -> Option<EventFieldError> {
    draft
        .time
        .trim()
        .is_empty()
        .then_some(EventFieldError::TimeRequired)
}

fn check_location(draft: &EventDraft, _: &ValidationContext) -> Option<EventFieldError> {
    required_with_max(
        &draft.location,
        MAX_LOCATION_LENGTH,
        EventFieldError::LocationRequired,
        EventFieldError::LocationTooLong,
    )
}

fn check_organizer_name(draft: &EventDraft, _: &ValidationContext) -> Option<EventFieldError> {
    required_with_max(
        &draft.organizer_name,
        MAX_ORGANIZER_NAME_LENGTH,
        EventFieldError::OrganizerNameRequired,
        EventFieldError::OrganizerNameTooLong,
    )
}

fn check_organizer_email(draft: &EventDraft, _: &ValidationContext) -> Option<EventFieldError> {
    if draft.organizer_email.trim().is_empty() {
        Some(EventFieldError::EmailRequired)
    } else if !is_valid_email(&draft.organizer_email) {
        Some(EventFieldError::EmailInvalid)
    } else {
        None
    }
}

fn check_description(draft: &EventDraft, _: &ValidationContext) -> Option<EventFieldError> {
    draft
        .description
        .as_deref()
        .filter(|description| description.chars().count() > MAX_DESCRIPTION_LENGTH)
        .map(|_| EventFieldError::DescriptionTooLong)
}

fn check_image_url(draft: &EventDraft, _: &ValidationContext) -> Option<EventFieldError> {
    draft
        .image_url
        .as_deref()
        .filter(|url| !is_valid_url(url))
        .map(|_| EventFieldError::ImageUrlInvalid)
}

fn check_max_attendees(draft: &EventDraft, _: &ValidationContext) -> Option<EventFieldError> {
    let raw = draft.max_attendees.as_deref().map(str::trim)?;
    if raw.is_empty() {
        return None;
    }

    match raw.parse::<i64>() {
        Ok(max) if (1..=MAX_ATTENDEES_LIMIT).contains(&max) => None,
        _ => Some(EventFieldError::MaxAttendeesOutOfRange),
    }
}

/// Validate a draft against an explicit reference instant and timezone.
pub fn validate_event_draft_with(draft: &EventDraft, ctx: &ValidationContext) -> ValidationResult {
    let violations: Vec<EventFieldError> =
        RULES.iter().filter_map(|rule| rule(draft, ctx)).collect();

    if !violations.is_empty() {
        tracing::debug!(
            count = violations.len(),
            fields = ?violations.iter().map(EventFieldError::field).collect::<Vec<_>>(),
            "Event draft failed validation"
        );
    }

    ValidationResult::from_violations(violations)
}

/// Validate a draft against the current instant, in UTC.
pub fn validate_event_draft(draft: &EventDraft) -> ValidationResult {
    validate_event_draft_with(draft, &ValidationContext::default())
}
