//! User notifications
//!
//! Content for the toast shown after a submission or a failed feed load. Only
//! client-safe text ends up here; presentation is left to the caller.

use codemeet_core::{AppError, ErrorMetadata, EventRecord, SanitizationWarning};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Success,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    /// Confirmation for a stored event. Sanitization warnings are appended so the
    /// user knows some input was dropped.
    pub fn event_created(event: &EventRecord, warnings: &[SanitizationWarning]) -> Self {
        let mut description = format!("\"{}\" was published on the platform.", event.title);
        for warning in warnings {
            description.push(' ');
            description.push_str(&warning.to_string());
            description.push('.');
        }
        Self::success("Event created!", description)
    }

    pub fn from_error(err: &AppError) -> Self {
        let title = match err {
            AppError::Validation { .. } => "Check the event details",
            AppError::AuthenticationRequired => "Sign in required",
            AppError::SubmissionInProgress => "Submission in progress",
            AppError::Backend(_) => "Could not create event",
            AppError::Fetch(_) => "Could not load events",
            _ => "Something went wrong",
        };
        Self::destructive(title, err.client_message())
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use codemeet_core::BackendError;
    use uuid::Uuid;

    fn record(title: &str) -> EventRecord {
        EventRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            date: Utc::now(),
            location: "São Paulo".to_string(),
            max_attendees: None,
            organizer_name: "Ana".to_string(),
            organizer_email: None,
            image_url: None,
            tags: None,
            user_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_event_created() {
        let notification = Notification::event_created(&record("Rust Meetup"), &[]);
        assert_eq!(notification.title, "Event created!");
        assert_eq!(
            notification.description,
            "\"Rust Meetup\" was published on the platform."
        );
        assert!(!notification.is_destructive());
    }

    #[test]
    fn test_event_created_mentions_warnings() {
        let warnings = [SanitizationWarning::TagsRejected {
            tags: vec!["<>".to_string()],
        }];
        let notification = Notification::event_created(&record("Rust Meetup"), &warnings);
        assert!(notification
            .description
            .ends_with("1 tag(s) removed because they contained only unsafe content."));
    }

    #[test]
    fn test_backend_error_hides_raw_message() {
        let err = AppError::Backend(BackendError::new(
            Some("23505".to_string()),
            "duplicate key value violates unique constraint \"events_title_key\"",
        ));
        let notification = Notification::from_error(&err);
        assert_eq!(notification.title, "Could not create event");
        assert_eq!(
            notification.description,
            "An event with these details already exists."
        );
        assert!(!notification.description.contains("events_title_key"));
        assert!(notification.is_destructive());
    }

    #[test]
    fn test_validation_error_lists_messages() {
        let err = AppError::Validation {
            errors: vec!["Title is required".to_string(), "Time is required".to_string()],
            warnings: vec![],
        };
        let notification = Notification::from_error(&err);
        assert_eq!(notification.description, "Title is required\nTime is required");
    }

    #[test]
    fn test_serializes_variant_lowercase() {
        let json = serde_json::to_value(Notification::destructive("a", "b")).unwrap();
        assert_eq!(json["variant"], "destructive");
    }
}
