use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Number of tags shown on an event card before the rest collapse into "+N"
pub const CARD_TAG_PREVIEW: usize = 3;

/// Raw event form values, exactly as the user typed them.
///
/// Every field deserializes to empty when missing so a partially filled form can be
/// loaded and validated as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Wall-clock time, `HH:MM`
    pub time: String,
    pub location: String,
    /// Numeric string; JSON numbers are accepted too
    #[serde(deserialize_with = "deserialize_numeric_string")]
    pub max_attendees: Option<String>,
    pub organizer_name: String,
    pub organizer_email: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
}

impl EventDraft {
    /// Parse a draft from its JSON form. Malformed JSON is an [`AppError::InvalidInput`].
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }
}

fn deserialize_numeric_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

/// Cleaned event ready for the insert API.
///
/// Empty optional fields are sent as `null` rather than empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub location: String,
    pub max_attendees: Option<i32>,
    pub organizer_name: String,
    pub organizer_email: String,
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Stable ID of the authenticated identity that owns the event
    pub user_id: Uuid,
}

/// Stored event as returned by the query API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub location: String,
    #[serde(default)]
    pub max_attendees: Option<i32>,
    pub organizer_name: String,
    #[serde(default)]
    pub organizer_email: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl EventRecord {
    /// Tags to show on a card and how many were left out.
    pub fn tag_preview(&self) -> (&[String], usize) {
        let tags = self.tags.as_deref().unwrap_or_default();
        let shown = tags.len().min(CARD_TAG_PREVIEW);
        (&tags[..shown], tags.len() - shown)
    }

    pub fn attendee_label(&self) -> Option<String> {
        self.max_attendees
            .map(|max| format!("Max. {} attendees", max))
    }
}
