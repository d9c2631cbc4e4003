//! Input sanitization
//!
//! Strips characters and patterns that could enable script injection once a value is
//! rendered. This is a best-effort filter, not an HTML encoder: each pattern is
//! removed in a single pass and the result is not re-scanned, so crafted input that
//! nests fragments (`javajavascript:script:`) can reassemble a forbidden pattern.
//! Handlers are removed after the protocol, so a handler split inside a protocol
//! (`javaonx=script:`) rebuilds `javascript:` as well. For the same reason
//! `sanitize` is not idempotent on such input: `oonx=nx=` yields `onx=`, which a
//! second pass empties.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::tags::{process_tags_report, TagReport};
use crate::models::EventDraft;

static JAVASCRIPT_PROTOCOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("javascript protocol pattern"));

static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on\w+=").expect("event handler pattern"));

/// Opening or closing markup element such as `<b>` or `</span class="x">`
static MARKUP_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][^<>]*>").expect("markup element pattern"));

/// Remove angle brackets, `javascript:` and `on<word>=` patterns, then trim.
pub fn sanitize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let without_brackets: String = input.chars().filter(|c| !matches!(c, '<' | '>')).collect();
    let without_protocol = JAVASCRIPT_PROTOCOL.replace_all(&without_brackets, "");
    let without_handlers = EVENT_HANDLER.replace_all(&without_protocol, "");

    without_handlers.trim().to_string()
}

/// Sanitize a tag: markup elements are dropped whole (`<b>JS</b>` becomes `JS`)
/// before the regular sanitizer runs.
pub fn sanitize_tag(input: &str) -> String {
    sanitize(&MARKUP_ELEMENT.replace_all(input, ""))
}

/// Content that sanitization altered enough for the user to be told about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SanitizationWarning {
    /// A field had content but only unsafe content
    FieldEmptied { field: &'static str },
    /// Tags that became empty after sanitization, as typed
    TagsRejected { tags: Vec<String> },
}

impl Display for SanitizationWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SanitizationWarning::FieldEmptied { field } => {
                write!(f, "{} was emptied after removing unsafe content", field)
            }
            SanitizationWarning::TagsRejected { tags } => write!(
                f,
                "{} tag(s) removed because they contained only unsafe content",
                tags.len()
            ),
        }
    }
}

/// Draft after sanitization, plus what sanitization had to throw away
#[derive(Debug, Clone)]
pub struct SanitizedDraft {
    pub draft: EventDraft,
    pub tag_report: TagReport,
    pub warnings: Vec<SanitizationWarning>,
}

impl SanitizedDraft {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Optional values that are empty after cleaning become `None`
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Sanitize every field of a draft.
///
/// Free-text fields go through [`sanitize`], the email is trimmed and lower-cased,
/// the image URL and the date/time/attendee inputs are trimmed, and tags are
/// processed with [`process_tags_report`].
pub fn sanitize_draft(draft: &EventDraft) -> SanitizedDraft {
    let mut warnings = Vec::new();

    let mut clean_text = |field: &'static str, raw: &str| {
        let clean = sanitize(raw);
        if clean.is_empty() && !raw.trim().is_empty() {
            tracing::debug!(field, "Field emptied by sanitization");
            warnings.push(SanitizationWarning::FieldEmptied { field });
        }
        clean
    };

    let title = clean_text("title", &draft.title);
    let description = clean_text("description", draft.description.as_deref().unwrap_or_default());
    let location = clean_text("location", &draft.location);
    let organizer_name = clean_text("organizer_name", &draft.organizer_name);

    let tag_report = process_tags_report(&draft.tags);
    if tag_report.has_rejections() {
        tracing::debug!(
            rejected = tag_report.rejected.len(),
            "Tags rejected by sanitization"
        );
        warnings.push(SanitizationWarning::TagsRejected {
            tags: tag_report.rejected.clone(),
        });
    }

    let cleaned = EventDraft {
        title,
        description: non_empty(description),
        date: draft.date.trim().to_string(),
        time: draft.time.trim().to_string(),
        location,
        max_attendees: draft
            .max_attendees
            .as_deref()
            .map(str::trim)
            .map(str::to_string)
            .and_then(non_empty),
        organizer_name,
        organizer_email: draft.organizer_email.trim().to_lowercase(),
        image_url: draft
            .image_url
            .as_deref()
            .map(|url| url.trim().to_string())
            .and_then(non_empty),
        tags: tag_report.tags.clone(),
    };

    SanitizedDraft {
        draft: cleaned,
        tag_report,
        warnings,
    }
}
