//! Tag processing
//!
//! Tags are sanitized, emptied tags are dropped, duplicates are removed keeping the
//! first occurrence, and the list is capped at [`MAX_TAGS`]. Two tags are duplicates
//! when their sanitized values match ignoring case; the first spelling wins.

use std::collections::HashSet;

use serde::Serialize;

use super::sanitize::sanitize_tag;

/// Maximum number of tags on an event
pub const MAX_TAGS: usize = 10;

fn dedup_key(tag: &str) -> String {
    tag.to_lowercase()
}

/// Outcome of processing a raw tag list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagReport {
    /// Tags kept, in input order
    pub tags: Vec<String>,
    /// Raw inputs that were empty after sanitization
    pub rejected: Vec<String>,
    /// Number of tags dropped as duplicates
    pub duplicates: usize,
    /// Number of tags dropped past the limit
    pub truncated: usize,
}

impl TagReport {
    /// True when some input tag did not survive sanitization
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Sanitize, de-duplicate and cap a raw tag list, reporting what was dropped.
pub fn process_tags_report<S: AsRef<str>>(raw: &[S]) -> TagReport {
    let mut report = TagReport::default();
    let mut seen = HashSet::new();

    for input in raw {
        let input = input.as_ref();
        let tag = sanitize_tag(input);
        if tag.is_empty() {
            report.rejected.push(input.to_string());
            continue;
        }
        if !seen.insert(dedup_key(&tag)) {
            report.duplicates += 1;
            continue;
        }
        if report.tags.len() == MAX_TAGS {
            report.truncated += 1;
            continue;
        }
        report.tags.push(tag);
    }

    report
}

/// Sanitize, de-duplicate and cap a raw tag list.
pub fn process_tags<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    process_tags_report(raw).tags
}

/// Why a tag could not be added to a [`TagList`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagAddError {
    #[error("Tag is empty")]
    Empty,
    #[error("Tag '{0}' has already been added")]
    Duplicate(String),
    #[error("An event can have at most {max} tags", max = MAX_TAGS)]
    LimitReached,
}

/// Tags being edited on the event form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagList {
    tags: Vec<String>,
}

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw tags with the same rules as [`process_tags`]
    pub fn from_tags<S: AsRef<str>>(raw: &[S]) -> Self {
        Self {
            tags: process_tags(raw),
        }
    }

    /// Sanitize and append a tag, returning the stored value.
    pub fn add(&mut self, raw: &str) -> Result<&str, TagAddError> {
        let tag = sanitize_tag(raw);
        if tag.is_empty() {
            return Err(TagAddError::Empty);
        }

        let key = dedup_key(&tag);
        if let Some(existing) = self.tags.iter().find(|t| dedup_key(t) == key) {
            return Err(TagAddError::Duplicate(existing.clone()));
        }
        if self.tags.len() >= MAX_TAGS {
            return Err(TagAddError::LimitReached);
        }

        self.tags.push(tag);
        Ok(self.tags.last().map(String::as_str).unwrap_or_default())
    }

    /// Remove a tag by exact value. Returns whether it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tags.len() >= MAX_TAGS
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_tags_dedups_after_sanitization() {
        let tags = process_tags(&["React", "react", "  React  ", "<b>JS</b>", "JS"]);
        assert_eq!(tags, vec!["React", "JS"]);
    }

    #[test]
    fn test_process_tags_caps_at_limit() {
        let raw: Vec<String> = (1..=12).map(|i| format!("tag{i}")).collect();
        let report = process_tags_report(&raw);
        assert_eq!(report.tags.len(), MAX_TAGS);
        assert_eq!(report.tags, raw[..MAX_TAGS].to_vec());
        assert_eq!(report.truncated, 2);
        assert!(!report.has_rejections());
    }

    #[test]
    fn test_duplicates_do_not_count_toward_limit() {
        let mut raw: Vec<String> = vec!["Rust".to_string(); 5];
        raw.extend((1..=10).map(|i| format!("t{i}")));
        let report = process_tags_report(&raw);
        assert_eq!(report.tags.len(), MAX_TAGS);
        assert_eq!(report.tags[0], "Rust");
        assert_eq!(report.duplicates, 4);
        assert_eq!(report.truncated, 1);
    }

    #[test]
    fn test_process_tags_report_rejections() {
        let report = process_tags_report(&["Rust", "<>", "   ", "javascript:"]);
        assert_eq!(report.tags, vec!["Rust"]);
        assert_eq!(report.rejected, vec!["<>", "   ", "javascript:"]);
        assert!(report.has_rejections());
    }

    #[test]
    fn test_process_tags_empty_input() {
        let raw: [&str; 0] = [];
        assert!(process_tags(&raw).is_empty());
        assert!(!process_tags_report(&raw).has_rejections());
    }

    #[test]
    fn test_tag_list_add() {
        let mut list = TagList::new();
        assert_eq!(list.add("  <b>Rust</b> "), Ok("Rust"));
        assert_eq!(list.add("rust"), Err(TagAddError::Duplicate("Rust".to_string())));
        assert_eq!(list.add("<>"), Err(TagAddError::Empty));
        assert_eq!(list.add(""), Err(TagAddError::Empty));
        assert_eq!(list.as_slice(), ["Rust"]);
    }

    #[test]
    fn test_tag_list_limit() {
        let mut list = TagList::new();
        for i in 0..MAX_TAGS {
            assert!(list.add(&format!("tag{i}")).is_ok());
        }
        assert!(list.is_full());
        assert_eq!(list.add("one-more"), Err(TagAddError::LimitReached));
        assert_eq!(list.len(), MAX_TAGS);
    }

    #[test]
    fn test_tag_list_remove() {
        let mut list = TagList::from_tags(&["Rust", "Go", "go"]);
        assert_eq!(list.as_slice(), ["Rust", "Go"]);
        assert!(list.remove("Go"));
        assert!(!list.remove("Go"));
        assert_eq!(list.into_vec(), vec!["Rust"]);
    }

    #[test]
    fn test_tag_add_error_messages() {
        assert_eq!(
            TagAddError::LimitReached.to_string(),
            "An event can have at most 10 tags"
        );
    }
}
