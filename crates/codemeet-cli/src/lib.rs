use std::path::Path;

use chrono_tz::Tz;
use codemeet_core::validation::validate_event_draft_with;
use codemeet_core::{
    sanitize_draft, AppError, Config, EventDraft, EventRecord, SanitizationWarning,
    ValidationContext,
};
use serde::Serialize;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Read an event draft from a JSON file.
pub fn load_draft(path: &Path) -> Result<EventDraft, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::InvalidInput(format!("Failed to read draft {}: {}", path.display(), e))
    })?;
    EventDraft::from_json(&raw)
}

/// Load backend settings from `env_file`, or from the environment and `.env`.
pub fn load_config(env_file: Option<&Path>) -> Result<Config, AppError> {
    let config = match env_file {
        Some(path) => Config::from_env_file(path),
        None => Config::from_env(),
    };
    config.map_err(|e| AppError::Config(format!("{:#}", e)))
}

/// Offline sanitize + validate outcome printed by `codemeet validate`
#[derive(Debug, Serialize)]
pub struct DraftReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<SanitizationWarning>,
    /// Draft as it would be sent after sanitization
    pub sanitized: EventDraft,
}

pub fn check_draft(draft: &EventDraft, ctx: &ValidationContext) -> DraftReport {
    let sanitized = sanitize_draft(draft);
    let result = validate_event_draft_with(&sanitized.draft, ctx);
    DraftReport {
        is_valid: result.is_valid(),
        errors: result.into_errors(),
        warnings: sanitized.warnings,
        sanitized: sanitized.draft,
    }
}

/// Tags as shown on an event card: first few, then "+N"
pub fn format_tag_preview(event: &EventRecord) -> String {
    let (shown, hidden) = event.tag_preview();
    let mut preview = shown.join(", ");
    if hidden > 0 {
        preview.push_str(&format!(" +{}", hidden));
    }
    preview
}

/// Print the feed as a table, dates in `timezone`.
pub fn print_event_table(events: &[EventRecord], timezone: Tz) {
    println!("\n=== Events ===\n");
    println!("Total: {} events", events.len());

    if events.is_empty() {
        println!("\nNo events found.");
        return;
    }

    println!(
        "\n{:<17} {:<30} {:<24} {:<20} {:<18} {:<24}",
        "Date", "Title", "Location", "Organizer", "Attendees", "Tags"
    );
    println!("{}", "-".repeat(138));

    for event in events {
        println!(
            "{:<17} {:<30} {:<24} {:<20} {:<18} {:<24}",
            event.date.with_timezone(&timezone).format("%Y-%m-%d %H:%M"),
            truncate_string(&event.title, 30),
            truncate_string(&event.location, 24),
            truncate_string(&event.organizer_name, 20),
            event.attendee_label().unwrap_or_default(),
            truncate_string(&format_tag_preview(event), 24),
        );
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
