//! Field validators
//!
//! Pure predicates over single form fields. They are intentionally loose sanity
//! checks (the email check is not RFC 5322, the URL check does not contact the host).

use std::sync::LazyLock;

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;
use url::Url;

/// How far ahead an event may be scheduled (two years)
pub const MAX_MONTHS_AHEAD: u32 = 24;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

/// Reference point for time-dependent rules.
///
/// `now` is captured when validation starts; `timezone` is the zone in which
/// date/time inputs without an explicit offset are interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationContext {
    pub now: DateTime<Utc>,
    pub timezone: Tz,
}

impl ValidationContext {
    /// Context for the current instant in `timezone`
    pub fn current(timezone: Tz) -> Self {
        Self {
            now: Utc::now(),
            timezone,
        }
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Latest instant an event may be scheduled for
    pub fn latest_allowed(&self) -> Option<DateTime<Utc>> {
        self.now.checked_add_months(Months::new(MAX_MONTHS_AHEAD))
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::current(Tz::UTC)
    }
}

/// Check an email against `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Parse a date/time input into an instant.
///
/// Accepts RFC 3339 with an explicit offset, or `YYYY-MM-DDTHH:MM[:SS]` /
/// `YYYY-MM-DD` interpreted in `timezone`. Local times skipped by a DST transition
/// have no instant and yield `None`.
pub fn parse_event_instant(input: &str, timezone: Tz) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Some(instant.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    timezone
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// True iff the instant is strictly after `ctx.now` and no more than two years ahead.
pub fn is_valid_future_date_with(input: &str, ctx: &ValidationContext) -> bool {
    match (parse_event_instant(input, ctx.timezone), ctx.latest_allowed()) {
        (Some(instant), Some(latest)) => instant > ctx.now && instant <= latest,
        _ => false,
    }
}

/// [`is_valid_future_date_with`] against the current instant, in UTC.
pub fn is_valid_future_date(input: &str) -> bool {
    is_valid_future_date_with(input, &ValidationContext::default())
}

/// Empty is valid (the field is optional); otherwise an absolute `http`/`https` URL.
pub fn is_valid_url(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }

    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
