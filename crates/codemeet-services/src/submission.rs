//! Event submission orchestrator
//!
//! Coordinates the authentication check, sanitization, validation and the single
//! insert call for one event form.

use std::sync::Arc;

use chrono_tz::Tz;
use codemeet_core::validation::{parse_event_instant, validate_event_draft_with};
use codemeet_core::{
    sanitize_draft, AppError, AuthContext, ErrorMetadata, EventDraft, EventRecord, EventStore,
    Identity, LogLevel, NewEvent, SanitizationWarning, SubmissionGate, ValidationContext,
};
use serde::Serialize;

/// Successful submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    /// Row returned by the backend
    pub event: EventRecord,
    /// Content that sanitization dropped before the insert
    pub warnings: Vec<SanitizationWarning>,
}

/// Submits event drafts on behalf of the signed-in user.
///
/// One submitter backs one form: a second `submit` while an insert is still in
/// flight is rejected with [`AppError::SubmissionInProgress`].
pub struct EventSubmitter {
    store: Arc<dyn EventStore>,
    auth: Arc<dyn AuthContext>,
    gate: SubmissionGate,
    timezone: Tz,
}

impl EventSubmitter {
    pub fn new(store: Arc<dyn EventStore>, auth: Arc<dyn AuthContext>) -> Self {
        Self {
            store,
            auth,
            gate: SubmissionGate::new(),
            timezone: Tz::UTC,
        }
    }

    /// Zone in which the form's date and time are interpreted
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Submit a draft, validating against the current instant.
    pub async fn submit(&self, draft: &EventDraft) -> Result<SubmissionReceipt, AppError> {
        self.submit_with(draft, ValidationContext::current(self.timezone)).await
    }

    /// Submit a draft, validating against `ctx`.
    pub async fn submit_with(
        &self,
        draft: &EventDraft,
        ctx: ValidationContext,
    ) -> Result<SubmissionReceipt, AppError> {
        let result = self.run(draft, &ctx).await;
        if let Err(err) = &result {
            log_failure(err);
        }
        result
    }

    async fn run(
        &self,
        draft: &EventDraft,
        ctx: &ValidationContext,
    ) -> Result<SubmissionReceipt, AppError> {
        let identity = self.signed_in_identity()?;

        let _guard = self
            .gate
            .try_acquire()
            .ok_or(AppError::SubmissionInProgress)?;

        let sanitized = sanitize_draft(draft);
        let validation = validate_event_draft_with(&sanitized.draft, ctx);
        if !validation.is_valid() {
            return Err(AppError::Validation {
                errors: validation.into_errors(),
                warnings: sanitized.warnings,
            });
        }

        let new_event = build_new_event(&sanitized.draft, &identity, ctx.timezone)?;

        tracing::debug!(
            user_id = %identity.id,
            title = %new_event.title,
            date = %new_event.date,
            "Inserting event"
        );

        let event = self
            .store
            .insert_event(&new_event)
            .await
            .map_err(AppError::Backend)?;

        tracing::info!(
            event_id = %event.id,
            user_id = %identity.id,
            warnings = sanitized.warnings.len(),
            "Event created"
        );

        Ok(SubmissionReceipt {
            event,
            warnings: sanitized.warnings,
        })
    }

    fn signed_in_identity(&self) -> Result<Identity, AppError> {
        if self.auth.is_loading() {
            return Err(AppError::AuthenticationRequired);
        }
        self.auth
            .current_identity()
            .ok_or(AppError::AuthenticationRequired)
    }
}

/// Turn a sanitized, valid draft into the insert payload.
fn build_new_event(
    draft: &EventDraft,
    identity: &Identity,
    timezone: Tz,
) -> Result<NewEvent, AppError> {
    let time = if draft.time.is_empty() { "00:00" } else { &draft.time };
    let date = parse_event_instant(&format!("{}T{}", draft.date, time), timezone)
        .ok_or_else(|| {
            AppError::Internal(format!(
                "Validated date '{} {}' could not be resolved",
                draft.date, draft.time
            ))
        })?;

    let max_attendees = draft
        .max_attendees
        .as_deref()
        .map(|raw| {
            raw.parse::<i32>().map_err(|_| {
                AppError::Internal(format!("Validated max_attendees '{}' is not an integer", raw))
            })
        })
        .transpose()?;

    Ok(NewEvent {
        title: draft.title.clone(),
        description: draft.description.clone(),
        date,
        location: draft.location.clone(),
        max_attendees,
        organizer_name: draft.organizer_name.clone(),
        organizer_email: draft.organizer_email.clone(),
        image_url: draft.image_url.clone(),
        tags: (!draft.tags.is_empty()).then(|| draft.tags.clone()),
        user_id: identity.id,
    })
}

fn log_failure(err: &AppError) {
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(
            error_code = err.error_code(),
            error = %err,
            "Event submission rejected"
        ),
        LogLevel::Warn => tracing::warn!(
            error_code = err.error_code(),
            backend_kind = ?err.backend_kind(),
            error = %err.detailed_message(),
            "Event submission failed"
        ),
        LogLevel::Error => tracing::error!(
            error_code = err.error_code(),
            error = %err.detailed_message(),
            "Event submission failed"
        ),
    }
}
