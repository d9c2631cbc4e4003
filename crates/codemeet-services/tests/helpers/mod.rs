//! Test helpers: in-memory store and auth doubles plus draft fixtures.
//!
//! Run from workspace root: `cargo test -p codemeet-services`.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use chrono_tz::Tz;
use codemeet_core::{
    AuthContext, BackendError, EventDraft, EventRecord, EventStore, Identity, NewEvent,
    ValidationContext,
};
use tokio::sync::Notify;
use uuid::Uuid;

/// Store double that records inserts and returns canned results.
#[derive(Default)]
pub struct MockStore {
    inserted: Mutex<Vec<NewEvent>>,
    insert_error: Option<BackendError>,
    list_result: Option<Result<Vec<EventRecord>, BackendError>>,
    list_calls: AtomicUsize,
    /// (entered, release): the insert signals `entered` then waits for `release`
    hold: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_insert(error: BackendError) -> Self {
        Self {
            insert_error: Some(error),
            ..Self::default()
        }
    }

    pub fn with_events(events: Vec<EventRecord>) -> Self {
        Self {
            list_result: Some(Ok(events)),
            ..Self::default()
        }
    }

    pub fn failing_list(error: BackendError) -> Self {
        Self {
            list_result: Some(Err(error)),
            ..Self::default()
        }
    }

    /// Store whose insert blocks until `release` is notified.
    pub fn held(entered: Arc<Notify>, release: Arc<Notify>) -> Self {
        Self {
            hold: Some((entered, release)),
            ..Self::default()
        }
    }

    pub fn inserted(&self) -> Vec<NewEvent> {
        self.inserted.lock().unwrap().clone()
    }

    pub fn insert_count(&self) -> usize {
        self.inserted.lock().unwrap().len()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventStore for MockStore {
    async fn insert_event(&self, event: &NewEvent) -> Result<EventRecord, BackendError> {
        if let Some((entered, release)) = &self.hold {
            entered.notify_one();
            release.notified().await;
        }

        self.inserted.lock().unwrap().push(event.clone());

        match &self.insert_error {
            Some(err) => Err(err.clone()),
            None => Ok(record_from(event)),
        }
    }

    async fn list_events(&self) -> Result<Vec<EventRecord>, BackendError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list_result.clone().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Auth double that counts how often the session was read.
pub struct MockAuth {
    identity: Option<Identity>,
    loading: bool,
    reads: AtomicUsize,
}

impl MockAuth {
    pub fn signed_in() -> Self {
        Self {
            identity: Some(test_identity()),
            loading: false,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            identity: None,
            loading: false,
            reads: AtomicUsize::new(0),
        }
    }

    /// Session still being restored; the identity is already known but not usable yet
    pub fn loading() -> Self {
        Self {
            identity: Some(test_identity()),
            loading: true,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl AuthContext for MockAuth {
    fn current_identity(&self) -> Option<Identity> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.identity.clone()
    }

    fn is_loading(&self) -> bool {
        self.loading
    }
}

pub fn test_identity() -> Identity {
    Identity {
        id: Uuid::parse_str("0b6a1f0e-6a55-4f7e-9a3b-2f1d6c8e4a21").unwrap(),
        email: Some("ana@exemplo.com".to_string()),
        display_name: Some("Ana Souza".to_string()),
    }
}

/// Fixed "now" of 2030-06-15 12:00 UTC
pub fn fixed_context() -> ValidationContext {
    ValidationContext {
        now: Utc.with_ymd_and_hms(2030, 6, 15, 12, 0, 0).unwrap(),
        timezone: Tz::UTC,
    }
}

/// Valid draft relative to [`fixed_context`]
pub fn valid_draft() -> EventDraft {
    EventDraft {
        title: "Rust Meetup São Paulo".to_string(),
        description: Some("Talks about async Rust".to_string()),
        date: "2030-07-01".to_string(),
        time: "19:00".to_string(),
        location: "Av. Paulista, 1000 - São Paulo/SP".to_string(),
        max_attendees: Some("50".to_string()),
        organizer_name: "João Silva".to_string(),
        organizer_email: "joao@exemplo.com".to_string(),
        image_url: None,
        tags: vec!["Rust".to_string(), "Backend".to_string()],
    }
}

/// Valid draft one week from the real current date
pub fn draft_next_week() -> EventDraft {
    let date = (Utc::now() + Duration::days(7)).format("%Y-%m-%d").to_string();
    EventDraft {
        date,
        ..valid_draft()
    }
}

pub fn record_from(event: &NewEvent) -> EventRecord {
    EventRecord {
        id: Uuid::new_v4(),
        title: event.title.clone(),
        description: event.description.clone(),
        date: event.date,
        location: event.location.clone(),
        max_attendees: event.max_attendees,
        organizer_name: event.organizer_name.clone(),
        organizer_email: Some(event.organizer_email.clone()),
        image_url: event.image_url.clone(),
        tags: event.tags.clone(),
        user_id: Some(event.user_id),
        created_at: Some(Utc::now()),
    }
}

pub fn stored_event(title: &str, days_ahead: i64) -> EventRecord {
    EventRecord {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        date: Utc::now() + Duration::days(days_ahead),
        location: "São Paulo".to_string(),
        max_attendees: Some(40),
        organizer_name: "Ana".to_string(),
        organizer_email: None,
        image_url: None,
        tags: Some(vec!["Rust".to_string()]),
        user_id: None,
        created_at: None,
    }
}
