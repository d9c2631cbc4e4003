//! Event feed loader
//!
//! Loads the list of upcoming events for the index page. A failed query never
//! reaches the caller as an error: the feed is shown empty with a notification.

use std::sync::Arc;

use codemeet_core::{AppError, EventRecord, EventStore};
use serde::Serialize;

use crate::notification::Notification;

/// Result of one feed load
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedState {
    pub events: Vec<EventRecord>,
    /// Set when the load failed
    pub notification: Option<Notification>,
}

impl FeedState {
    pub fn count(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn failed(&self) -> bool {
        self.notification.is_some()
    }
}

pub struct EventFeed {
    store: Arc<dyn EventStore>,
}

impl EventFeed {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// All events ascending by date, or an empty feed plus a notification.
    pub async fn load(&self) -> FeedState {
        match self.store.list_events().await {
            Ok(events) => {
                tracing::debug!(count = events.len(), "Loaded event feed");
                FeedState {
                    events,
                    notification: None,
                }
            }
            Err(err) => {
                tracing::warn!(
                    code = ?err.code,
                    status = ?err.status,
                    error = %err,
                    "Failed to load event feed"
                );
                FeedState {
                    events: Vec::new(),
                    notification: Some(Notification::from_error(&AppError::Fetch(err))),
                }
            }
        }
    }
}
