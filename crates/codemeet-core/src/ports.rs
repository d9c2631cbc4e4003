//! Ports for external collaborators
//!
//! The hosted data store and the authentication provider live outside this
//! workspace. The submission pipeline only talks to them through these traits.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::{EventRecord, Identity, NewEvent};

/// Insert and query API of the hosted data store
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Insert one event and return the stored row.
    async fn insert_event(&self, event: &NewEvent) -> Result<EventRecord, BackendError>;

    /// All events, ascending by date.
    async fn list_events(&self) -> Result<Vec<EventRecord>, BackendError>;
}

/// Current session as seen by the authentication provider
pub trait AuthContext: Send + Sync {
    fn current_identity(&self) -> Option<Identity>;

    /// True while the provider is still restoring the session
    fn is_loading(&self) -> bool {
        false
    }
}

/// Fixed session, for command-line use and tests
#[derive(Debug, Clone, Default)]
pub struct StaticAuthContext {
    identity: Option<Identity>,
}

impl StaticAuthContext {
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl AuthContext for StaticAuthContext {
    fn current_identity(&self) -> Option<Identity> {
        self.identity.clone()
    }
}
