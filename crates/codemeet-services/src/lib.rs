//! Code Meet Hub Services Layer
//!
//! This crate hosts the boundary code between the form and the hosted backend: the
//! authenticated submission orchestrator, the event feed loader, and the
//! notification content shown to the user for each outcome. It depends only on the
//! ports in `codemeet-core`, so any store or auth provider can be plugged in.

pub mod feed;
pub mod notification;
pub mod submission;

pub use feed::{EventFeed, FeedState};
pub use notification::{Notification, NotificationVariant};
pub use submission::{EventSubmitter, SubmissionReceipt};
