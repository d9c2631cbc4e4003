//! Data models for the application
//!
//! Drafts are what the form collects, [`NewEvent`] is the cleaned record handed to
//! the insert API and [`EventRecord`] is what the query API returns.

mod event;
mod identity;

// Re-export all models for convenient imports
pub use event::*;
pub use identity::*;
