//! Submission gate
//!
//! Busy flag that allows one in-flight submission at a time. Acquiring returns a
//! guard; the flag is cleared when the guard drops, on success, failure or panic.

use std::sync::atomic::{AtomicBool, Ordering};

/// Gate shared by every submission from one form.
#[derive(Debug, Default)]
pub struct SubmissionGate {
    busy: AtomicBool,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the gate busy. Returns `None` if a submission is already in flight.
    pub fn try_acquire(&self) -> Option<SubmissionGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionGuard { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Holds the gate busy until dropped
#[derive(Debug)]
pub struct SubmissionGuard<'a> {
    gate: &'a SubmissionGate,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
