// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, Utc};

/// The counter's only mutable state: the last incident and every incident before it.
///
/// Lives inside the counter task from activation until teardown.
#[derive(Debug, Clone)]
pub struct IncidentState {
    reference: DateTime<Utc>,

    // most-recent-first
    history: Vec<DateTime<Utc>>,
}

impl IncidentState {
    /// Starts with one synthetic history entry equal to `reference`.
    pub fn new(reference: DateTime<Utc>) -> Self {
        Self {
            reference,
            history: vec![reference],
        }
    }

    pub fn reference(&self) -> DateTime<Utc> {
        self.reference
    }

    pub fn history(&self) -> &[DateTime<Utc>] {
        &self.history
    }

    pub(crate) fn record_incident(&mut self, at: DateTime<Utc>) {
        self.reference = at;
        self.history.insert(0, at);
    }
}
