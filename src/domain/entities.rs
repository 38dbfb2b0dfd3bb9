//! Domain entities. Pure data structures for the core business.
//!
//! No storage/HTTP types here; these are mapped from adapters.

use serde::{Deserialize, Serialize};

/// A dated task, optionally recurring.
///
/// `date` and `repeat` are kept in their wire form (`YYYYMMDD` and raw rule
/// text); the schedule module parses them on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    /// Row id as a string. Empty for tasks not yet persisted.
    pub id: String,
    pub date: String,
    pub title: String,
    pub comment: String,
    /// Raw recurrence rule. Empty = the task does not recur.
    pub repeat: String,
}

impl Task {
    pub fn is_recurring(&self) -> bool {
        !self.repeat.is_empty()
    }
}
