//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{CalendarDate, DomainError, Task};

/// Selection for task listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    /// Every task, nearest date first.
    All,
    /// Tasks whose title or comment contains the text.
    Text(String),
    /// Tasks scheduled on exactly this date.
    Date(CalendarDate),
}

/// Task storage. One row per task; ids are assigned by the store.
#[async_trait::async_trait]
pub trait TaskRepoPort: Send + Sync {
    /// Insert a new task (its `id` is ignored). Returns the assigned id.
    async fn insert(&self, task: &Task) -> Result<i64, DomainError>;

    /// Fetch one task. `DomainError::NotFound` if the id does not exist.
    async fn get(&self, id: i64) -> Result<Task, DomainError>;

    /// List tasks matching `filter`, ordered by date, at most `limit` rows.
    async fn list(&self, filter: &TaskFilter, limit: u32) -> Result<Vec<Task>, DomainError>;

    /// Overwrite every field of an existing task. `NotFound` if no row matched.
    async fn update(&self, id: i64, task: &Task) -> Result<(), DomainError>;

    /// Move a task to a new date. `NotFound` if no row matched.
    async fn update_date(&self, id: i64, date: &str) -> Result<(), DomainError>;

    /// Delete a task. `NotFound` if no row matched.
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}

/// Source of "today". Injected so use cases stay deterministic under test.
pub trait ClockPort: Send + Sync {
    fn today(&self) -> CalendarDate;
}
