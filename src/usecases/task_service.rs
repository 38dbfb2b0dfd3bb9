//! Task use cases: create/update (with date normalization), listing with
//! search, mark done (advance or delete), delete.
//!
//! The recurrence rules themselves live in `domain::schedule`; this service
//! only supplies "today" and moves tasks in and out of storage.

use crate::domain::schedule::{self, CalendarDate};
use crate::domain::{DomainError, Task};
use crate::ports::{ClockPort, TaskFilter, TaskRepoPort};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

/// Date format accepted by the search box.
const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

/// What happened to a task marked as done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoneOutcome {
    /// Non-recurring task was removed.
    Deleted,
    /// Recurring task moved to its next date.
    Rescheduled(String),
}

pub struct TaskService {
    repo: Arc<dyn TaskRepoPort>,
    clock: Arc<dyn ClockPort>,
    list_limit: u32,
}

impl TaskService {
    pub fn new(repo: Arc<dyn TaskRepoPort>, clock: Arc<dyn ClockPort>, list_limit: u32) -> Self {
        Self {
            repo,
            clock,
            list_limit,
        }
    }

    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    /// Validate, normalize the date, and store a new task. Returns its id.
    pub async fn create(&self, mut task: Task) -> Result<String, DomainError> {
        schedule::normalize(&mut task, self.today())?;
        let id = self.repo.insert(&task).await?;
        info!(id, date = %task.date, repeat = %task.repeat, "created task");
        Ok(id.to_string())
    }

    pub async fn get(&self, id: &str) -> Result<Task, DomainError> {
        self.repo.get(parse_id(id)?).await
    }

    /// List tasks. `search` may be empty (all), a `dd.mm.yyyy` date, or text
    /// matched against title and comment.
    pub async fn list(&self, search: &str) -> Result<Vec<Task>, DomainError> {
        let filter = parse_search(search);
        self.repo.list(&filter, self.list_limit).await
    }

    /// Replace an existing task after the same normalization as `create`.
    pub async fn update(&self, mut task: Task) -> Result<(), DomainError> {
        let id = parse_id(&task.id)?;
        schedule::normalize(&mut task, self.today())?;
        self.repo.update(id, &task).await?;
        info!(id, date = %task.date, "updated task");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let id = parse_id(id)?;
        self.repo.delete(id).await?;
        info!(id, "deleted task");
        Ok(())
    }

    /// Complete a task: recurring tasks move to their next date from today,
    /// the rest are deleted.
    pub async fn mark_done(&self, id: &str) -> Result<DoneOutcome, DomainError> {
        let id = parse_id(id)?;
        let task = self.repo.get(id).await?;
        if !task.is_recurring() {
            self.repo.delete(id).await?;
            info!(id, "completed one-off task");
            return Ok(DoneOutcome::Deleted);
        }
        let next = schedule::next_date(self.today(), &task.date, &task.repeat)?;
        self.repo.update_date(id, &next).await?;
        info!(id, from = %task.date, to = %next, repeat = %task.repeat, "rescheduled task");
        Ok(DoneOutcome::Rescheduled(next))
    }
}

fn parse_id(id: &str) -> Result<i64, DomainError> {
    id.parse::<i64>()
        .map_err(|_| DomainError::InvalidId(id.to_owned()))
}

fn parse_search(search: &str) -> TaskFilter {
    let search = search.trim();
    if search.is_empty() {
        return TaskFilter::All;
    }
    match NaiveDate::parse_from_str(search, SEARCH_DATE_FORMAT)
        .ok()
        .and_then(|d| CalendarDate::try_from(d).ok())
    {
        Some(date) => TaskFilter::Date(date),
        None => TaskFilter::Text(search.to_owned()),
    }
}
