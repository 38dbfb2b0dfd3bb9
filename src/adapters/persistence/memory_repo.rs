//! In-memory TaskRepoPort. Same ordering and filtering rules as the SQLite
//! store; used by tests and by `TODO_DBFILE=:memory:` runs.

use crate::domain::{DomainError, Task};
use crate::ports::{TaskFilter, TaskRepoPort};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Rows {
    next_id: i64,
    tasks: BTreeMap<i64, Task>,
}

/// Volatile task store guarded by an async RwLock.
#[derive(Debug, Default)]
pub struct MemoryRepo {
    rows: RwLock<Rows>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(task: &Task, filter: &TaskFilter) -> bool {
        match filter {
            TaskFilter::All => true,
            // LIKE in SQLite is ASCII case-insensitive.
            TaskFilter::Text(text) => {
                let needle = text.to_ascii_lowercase();
                task.title.to_ascii_lowercase().contains(&needle)
                    || task.comment.to_ascii_lowercase().contains(&needle)
            }
            TaskFilter::Date(date) => task.date == date.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl TaskRepoPort for MemoryRepo {
    async fn insert(&self, task: &Task) -> Result<i64, DomainError> {
        let mut rows = self.rows.write().await;
        rows.next_id += 1;
        let id = rows.next_id;
        rows.tasks.insert(
            id,
            Task {
                id: id.to_string(),
                ..task.clone()
            },
        );
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Task, DomainError> {
        self.rows
            .read()
            .await
            .tasks
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(id.to_string()))
    }

    async fn list(&self, filter: &TaskFilter, limit: u32) -> Result<Vec<Task>, DomainError> {
        let rows = self.rows.read().await;
        let mut tasks: Vec<Task> = rows
            .tasks
            .values()
            .filter(|t| Self::matches(t, filter))
            .cloned()
            .collect();
        // BTreeMap yields id order; stable sort keeps it within a date.
        tasks.sort_by(|a, b| a.date.cmp(&b.date));
        tasks.truncate(limit as usize);
        Ok(tasks)
    }

    async fn update(&self, id: i64, task: &Task) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .tasks
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        *slot = Task {
            id: id.to_string(),
            ..task.clone()
        };
        Ok(())
    }

    async fn update_date(&self, id: i64, date: &str) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .tasks
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        slot.date = date.to_owned();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.rows
            .write()
            .await
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(id.to_string()))
    }
}
