//! SQLite-backed task store via libsql. Implements TaskRepoPort.
//!
//! Single `scheduler` table; `date` is the 8-char `YYYYMMDD` string so
//! lexical order equals calendar order and the date index serves listing.

use crate::domain::{DomainError, Task};
use crate::ports::{TaskFilter, TaskRepoPort};
use libsql::{Database, Row, params};
use std::path::Path;
use tracing::{debug, info};

const SCHEDULER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS scheduler (
    id INTEGER PRIMARY KEY,
    date CHAR(8) NOT NULL DEFAULT '',
    title TEXT NOT NULL DEFAULT '',
    comment TEXT NOT NULL DEFAULT '',
    repeat VARCHAR(128) NOT NULL DEFAULT ''
)"#;
const SCHEDULER_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS scheduler_date ON scheduler (date)";

const SELECT_COLUMNS: &str = "SELECT id, date, title, comment, repeat FROM scheduler";

fn repo_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::Repo(e.to_string())
}

/// `%text%` LIKE pattern with `%`, `_` and `\` in `text` matched literally
/// (paired with `ESCAPE '\'`).
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// SQLite repository. One database file holding the `scheduler` table.
pub struct SqliteRepo {
    db: Database,
}

impl SqliteRepo {
    /// Open (or create) the database file and ensure the schema exists.
    /// Call this once at startup; the returned repo is safe to share via Arc.
    pub async fn connect(db_path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(repo_err)?;
        }
        let existed = db_path.exists();
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(repo_err)?;
        let conn = db.connect().map_err(repo_err)?;

        // PRAGMA returns a row (new value); use query and consume rows (execute fails when rows are returned).
        let mut wal_rows = conn
            .query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| DomainError::Repo(format!("WAL pragma failed: {}", e)))?;
        while wal_rows.next().await.map_err(repo_err)?.is_some() {}

        conn.execute(SCHEDULER_TABLE, ()).await.map_err(repo_err)?;
        conn.execute(SCHEDULER_DATE_INDEX, ())
            .await
            .map_err(repo_err)?;

        info!(
            path = %db_path.display(),
            created = !existed,
            "SQLite task store ready"
        );

        Ok(Self { db })
    }

    fn connection(&self) -> Result<libsql::Connection, DomainError> {
        self.db.connect().map_err(repo_err)
    }

    fn row_to_task(row: &Row) -> Result<Task, DomainError> {
        let id: i64 = row.get(0).map_err(repo_err)?;
        Ok(Task {
            id: id.to_string(),
            date: row.get(1).map_err(repo_err)?,
            title: row.get(2).map_err(repo_err)?,
            comment: row.get::<String>(3).unwrap_or_default(),
            repeat: row.get::<String>(4).unwrap_or_default(),
        })
    }

    fn expect_one(affected: u64, id: i64) -> Result<(), DomainError> {
        if affected == 0 {
            return Err(DomainError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TaskRepoPort for SqliteRepo {
    async fn insert(&self, task: &Task) -> Result<i64, DomainError> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO scheduler (date, title, comment, repeat) VALUES (?1, ?2, ?3, ?4)",
            params![
                task.date.as_str(),
                task.title.as_str(),
                task.comment.as_str(),
                task.repeat.as_str()
            ],
        )
        .await
        .map_err(repo_err)?;
        let id = conn.last_insert_rowid();
        debug!(id, date = %task.date, "inserted task");
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Task, DomainError> {
        let conn = self.connection()?;
        let mut rows = conn
            .query(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![id])
            .await
            .map_err(repo_err)?;
        match rows.next().await.map_err(repo_err)? {
            Some(row) => Self::row_to_task(&row),
            None => Err(DomainError::NotFound(id.to_string())),
        }
    }

    async fn list(&self, filter: &TaskFilter, limit: u32) -> Result<Vec<Task>, DomainError> {
        let conn = self.connection()?;
        let limit = i64::from(limit);
        let mut rows = match filter {
            TaskFilter::All => {
                conn.query(
                    &format!("{SELECT_COLUMNS} ORDER BY date, id LIMIT ?1"),
                    params![limit],
                )
                .await
            }
            TaskFilter::Text(text) => {
                let pattern = contains_pattern(text);
                conn.query(
                    &format!(
                        "{SELECT_COLUMNS} WHERE title LIKE ?1 ESCAPE '\\' OR comment LIKE ?1 ESCAPE '\\' ORDER BY date, id LIMIT ?2"
                    ),
                    params![pattern, limit],
                )
                .await
            }
            TaskFilter::Date(date) => {
                conn.query(
                    &format!("{SELECT_COLUMNS} WHERE date = ?1 ORDER BY id LIMIT ?2"),
                    params![date.to_string(), limit],
                )
                .await
            }
        }
        .map_err(repo_err)?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            tasks.push(Self::row_to_task(&row)?);
        }
        Ok(tasks)
    }

    async fn update(&self, id: i64, task: &Task) -> Result<(), DomainError> {
        let conn = self.connection()?;
        let affected = conn
            .execute(
                "UPDATE scheduler SET date = ?1, title = ?2, comment = ?3, repeat = ?4 WHERE id = ?5",
                params![
                    task.date.as_str(),
                    task.title.as_str(),
                    task.comment.as_str(),
                    task.repeat.as_str(),
                    id
                ],
            )
            .await
            .map_err(repo_err)?;
        Self::expect_one(affected, id)
    }

    async fn update_date(&self, id: i64, date: &str) -> Result<(), DomainError> {
        let conn = self.connection()?;
        let affected = conn
            .execute(
                "UPDATE scheduler SET date = ?1 WHERE id = ?2",
                params![date, id],
            )
            .await
            .map_err(repo_err)?;
        Self::expect_one(affected, id)
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let conn = self.connection()?;
        let affected = conn
            .execute("DELETE FROM scheduler WHERE id = ?1", params![id])
            .await
            .map_err(repo_err)?;
        Self::expect_one(affected, id)
    }
}
