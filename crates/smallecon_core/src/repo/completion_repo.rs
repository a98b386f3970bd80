//! Persisted task completion set.

use super::RepoResult;
use crate::model::task::TaskId;
use crate::repo::RepoError;
use rusqlite::{params, Connection};

/// Storage contract for completed task ids.
pub trait CompletionRepository {
    /// Returns `true` when the id was newly recorded.
    fn mark_completed(&self, id: &TaskId) -> RepoResult<bool>;
    /// Returns `true` when the id was present.
    fn clear_completed(&self, id: &TaskId) -> RepoResult<bool>;
    /// Completed ids sorted ascending.
    fn list_completed(&self) -> RepoResult<Vec<TaskId>>;
    /// Replaces the whole set.
    fn replace_completed(&self, ids: &[TaskId]) -> RepoResult<()>;
}

pub struct SqliteCompletionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCompletionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CompletionRepository for SqliteCompletionRepository<'_> {
    fn mark_completed(&self, id: &TaskId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO completed_tasks (task_id) VALUES (?1);",
            params![id.as_str()],
        )?;
        Ok(changed > 0)
    }

    fn clear_completed(&self, id: &TaskId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM completed_tasks WHERE task_id = ?1;",
            params![id.as_str()],
        )?;
        Ok(changed > 0)
    }

    fn list_completed(&self) -> RepoResult<Vec<TaskId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT task_id FROM completed_tasks ORDER BY task_id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            let raw: String = row.get(0)?;
            let id = TaskId::parse(&raw).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid task id `{raw}` in completed_tasks.task_id"
                ))
            })?;
            ids.push(id);
        }
        Ok(ids)
    }

    fn replace_completed(&self, ids: &[TaskId]) -> RepoResult<()> {
        self.conn.execute("DELETE FROM completed_tasks;", [])?;
        for id in ids {
            self.mark_completed(id)?;
        }
        Ok(())
    }
}
