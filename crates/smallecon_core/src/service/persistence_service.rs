//! Async save/load of the store's persistable state.
//!
//! # Responsibility
//! - Write and read `StoreSnapshot`s through the SQLite repositories.
//! - Run blocking SQL on the tokio blocking pool so callers can await it.
//! - Drive the store's `SaveState` around each save.
//!
//! # Invariants
//! - A snapshot is written in one transaction; readers never see half a save.
//! - The connection is only touched while its mutex is held.

use crate::db::{open_location, DbError, DbLocation};
use crate::repo::completion_repo::{CompletionRepository, SqliteCompletionRepository};
use crate::repo::event_repo::{EventRepository, SqliteEventRepository};
use crate::repo::expense_repo::{ExpenseListQuery, ExpenseRepository, SqliteExpenseRepository};
use crate::repo::RepoError;
use crate::store::{Store, StoreError, StoreSnapshot};
use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};
use std::time::Instant;

#[derive(Debug)]
pub enum PersistError {
    Db(DbError),
    Repo(RepoError),
    Store(StoreError),
    /// A previous holder of the connection panicked.
    ConnectionPoisoned,
    /// The blocking task was cancelled or panicked.
    TaskJoin(String),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::ConnectionPoisoned => write!(f, "database connection lock poisoned"),
            Self::TaskJoin(message) => write!(f, "persistence task failed: {message}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::ConnectionPoisoned | Self::TaskJoin(_) => None,
        }
    }
}

impl From<DbError> for PersistError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for PersistError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<StoreError> for PersistError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Shared handle to one migrated SQLite connection.
#[derive(Clone)]
pub struct PersistenceService {
    conn: Arc<Mutex<Connection>>,
}

impl PersistenceService {
    /// Opens (and migrates) the database at `location`.
    pub fn open(location: &DbLocation) -> Result<Self, PersistError> {
        Ok(Self::from_connection(open_location(location)?))
    }

    /// Wraps an already-migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Saves the store and records the outcome in its `SaveState`.
    ///
    /// Returns the revision that was written.
    pub async fn save(&self, store: &mut Store) -> Result<u64, PersistError> {
        let snapshot = store.begin_save();
        let revision = snapshot.revision;
        match self.write_snapshot(snapshot).await {
            Ok(()) => {
                store.finish_save(revision, Ok(()));
                Ok(revision)
            }
            Err(err) => {
                store.finish_save(revision, Err(err.to_string()));
                Err(err)
            }
        }
    }

    /// Replaces all persisted rows with `snapshot`.
    pub async fn write_snapshot(&self, snapshot: StoreSnapshot) -> Result<(), PersistError> {
        let conn = Arc::clone(&self.conn);
        let revision = snapshot.revision;
        let started_at = Instant::now();

        let result = tokio::task::spawn_blocking(move || -> Result<(), PersistError> {
            let mut guard = conn.lock().map_err(|_| PersistError::ConnectionPoisoned)?;
            let tx = guard.transaction()?;
            SqliteCompletionRepository::new(&tx).replace_completed(&snapshot.completed_task_ids)?;
            SqliteEventRepository::new(&tx).replace_events(&snapshot.events)?;
            SqliteExpenseRepository::new(&tx).replace_expenses(&snapshot.expenses)?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(|err| PersistError::TaskJoin(err.to_string()))
        .and_then(|inner| inner);

        match &result {
            Ok(()) => info!(
                "event=store_save module=persistence status=ok revision={} duration_ms={}",
                revision,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_save module=persistence status=error revision={} duration_ms={} error={}",
                revision,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    /// Reads the persisted snapshot. `revision` is always 0 on load.
    pub async fn load(&self) -> Result<StoreSnapshot, PersistError> {
        let conn = Arc::clone(&self.conn);
        let started_at = Instant::now();

        let result = tokio::task::spawn_blocking(move || -> Result<StoreSnapshot, PersistError> {
            let guard = conn.lock().map_err(|_| PersistError::ConnectionPoisoned)?;
            Ok(StoreSnapshot {
                revision: 0,
                completed_task_ids: SqliteCompletionRepository::new(&guard).list_completed()?,
                events: SqliteEventRepository::new(&guard).list_events()?,
                expenses: SqliteExpenseRepository::new(&guard)
                    .list_expenses(&ExpenseListQuery::default())?,
            })
        })
        .await
        .map_err(|err| PersistError::TaskJoin(err.to_string()))
        .and_then(|inner| inner);

        match &result {
            Ok(snapshot) => info!(
                "event=store_load module=persistence status=ok completed={} events={} expenses={} duration_ms={}",
                snapshot.completed_task_ids.len(),
                snapshot.events.len(),
                snapshot.expenses.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_load module=persistence status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    /// Loads the persisted snapshot into `store`.
    pub async fn load_into(&self, store: &mut Store) -> Result<(), PersistError> {
        let snapshot = self.load().await?;
        store.restore(snapshot)?;
        Ok(())
    }
}
