//! SQLite-backed reminder data source.
//!
//! # Responsibility
//! - Run DAO calls on the designated background runtime.
//! - Translate DAO results and misses into `Outcome` values.
//!
//! # Invariants
//! - No caching: every call reads or writes the table.
//! - One connection, serialized behind a mutex.

use crate::dao::reminder_dao::{DaoResult, ReminderDao, SqliteReminderDao};
use crate::datasource::{Outcome, ReminderDataSource, REMINDER_NOT_FOUND};
use crate::model::reminder::Reminder;
use async_trait::async_trait;
use log::{debug, error};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;

/// Connection shared between the repository and its background tasks.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Reminder data source over the local SQLite table.
#[derive(Clone)]
pub struct RemindersLocalRepository {
    conn: SharedConnection,
    io: Handle,
}

impl RemindersLocalRepository {
    /// Creates a repository that runs its queries on `io`.
    pub fn new(conn: Connection, io: Handle) -> Self {
        Self::with_shared(Arc::new(Mutex::new(conn)), io)
    }

    pub fn with_shared(conn: SharedConnection, io: Handle) -> Self {
        Self { conn, io }
    }

    /// Returns the underlying connection handle.
    pub fn connection(&self) -> SharedConnection {
        Arc::clone(&self.conn)
    }

    async fn run<T, F>(&self, op: &'static str, f: F) -> Outcome<T>
    where
        T: Send + 'static,
        F: FnOnce(&SqliteReminderDao<'_>) -> DaoResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let joined = self
            .io
            .spawn_blocking(move || {
                let guard = conn
                    .lock()
                    .map_err(|_| "reminder store lock poisoned".to_string())?;
                let dao = SqliteReminderDao::new(&guard);
                f(&dao).map_err(|err| err.to_string())
            })
            .await;

        let result = match joined {
            Ok(result) => result,
            Err(err) => Err(format!("reminder store task failed: {err}")),
        };

        match result {
            Ok(value) => {
                debug!("event=datasource_call module=datasource status=ok op={op}");
                Outcome::Success(value)
            }
            Err(message) => {
                error!(
                    "event=datasource_call module=datasource status=error op={} error={}",
                    op, message
                );
                Outcome::error(message)
            }
        }
    }
}

#[async_trait]
impl ReminderDataSource for RemindersLocalRepository {
    async fn get_reminders(&self) -> Outcome<Vec<Reminder>> {
        self.run("get_reminders", |dao| dao.get_reminders()).await
    }

    async fn save_reminder(&self, reminder: Reminder) -> Outcome<()> {
        self.run("save_reminder", move |dao| dao.save_reminder(&reminder))
            .await
    }

    async fn get_reminder(&self, id: &str) -> Outcome<Reminder> {
        let id = id.to_string();
        match self
            .run("get_reminder", move |dao| dao.get_reminder_by_id(&id))
            .await
        {
            Outcome::Success(Some(reminder)) => Outcome::Success(reminder),
            Outcome::Success(None) => Outcome::error(REMINDER_NOT_FOUND),
            Outcome::Error { message, code } => Outcome::Error { message, code },
        }
    }

    async fn delete_all_reminders(&self) -> Outcome<()> {
        self.run("delete_all_reminders", |dao| {
            dao.delete_all_reminders().map(|_| ())
        })
        .await
    }
}
