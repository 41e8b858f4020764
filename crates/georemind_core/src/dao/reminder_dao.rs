//! Reminder data access contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the raw CRUD surface over the `reminders` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Saving an existing id updates the row in place; its list position is kept.
//! - Listing returns rows in insertion order.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::reminder::Reminder;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const REMINDER_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    location,
    latitude,
    longitude
FROM reminders";

pub type DaoResult<T> = Result<T, DaoError>;

/// Error for reminder table access.
#[derive(Debug)]
pub enum DaoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for DaoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted reminder data: {message}"),
        }
    }
}

impl Error for DaoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for DaoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for DaoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data access interface for the reminder table.
pub trait ReminderDao {
    fn get_reminders(&self) -> DaoResult<Vec<Reminder>>;
    fn get_reminder_by_id(&self, id: &str) -> DaoResult<Option<Reminder>>;
    fn save_reminder(&self, reminder: &Reminder) -> DaoResult<()>;
    fn delete_all_reminders(&self) -> DaoResult<usize>;
    fn count_reminders(&self) -> DaoResult<u64>;
}

/// SQLite-backed reminder DAO.
pub struct SqliteReminderDao<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReminderDao<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReminderDao for SqliteReminderDao<'_> {
    fn get_reminders(&self) -> DaoResult<Vec<Reminder>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REMINDER_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut reminders = Vec::new();

        while let Some(row) = rows.next()? {
            reminders.push(parse_reminder_row(row)?);
        }

        Ok(reminders)
    }

    fn get_reminder_by_id(&self, id: &str) -> DaoResult<Option<Reminder>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REMINDER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_reminder_row(row)?));
        }

        Ok(None)
    }

    fn save_reminder(&self, reminder: &Reminder) -> DaoResult<()> {
        check_coordinate("latitude", reminder.latitude)?;
        check_coordinate("longitude", reminder.longitude)?;

        self.conn.execute(
            "INSERT INTO reminders (
                id,
                title,
                description,
                location,
                latitude,
                longitude,
                created_at,
                updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                (strftime('%s', 'now') * 1000),
                (strftime('%s', 'now') * 1000)
            )
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                location = excluded.location,
                latitude = excluded.latitude,
                longitude = excluded.longitude,
                updated_at = excluded.updated_at;",
            params![
                reminder.id.as_str(),
                reminder.title.as_deref(),
                reminder.description.as_deref(),
                reminder.location.as_deref(),
                reminder.latitude,
                reminder.longitude,
            ],
        )?;

        Ok(())
    }

    fn delete_all_reminders(&self) -> DaoResult<usize> {
        let deleted = self.conn.execute("DELETE FROM reminders;", [])?;
        Ok(deleted)
    }

    fn count_reminders(&self) -> DaoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM reminders;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| DaoError::InvalidData(format!("negative reminder count `{count}`")))
    }
}

fn parse_reminder_row(row: &Row<'_>) -> DaoResult<Reminder> {
    let id: String = row.get("id")?;
    if id.is_empty() {
        return Err(DaoError::InvalidData(
            "empty id value in reminders.id".to_string(),
        ));
    }

    let latitude: Option<f64> = row.get("latitude")?;
    let longitude: Option<f64> = row.get("longitude")?;
    check_coordinate("latitude", latitude)?;
    check_coordinate("longitude", longitude)?;

    Ok(Reminder {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        location: row.get("location")?,
        latitude,
        longitude,
    })
}

fn check_coordinate(column: &str, value: Option<f64>) -> DaoResult<()> {
    match value {
        Some(value) if !value.is_finite() => Err(DaoError::InvalidData(format!(
            "non-finite {column} value `{value}` in reminders.{column}"
        ))),
        _ => Ok(()),
    }
}
