//! Reminder data-source contract and its implementations.
//!
//! # Responsibility
//! - Define the async contract view-models and geofence handlers call.
//! - Wrap every store result in an `Outcome` instead of propagating errors.
//!
//! # Invariants
//! - `get_reminder` misses report exactly [`REMINDER_NOT_FOUND`].
//! - Saving an existing id overwrites; saving a new id appends.
//! - `delete_all_reminders` clears the store unconditionally.

use crate::model::reminder::Reminder;
use async_trait::async_trait;

pub mod fake;
pub mod local;
pub mod outcome;

pub use outcome::Outcome;

/// Error message returned when no reminder matches a lookup id.
pub const REMINDER_NOT_FOUND: &str = "Reminder not found!";

/// Async access to stored reminders.
#[async_trait]
pub trait ReminderDataSource: Send + Sync {
    /// Returns all reminders in insertion order.
    async fn get_reminders(&self) -> Outcome<Vec<Reminder>>;
    /// Persists `reminder`, replacing any stored reminder with the same id.
    async fn save_reminder(&self, reminder: Reminder) -> Outcome<()>;
    /// Returns the reminder with `id`, or `Error(REMINDER_NOT_FOUND)`.
    async fn get_reminder(&self, id: &str) -> Outcome<Reminder>;
    async fn delete_all_reminders(&self) -> Outcome<()>;
}
