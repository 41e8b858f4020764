//! In-memory reminder data source used as a test double.
//!
//! # Invariants
//! - With failure injection on, every read returns `Error("Test exception")`.
//! - Writes ignore failure injection.

use crate::datasource::{Outcome, ReminderDataSource, REMINDER_NOT_FOUND};
use crate::model::reminder::Reminder;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, Notify};

/// Message returned by reads while failure injection is on.
pub const TEST_EXCEPTION: &str = "Test exception";

#[derive(Default)]
pub struct FakeDataSource {
    reminders: Mutex<Vec<Reminder>>,
    should_return_error: AtomicBool,
    hold_reads: AtomicBool,
    release: Notify,
}

impl FakeDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fake pre-filled with `reminders`.
    pub fn with_reminders(reminders: Vec<Reminder>) -> Self {
        Self {
            reminders: Mutex::new(reminders),
            ..Self::default()
        }
    }

    pub fn set_return_error(&self, value: bool) {
        self.should_return_error.store(value, Ordering::SeqCst);
    }

    /// Makes `get_reminders` wait until [`FakeDataSource::release_reads`] is called.
    pub fn hold_reads(&self) {
        self.hold_reads.store(true, Ordering::SeqCst);
    }

    pub fn release_reads(&self) {
        self.hold_reads.store(false, Ordering::SeqCst);
        self.release.notify_waiters();
    }

    /// Snapshot of the stored reminders.
    pub async fn snapshot(&self) -> Vec<Reminder> {
        self.reminders.lock().await.clone()
    }

    async fn wait_if_held(&self) {
        while self.hold_reads.load(Ordering::SeqCst) {
            let notified = self.release.notified();
            if !self.hold_reads.load(Ordering::SeqCst) {
                break;
            }
            notified.await;
        }
    }

    fn failing(&self) -> bool {
        self.should_return_error.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReminderDataSource for FakeDataSource {
    async fn get_reminders(&self) -> Outcome<Vec<Reminder>> {
        self.wait_if_held().await;
        if self.failing() {
            return Outcome::error(TEST_EXCEPTION);
        }
        Outcome::Success(self.reminders.lock().await.clone())
    }

    async fn save_reminder(&self, reminder: Reminder) -> Outcome<()> {
        let mut reminders = self.reminders.lock().await;
        match reminders.iter_mut().find(|stored| stored.id == reminder.id) {
            Some(stored) => *stored = reminder,
            None => reminders.push(reminder),
        }
        Outcome::Success(())
    }

    async fn get_reminder(&self, id: &str) -> Outcome<Reminder> {
        if self.failing() {
            return Outcome::error(TEST_EXCEPTION);
        }
        self.reminders
            .lock()
            .await
            .iter()
            .find(|stored| stored.id == id)
            .cloned()
            .map_or_else(|| Outcome::error(REMINDER_NOT_FOUND), Outcome::Success)
    }

    async fn delete_all_reminders(&self) -> Outcome<()> {
        self.reminders.lock().await.clear();
        Outcome::Success(())
    }
}
