//! Reminder use-case service.
//!
//! # Responsibility
//! - Pair reminder persistence with geofence registration.
//! - Keep FFI and CLI callers decoupled from storage and platform clients.
//!
//! # Invariants
//! - A geofence is registered only after the reminder is persisted.
//! - Clearing reminders also removes every registered geofence.

use crate::datasource::{Outcome, ReminderDataSource};
use crate::geofence::monitor::GeofenceRegistrar;
use crate::geofence::request::{GeofenceError, GeofenceRequest, GeofenceSettings};
use crate::model::reminder::{Reminder, ReminderValidationError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Failure of a reminder use-case.
#[derive(Debug)]
pub enum ReminderServiceError {
    Validation(ReminderValidationError),
    Store(String),
    Geofence(GeofenceError),
}

impl Display for ReminderServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(message) => write!(f, "{message}"),
            Self::Geofence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReminderServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(_) => None,
            Self::Geofence(err) => Some(err),
        }
    }
}

impl From<ReminderValidationError> for ReminderServiceError {
    fn from(value: ReminderValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<GeofenceError> for ReminderServiceError {
    fn from(value: GeofenceError) -> Self {
        Self::Geofence(value)
    }
}

pub struct ReminderService<D: ReminderDataSource, R: GeofenceRegistrar> {
    data_source: Arc<D>,
    registrar: Arc<R>,
    settings: GeofenceSettings,
}

impl<D: ReminderDataSource, R: GeofenceRegistrar> ReminderService<D, R> {
    pub fn new(data_source: Arc<D>, registrar: Arc<R>, settings: GeofenceSettings) -> Self {
        Self {
            data_source,
            registrar,
            settings,
        }
    }

    /// Validates, persists and geofences `reminder`.
    ///
    /// # Errors
    /// - `Validation` before anything is written.
    /// - `Store` when persistence fails; no geofence is registered then.
    /// - `Geofence` when the reminder was saved but its region could not be
    ///   registered (for example missing coordinates).
    pub async fn save_and_register(
        &self,
        reminder: Reminder,
    ) -> Result<GeofenceRequest, ReminderServiceError> {
        reminder.validate()?;

        let request = GeofenceRequest::for_reminder(&reminder, &self.settings);
        let reminder_id = reminder.id.clone();
        if let Outcome::Error { message, .. } = self.data_source.save_reminder(reminder).await {
            return Err(ReminderServiceError::Store(message));
        }

        let request = request?;
        if let Err(err) = self.registrar.add_geofence(request.clone()) {
            warn!(
                "event=reminder_register module=service status=error reminder_id={} error={}",
                reminder_id, err
            );
            return Err(err.into());
        }

        info!("event=reminder_register module=service status=ok reminder_id={reminder_id}");
        Ok(request)
    }

    /// Deletes every reminder and unregisters every geofence.
    pub async fn clear_all(&self) -> Result<(), ReminderServiceError> {
        if let Outcome::Error { message, .. } = self.data_source.delete_all_reminders().await {
            return Err(ReminderServiceError::Store(message));
        }
        let removed = self.registrar.remove_geofences()?;
        info!("event=reminder_clear module=service status=ok geofences_removed={removed}");
        Ok(())
    }
}
