//! Reminder domain model.
//!
//! # Responsibility
//! - Define the record pairing a geographic point with descriptive text.
//! - Validate user input before it reaches persistence.
//!
//! # Invariants
//! - `id` is assigned at construction and never changes.
//! - `id` is the only key for lookup, overwrite and deletion.
//! - Validation checks the title before the location.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable reminder identifier.
///
/// Also used as the geofence request id, so it stays plain text.
pub type ReminderId = String;

/// User-created location reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Human-readable label of the selected place.
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Validation failure for reminder input.
///
/// Each variant carries a stable numeric code that UI layers map to
/// localized messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderValidationError {
    /// Title is missing or empty.
    MissingTitle,
    /// Location label is missing or empty.
    MissingLocation,
}

impl ReminderValidationError {
    /// Stable error code surfaced through view-model state and FFI.
    pub fn code(self) -> i32 {
        match self {
            Self::MissingTitle => 1,
            Self::MissingLocation => 2,
        }
    }
}

impl Display for ReminderValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "Please enter title"),
            Self::MissingLocation => write!(f, "Please select location"),
        }
    }
}

impl Error for ReminderValidationError {}

impl Reminder {
    /// Creates a reminder with a freshly generated id.
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        location: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4().to_string(),
            title,
            description,
            location,
            latitude,
            longitude,
        )
    }

    /// Creates a reminder with a caller-provided id.
    ///
    /// Saving the result overwrites any stored reminder with the same id.
    pub fn with_id(
        id: impl Into<ReminderId>,
        title: Option<String>,
        description: Option<String>,
        location: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            title,
            description,
            location,
            latitude,
            longitude,
        }
    }

    /// Checks that the reminder can be saved.
    ///
    /// # Errors
    /// - `MissingTitle` when the title is `None` or empty.
    /// - `MissingLocation` when the location label is `None` or empty.
    pub fn validate(&self) -> Result<(), ReminderValidationError> {
        if is_blank(self.title.as_deref()) {
            return Err(ReminderValidationError::MissingTitle);
        }
        if is_blank(self.location.as_deref()) {
            return Err(ReminderValidationError::MissingLocation);
        }
        Ok(())
    }

    /// Returns `(latitude, longitude)` when both are set.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}
