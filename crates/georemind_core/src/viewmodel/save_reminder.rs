//! View-model backing the save-reminder and select-location screens.
//!
//! # Responsibility
//! - Hold the reminder being edited.
//! - Validate input and persist it through the data source.
//!
//! # Invariants
//! - Invalid input is never persisted.
//! - Title is validated before location.

use crate::datasource::{Outcome, ReminderDataSource};
use crate::model::reminder::{Reminder, ReminderValidationError};
use crate::viewmodel::observable::Observable;
use log::{info, warn};
use std::sync::Arc;

/// Toast text shown after a successful save.
pub const REMINDER_SAVED: &str = "Reminder Saved !";

/// Place picked on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

pub struct SaveReminderViewModel<D: ReminderDataSource> {
    data_source: Arc<D>,
    pub reminder_title: Observable<Option<String>>,
    pub reminder_description: Observable<Option<String>>,
    pub reminder_selected_location_str: Observable<Option<String>>,
    pub selected_poi: Observable<Option<PointOfInterest>>,
    pub latitude: Observable<Option<f64>>,
    pub longitude: Observable<Option<f64>>,
    pub show_loading: Observable<bool>,
    pub show_toast: Observable<Option<String>>,
    pub show_snackbar: Observable<Option<String>>,
    /// Validation failure of the last attempt; use `code()` for the numeric form.
    pub show_snackbar_int: Observable<Option<ReminderValidationError>>,
}

impl<D: ReminderDataSource> SaveReminderViewModel<D> {
    pub fn new(data_source: Arc<D>) -> Self {
        Self {
            data_source,
            reminder_title: Observable::new(None),
            reminder_description: Observable::new(None),
            reminder_selected_location_str: Observable::new(None),
            selected_poi: Observable::new(None),
            latitude: Observable::new(None),
            longitude: Observable::new(None),
            show_loading: Observable::new(false),
            show_toast: Observable::new(None),
            show_snackbar: Observable::new(None),
            show_snackbar_int: Observable::new(None),
        }
    }

    /// Clears every input field.
    pub fn on_clear(&self) {
        self.reminder_title.set(None);
        self.reminder_description.set(None);
        self.reminder_selected_location_str.set(None);
        self.selected_poi.set(None);
        self.latitude.set(None);
        self.longitude.set(None);
    }

    /// Copies the picked place into the location fields.
    pub fn on_location_selected(&self, poi: PointOfInterest) {
        self.latitude.set(Some(poi.latitude));
        self.longitude.set(Some(poi.longitude));
        self.reminder_selected_location_str.set(Some(poi.name.clone()));
        self.selected_poi.set(Some(poi));
    }

    /// Builds a new reminder from the current input fields.
    pub fn current_item(&self) -> Reminder {
        Reminder::new(
            self.reminder_title.get(),
            self.reminder_description.get(),
            self.reminder_selected_location_str.get(),
            self.latitude.get(),
            self.longitude.get(),
        )
    }

    /// Validates `item` and persists it when valid.
    ///
    /// Returns `false` without touching the data source when validation fails.
    pub async fn validate_and_save_reminder(&self, item: &Reminder) -> bool {
        if !self.validate_entered_data(item) {
            return false;
        }
        self.save_reminder(item).await;
        true
    }

    /// Persists `item` and reports the result through `show_toast`/`show_snackbar`.
    pub async fn save_reminder(&self, item: &Reminder) {
        self.show_loading.set(true);
        let outcome = self.data_source.save_reminder(item.clone()).await;
        self.show_loading.set(false);

        match outcome {
            Outcome::Success(()) => {
                info!(
                    "event=reminder_save module=viewmodel status=ok reminder_id={}",
                    item.id
                );
                self.show_toast.set(Some(REMINDER_SAVED.to_string()));
            }
            Outcome::Error { message, .. } => {
                warn!(
                    "event=reminder_save module=viewmodel status=error reminder_id={} error={}",
                    item.id, message
                );
                self.show_snackbar.set(Some(message));
            }
        }
    }

    /// Returns whether `item` passes validation.
    ///
    /// The failure code of the last attempt is kept in `show_snackbar_int`;
    /// a passing attempt clears it.
    pub fn validate_entered_data(&self, item: &Reminder) -> bool {
        match item.validate() {
            Ok(()) => {
                self.show_snackbar_int.set(None);
                true
            }
            Err(err) => {
                self.show_snackbar_int.set(Some(err));
                false
            }
        }
    }
}
