//! Core domain logic for GeoRemind location reminders.
//! This crate is the single source of truth for reminder invariants.

pub mod config;
pub mod dao;
pub mod datasource;
pub mod db;
pub mod geofence;
pub mod logging;
pub mod model;
pub mod service;
pub mod viewmodel;

pub use config::{ConfigError, CoreConfig};
pub use dao::reminder_dao::{DaoError, DaoResult, ReminderDao, SqliteReminderDao};
pub use datasource::fake::{FakeDataSource, TEST_EXCEPTION};
pub use datasource::local::{RemindersLocalRepository, SharedConnection};
pub use datasource::{Outcome, ReminderDataSource, REMINDER_NOT_FOUND};
pub use geofence::handler::{GeofenceTransitionHandler, ReminderNotifier};
pub use geofence::monitor::{GeofenceMonitor, GeofenceRegistrar, GeofenceTransition};
pub use geofence::request::{
    dropped_pin_snippet, GeofenceError, GeofenceRequest, GeofenceSettings, TransitionType,
};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::reminder::{Reminder, ReminderId, ReminderValidationError};
pub use service::reminder_service::{ReminderService, ReminderServiceError};
pub use viewmodel::observable::Observable;
pub use viewmodel::reminders_list::RemindersListViewModel;
pub use viewmodel::save_reminder::{PointOfInterest, SaveReminderViewModel, REMINDER_SAVED};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
