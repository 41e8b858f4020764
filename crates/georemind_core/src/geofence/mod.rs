//! Geofence orchestration around saved reminders.
//!
//! # Responsibility
//! - Build circular enter-regions for reminders.
//! - Detect enter transitions and route them to notifications.
//!
//! # Invariants
//! - Platform clients are only reached through `GeofenceRegistrar` and
//!   `ReminderNotifier`.

pub mod handler;
pub mod monitor;
pub mod request;
