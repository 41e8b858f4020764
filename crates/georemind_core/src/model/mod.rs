//! Reminder domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by persistence and view-models.
//!
//! # Invariants
//! - Every reminder is identified by a stable `ReminderId`.

pub mod reminder;
