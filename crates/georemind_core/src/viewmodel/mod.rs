//! View-models holding observable UI state.
//!
//! # Responsibility
//! - Translate data-source outcomes into UI-observable fields.
//! - Keep UI layers free of persistence details.
//!
//! # Invariants
//! - View-models never panic on data-source errors; errors become state.

pub mod observable;
pub mod reminders_list;
pub mod save_reminder;
