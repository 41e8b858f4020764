//! Data access layer over the reminder table.
//!
//! # Responsibility
//! - Isolate SQLite query details from the async data-source layer.
//!
//! # Invariants
//! - DAO calls are synchronous and borrow one connection for their duration.

pub mod reminder_dao;
