//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate data-source and geofence calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod reminder_service;
