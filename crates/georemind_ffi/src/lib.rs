//! Flutter bridge for GeoRemind core.

pub mod api;
