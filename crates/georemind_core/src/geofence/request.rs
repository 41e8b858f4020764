//! Geofence request construction.
//!
//! # Invariants
//! - The request id is always the reminder id.
//! - Only enter transitions are requested.

use crate::model::reminder::{Reminder, ReminderId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_GEOFENCE_RADIUS_METERS: f64 = 100.0;
pub const DEFAULT_GEOFENCE_EXPIRATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Region parameters applied to every registered reminder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeofenceSettings {
    pub radius_meters: f64,
    /// `None` means the region never expires.
    pub expiration: Option<Duration>,
}

impl Default for GeofenceSettings {
    fn default() -> Self {
        Self {
            radius_meters: DEFAULT_GEOFENCE_RADIUS_METERS,
            expiration: Some(DEFAULT_GEOFENCE_EXPIRATION),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionType {
    Enter,
}

/// Circular region registration for one reminder.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceRequest {
    pub request_id: ReminderId,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
    pub expiration: Option<Duration>,
    pub transition: TransitionType,
    /// Fire an enter transition right away when the device is already inside.
    pub initial_trigger_enter: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeofenceError {
    MissingCoordinates(ReminderId),
    InvalidCoordinates { latitude: f64, longitude: f64 },
    InvalidRadius(f64),
    Registration(String),
}

impl Display for GeofenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCoordinates(id) => {
                write!(f, "reminder {id} has no coordinates to geofence")
            }
            Self::InvalidCoordinates {
                latitude,
                longitude,
            } => write!(f, "coordinates out of range: lat={latitude} lon={longitude}"),
            Self::InvalidRadius(radius) => write!(f, "geofence radius must be positive, got {radius}"),
            Self::Registration(message) => write!(f, "geofence registration failed: {message}"),
        }
    }
}

impl Error for GeofenceError {}

impl GeofenceRequest {
    /// Builds the enter-transition region for `reminder`.
    ///
    /// # Errors
    /// - `MissingCoordinates` when latitude or longitude is unset.
    /// - `InvalidCoordinates` when either value is out of range or not finite.
    /// - `InvalidRadius` when the configured radius is not positive.
    pub fn for_reminder(
        reminder: &Reminder,
        settings: &GeofenceSettings,
    ) -> Result<Self, GeofenceError> {
        let (latitude, longitude) = reminder
            .coordinates()
            .ok_or_else(|| GeofenceError::MissingCoordinates(reminder.id.clone()))?;

        if !is_valid_coordinate(latitude, longitude) {
            return Err(GeofenceError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        if !(settings.radius_meters.is_finite() && settings.radius_meters > 0.0) {
            return Err(GeofenceError::InvalidRadius(settings.radius_meters));
        }

        Ok(Self {
            request_id: reminder.id.clone(),
            latitude,
            longitude,
            radius_meters: settings.radius_meters,
            expiration: settings.expiration,
            transition: TransitionType::Enter,
            initial_trigger_enter: true,
        })
    }
}

/// Formats the info-window snippet for a pin dropped at the given point.
pub fn dropped_pin_snippet(latitude: f64, longitude: f64) -> String {
    format!("Lat: {latitude:.5}, Long: {longitude:.5}")
}

fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

#[cfg(test)]
mod tests {
    use super::{dropped_pin_snippet, GeofenceError, GeofenceRequest, GeofenceSettings};
    use crate::model::reminder::Reminder;

    #[test]
    fn request_uses_reminder_id_and_settings() {
        let reminder = Reminder::new(
            Some("coffee".to_string()),
            None,
            Some("cafe".to_string()),
            Some(52.52),
            Some(13.405),
        );
        let request = GeofenceRequest::for_reminder(&reminder, &GeofenceSettings::default())
            .expect("request should build");
        assert_eq!(request.request_id, reminder.id);
        assert_eq!(request.radius_meters, 100.0);
        assert!(request.initial_trigger_enter);
    }

    #[test]
    fn missing_and_out_of_range_coordinates_are_rejected() {
        let mut reminder = Reminder::new(None, None, None, Some(10.0), None);
        let err = GeofenceRequest::for_reminder(&reminder, &GeofenceSettings::default())
            .expect_err("missing longitude");
        assert!(matches!(err, GeofenceError::MissingCoordinates(_)));

        reminder.longitude = Some(200.0);
        let err = GeofenceRequest::for_reminder(&reminder, &GeofenceSettings::default())
            .expect_err("longitude out of range");
        assert!(matches!(err, GeofenceError::InvalidCoordinates { .. }));
    }

    #[test]
    fn snippet_uses_five_decimals() {
        assert_eq!(
            dropped_pin_snippet(1.0, -2.123456),
            "Lat: 1.00000, Long: -2.12346"
        );
    }
}
