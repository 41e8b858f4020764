//! In-process geofence registrar and enter-transition detector.
//!
//! # Responsibility
//! - Keep registered regions keyed by request id.
//! - Turn device location updates into enter transitions.
//!
//! # Invariants
//! - Re-registering an id replaces the previous region and resets its state.
//! - An enter transition fires once per outside-to-inside crossing.
//! - Expired regions are dropped on the next location update.

use crate::geofence::request::{GeofenceError, GeofenceRequest, TransitionType};
use crate::model::reminder::ReminderId;
use log::{debug, info};
use std::sync::Mutex;
use std::time::Instant;

const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Registration capability of a platform geofencing client.
pub trait GeofenceRegistrar: Send + Sync {
    fn add_geofence(&self, request: GeofenceRequest) -> Result<(), GeofenceError>;
    /// Removes every registered region and returns how many were removed.
    fn remove_geofences(&self) -> Result<usize, GeofenceError>;
}

/// Transition event delivered for one location update.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceTransition {
    pub transition: TransitionType,
    pub request_ids: Vec<ReminderId>,
}

struct Region {
    request: GeofenceRequest,
    registered_at: Instant,
    inside: Option<bool>,
}

impl Region {
    fn is_expired(&self, now: Instant) -> bool {
        self.request
            .expiration
            .is_some_and(|ttl| now.saturating_duration_since(self.registered_at) >= ttl)
    }
}

/// Registrar that evaluates regions locally from reported device locations.
#[derive(Default)]
pub struct GeofenceMonitor {
    regions: Mutex<Vec<Region>>,
}

impl GeofenceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of the currently registered regions, in registration order.
    pub fn registered_ids(&self) -> Vec<ReminderId> {
        self.regions
            .lock()
            .map(|regions| {
                regions
                    .iter()
                    .map(|region| region.request.request_id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Reports a device location observed now.
    pub fn update_location(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<GeofenceTransition>, GeofenceError> {
        self.update_location_at(latitude, longitude, Instant::now())
    }

    /// Reports a device location observed at `now`.
    ///
    /// Returns the enter transition for regions crossed by this update, if any.
    pub fn update_location_at(
        &self,
        latitude: f64,
        longitude: f64,
        now: Instant,
    ) -> Result<Option<GeofenceTransition>, GeofenceError> {
        let mut regions = self.lock_regions()?;

        let before = regions.len();
        regions.retain(|region| !region.is_expired(now));
        if regions.len() != before {
            debug!(
                "event=geofence_expire module=geofence status=ok removed={}",
                before - regions.len()
            );
        }

        let mut entered = Vec::new();
        for region in regions.iter_mut() {
            let distance = haversine_meters(
                region.request.latitude,
                region.request.longitude,
                latitude,
                longitude,
            );
            let inside_now = distance <= region.request.radius_meters;
            let fires = match region.inside {
                Some(was_inside) => !was_inside && inside_now,
                None => inside_now && region.request.initial_trigger_enter,
            };
            region.inside = Some(inside_now);
            if fires {
                entered.push(region.request.request_id.clone());
            }
        }

        if entered.is_empty() {
            return Ok(None);
        }

        info!(
            "event=geofence_transition module=geofence status=ok transition=enter count={}",
            entered.len()
        );
        Ok(Some(GeofenceTransition {
            transition: TransitionType::Enter,
            request_ids: entered,
        }))
    }

    fn lock_regions(&self) -> Result<std::sync::MutexGuard<'_, Vec<Region>>, GeofenceError> {
        self.regions
            .lock()
            .map_err(|_| GeofenceError::Registration("geofence registry lock poisoned".to_string()))
    }
}

impl GeofenceRegistrar for GeofenceMonitor {
    fn add_geofence(&self, request: GeofenceRequest) -> Result<(), GeofenceError> {
        let mut regions = self.lock_regions()?;
        regions.retain(|region| region.request.request_id != request.request_id);
        info!(
            "event=geofence_add module=geofence status=ok request_id={} radius_m={}",
            request.request_id, request.radius_meters
        );
        regions.push(Region {
            request,
            registered_at: Instant::now(),
            inside: None,
        });
        Ok(())
    }

    fn remove_geofences(&self) -> Result<usize, GeofenceError> {
        let mut regions = self.lock_regions()?;
        let removed = regions.len();
        regions.clear();
        info!("event=geofence_remove module=geofence status=ok removed={removed}");
        Ok(removed)
    }
}

/// Great-circle distance between two points in meters.
pub fn haversine_meters(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let phi_a = lat_a.to_radians();
    let phi_b = lat_b.to_radians();
    let d_phi = (lat_b - lat_a).to_radians();
    let d_lambda = (lon_b - lon_a).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::{haversine_meters, GeofenceMonitor, GeofenceRegistrar};
    use crate::geofence::request::{GeofenceRequest, TransitionType};
    use std::time::{Duration, Instant};

    fn request(id: &str, expiration: Option<Duration>) -> GeofenceRequest {
        GeofenceRequest {
            request_id: id.to_string(),
            latitude: 48.8584,
            longitude: 2.2945,
            radius_meters: 100.0,
            expiration,
            transition: TransitionType::Enter,
            initial_trigger_enter: true,
        }
    }

    #[test]
    fn haversine_matches_known_distance() {
        // One degree of latitude is roughly 111.2 km.
        let distance = haversine_meters(0.0, 0.0, 1.0, 0.0);
        assert!((distance - 111_195.0).abs() < 100.0, "{distance}");
    }

    #[test]
    fn enter_fires_once_per_crossing() {
        let monitor = GeofenceMonitor::new();
        monitor.add_geofence(request("tower", None)).unwrap();

        assert!(monitor.update_location(48.87, 2.30).unwrap().is_none());

        let entered = monitor.update_location(48.8585, 2.2946).unwrap().unwrap();
        assert_eq!(entered.request_ids, vec!["tower".to_string()]);
        assert!(monitor.update_location(48.8584, 2.2945).unwrap().is_none());

        monitor.update_location(48.87, 2.30).unwrap();
        assert!(monitor.update_location(48.8584, 2.2945).unwrap().is_some());
    }

    #[test]
    fn initial_position_inside_triggers_enter() {
        let monitor = GeofenceMonitor::new();
        monitor.add_geofence(request("tower", None)).unwrap();
        assert!(monitor.update_location(48.8584, 2.2945).unwrap().is_some());
    }

    #[test]
    fn expired_regions_are_dropped() {
        let monitor = GeofenceMonitor::new();
        monitor
            .add_geofence(request("short", Some(Duration::from_secs(1))))
            .unwrap();

        let later = Instant::now() + Duration::from_secs(5);
        assert!(monitor
            .update_location_at(48.8584, 2.2945, later)
            .unwrap()
            .is_none());
        assert!(monitor.registered_ids().is_empty());
    }

    #[test]
    fn re_adding_replaces_and_remove_clears() {
        let monitor = GeofenceMonitor::new();
        monitor.add_geofence(request("a", None)).unwrap();
        monitor.add_geofence(request("a", None)).unwrap();
        monitor.add_geofence(request("b", None)).unwrap();
        assert_eq!(monitor.registered_ids(), vec!["a".to_string(), "b".to_string()]);

        assert_eq!(monitor.remove_geofences().unwrap(), 2);
        assert!(monitor.registered_ids().is_empty());
    }
}
