//! Runtime configuration resolved from the process environment.
//!
//! # Responsibility
//! - Resolve database path, logging and geofence parameters with defaults.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults.
//! - Set but unparsable variables are errors, never silently ignored.

use crate::geofence::request::GeofenceSettings;
use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "GEOREMIND_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "GEOREMIND_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "GEOREMIND_LOG_DIR";
pub const ENV_GEOFENCE_RADIUS_M: &str = "GEOREMIND_GEOFENCE_RADIUS_M";
pub const ENV_GEOFENCE_EXPIRATION_MS: &str = "GEOREMIND_GEOFENCE_EXPIRATION_MS";

const DEFAULT_DB_FILE_NAME: &str = "georemind.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {} value `{}`: {}", self.key, self.value, self.reason)
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub geofence: GeofenceSettings,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            geofence: GeofenceSettings::default(),
        }
    }
}

impl CoreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(path) = get(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config.log_dir = get(ENV_LOG_DIR).map(PathBuf::from);

        if let Some(raw) = get(ENV_GEOFENCE_RADIUS_M) {
            let radius = raw.parse::<f64>().ok().filter(|r| r.is_finite() && *r > 0.0);
            config.geofence.radius_meters = radius.ok_or(ConfigError {
                key: ENV_GEOFENCE_RADIUS_M,
                value: raw,
                reason: "expected a positive number of meters",
            })?;
        }

        if let Some(raw) = get(ENV_GEOFENCE_EXPIRATION_MS) {
            let millis = raw.parse::<u64>().map_err(|_| ConfigError {
                key: ENV_GEOFENCE_EXPIRATION_MS,
                value: raw,
                reason: "expected milliseconds as a non-negative integer",
            })?;
            config.geofence.expiration = match millis {
                0 => None,
                value => Some(Duration::from_millis(value)),
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, ENV_DB_PATH, ENV_GEOFENCE_EXPIRATION_MS, ENV_GEOFENCE_RADIUS_M};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = CoreConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.db_path.ends_with("georemind.sqlite3"));
        assert_eq!(config.geofence.radius_meters, 100.0);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, " /data/reminders.db "),
            (ENV_GEOFENCE_RADIUS_M, "250"),
            (ENV_GEOFENCE_EXPIRATION_MS, "0"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/reminders.db"));
        assert_eq!(config.geofence.radius_meters, 250.0);
        assert_eq!(config.geofence.expiration, None);

        let config =
            CoreConfig::from_lookup(lookup(&[(ENV_GEOFENCE_EXPIRATION_MS, "1500")])).unwrap();
        assert_eq!(config.geofence.expiration, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn invalid_radius_is_rejected() {
        let err = CoreConfig::from_lookup(lookup(&[(ENV_GEOFENCE_RADIUS_M, "-3")])).unwrap_err();
        assert_eq!(err.key, ENV_GEOFENCE_RADIUS_M);
        assert_eq!(err.value, "-3");
    }
}
