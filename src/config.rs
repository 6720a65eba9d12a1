//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first if present.

use crate::models::Coords;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Zoom level used for the initial view and when panning to a workout.
pub const DEFAULT_MAP_ZOOM: u8 = 17;
/// Pan animation length in seconds.
pub const DEFAULT_PAN_DURATION_SECS: f64 = 0.6;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the stored workout log
    pub data_dir: PathBuf,
    /// Map zoom level
    pub map_zoom: u8,
    /// Duration of the pan animation when a workout is selected
    pub pan_duration_secs: f64,
    /// Position reported by the console host's geolocation provider.
    /// `None` means positioning is denied.
    pub home_position: Option<Coords>,
    /// "json" (default) or "text"
    pub log_format: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            map_zoom: DEFAULT_MAP_ZOOM,
            pan_duration_secs: DEFAULT_PAN_DURATION_SECS,
            home_position: None,
            log_format: "json".to_string(),
        }
    }
}

/// Map behavior handed to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSettings {
    pub zoom: u8,
    pub pan_duration_secs: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_MAP_ZOOM,
            pan_duration_secs: DEFAULT_PAN_DURATION_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let home_position = match (
            env::var("GO_TRACKER_HOME_LAT").ok(),
            env::var("GO_TRACKER_HOME_LNG").ok(),
        ) {
            (Some(lat), Some(lng)) => Some(Coords::new(
                parse_value("GO_TRACKER_HOME_LAT", &lat)?,
                parse_value("GO_TRACKER_HOME_LNG", &lng)?,
            )),
            (Some(_), None) => return Err(ConfigError::Missing("GO_TRACKER_HOME_LNG")),
            (None, Some(_)) => return Err(ConfigError::Missing("GO_TRACKER_HOME_LAT")),
            (None, None) => None,
        };

        let pan_duration_secs: f64 =
            parse_var("GO_TRACKER_PAN_DURATION_SECS", DEFAULT_PAN_DURATION_SECS)?;
        if !pan_duration_secs.is_finite() || pan_duration_secs < 0.0 {
            return Err(ConfigError::Invalid {
                name: "GO_TRACKER_PAN_DURATION_SECS",
                value: pan_duration_secs.to_string(),
            });
        }

        Ok(Self {
            data_dir: env::var("GO_TRACKER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            map_zoom: parse_var("GO_TRACKER_MAP_ZOOM", DEFAULT_MAP_ZOOM)?,
            pan_duration_secs,
            home_position,
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
        })
    }

    pub fn map_settings(&self) -> MapSettings {
        MapSettings {
            zoom: self.map_zoom,
            pan_duration_secs: self.pan_duration_secs,
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => parse_value(name, &value),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
