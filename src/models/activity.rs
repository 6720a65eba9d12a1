// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout domain model.
//!
//! An [`Activity`] carries the shared record shape (identity, time, place,
//! distance and duration) plus [`KindMetrics`], the kind-specific input and
//! the metric derived from it. Derived fields are computed once in the
//! constructor and are only readable afterwards.

use crate::time_utils::month_day;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Latitude/longitude pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// The two kinds of workout that can be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Running,
    Cycling,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Running => "running",
            ActivityKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Running => "Running",
            ActivityKind::Cycling => "Cycling",
        }
    }

    /// Glyph shown in popups and list entries.
    pub fn icon(&self) -> &'static str {
        match self {
            ActivityKind::Running => "🏃",
            ActivityKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown activity kind: {0}")]
pub struct ParseKindError(String);

impl FromStr for ActivityKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(ActivityKind::Running),
            "cycling" => Ok(ActivityKind::Cycling),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

/// Opaque activity identifier derived from the creation instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(String);

impl ActivityId {
    /// Number of trailing digits of the Unix-millisecond timestamp kept in an id.
    const DIGITS: usize = 10;

    /// Build an id from the last ten digits of the instant's Unix milliseconds.
    pub fn from_instant(instant: &DateTime<FixedOffset>) -> Self {
        let millis = instant.timestamp_millis().to_string();
        let start = millis.len().saturating_sub(Self::DIGITS);
        Self(millis[start..].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActivityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ActivityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Kind-specific input together with the metric derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KindMetrics {
    /// Cadence in steps/min, pace in min/km.
    Running { cadence: f64, pace: f64 },
    /// Elevation gain in meters, speed in km/h.
    Cycling { elevation_gain: f64, speed: f64 },
}

impl KindMetrics {
    fn running(distance: f64, duration: f64, cadence: f64) -> Self {
        KindMetrics::Running {
            cadence,
            pace: duration / distance,
        }
    }

    fn cycling(distance: f64, duration: f64, elevation_gain: f64) -> Self {
        KindMetrics::Cycling {
            elevation_gain,
            speed: distance / (duration / 60.0),
        }
    }

    pub fn kind(&self) -> ActivityKind {
        match self {
            KindMetrics::Running { .. } => ActivityKind::Running,
            KindMetrics::Cycling { .. } => ActivityKind::Cycling,
        }
    }
}

/// Build the human-readable label for a workout, e.g. "Running on April 14".
pub fn describe(kind: ActivityKind, created_at: &DateTime<FixedOffset>) -> String {
    format!("{} on {}", kind.label(), month_day(created_at))
}

/// One logged workout.
///
/// Inputs are expected to be validated before construction; see
/// [`WorkoutInput`](crate::models::WorkoutInput).
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    id: ActivityId,
    created_at: DateTime<FixedOffset>,
    coords: Coords,
    /// Distance in kilometers
    distance: f64,
    /// Duration in minutes
    duration: f64,
    metrics: KindMetrics,
    description: String,
}

impl Activity {
    /// Construct an activity of the given kind. `kind_param` is the cadence
    /// for running and the elevation gain for cycling.
    pub fn new(
        kind: ActivityKind,
        id: ActivityId,
        created_at: DateTime<FixedOffset>,
        coords: Coords,
        distance: f64,
        duration: f64,
        kind_param: f64,
    ) -> Self {
        let metrics = match kind {
            ActivityKind::Running => KindMetrics::running(distance, duration, kind_param),
            ActivityKind::Cycling => KindMetrics::cycling(distance, duration, kind_param),
        };
        Self {
            description: describe(kind, &created_at),
            id,
            created_at,
            coords,
            distance,
            duration,
            metrics,
        }
    }

    pub fn running(
        id: ActivityId,
        created_at: DateTime<FixedOffset>,
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Self {
        Self::new(
            ActivityKind::Running,
            id,
            created_at,
            coords,
            distance,
            duration,
            cadence,
        )
    }

    pub fn cycling(
        id: ActivityId,
        created_at: DateTime<FixedOffset>,
        coords: Coords,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        Self::new(
            ActivityKind::Cycling,
            id,
            created_at,
            coords,
            distance,
            duration,
            elevation_gain,
        )
    }

    pub fn id(&self) -> &ActivityId {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<FixedOffset> {
        &self.created_at
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn kind(&self) -> ActivityKind {
        self.metrics.kind()
    }

    pub fn metrics(&self) -> &KindMetrics {
        &self.metrics
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Minutes per kilometer (running only).
    pub fn pace(&self) -> Option<f64> {
        match self.metrics {
            KindMetrics::Running { pace, .. } => Some(pace),
            KindMetrics::Cycling { .. } => None,
        }
    }

    /// Kilometers per hour (cycling only).
    pub fn speed(&self) -> Option<f64> {
        match self.metrics {
            KindMetrics::Cycling { speed, .. } => Some(speed),
            KindMetrics::Running { .. } => None,
        }
    }

    pub fn cadence(&self) -> Option<f64> {
        match self.metrics {
            KindMetrics::Running { cadence, .. } => Some(cadence),
            KindMetrics::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<f64> {
        match self.metrics {
            KindMetrics::Cycling { elevation_gain, .. } => Some(elevation_gain),
            KindMetrics::Running { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_running_pace() {
        let created = at("2024-04-14T08:00:00+02:00");
        let run = Activity::running(
            ActivityId::from_instant(&created),
            created,
            Coords::new(27.0, 74.0),
            5.0,
            25.0,
            180.0,
        );

        assert_eq!(run.kind(), ActivityKind::Running);
        assert!((run.pace().unwrap() - 5.0).abs() < 1e-9);
        assert_eq!(run.cadence(), Some(180.0));
        assert_eq!(run.speed(), None);
        assert_eq!(run.description(), "Running on April 14");
    }

    #[test]
    fn test_cycling_speed() {
        let created = at("2024-07-01T18:30:00Z");
        let ride = Activity::cycling(
            ActivityId::from("1"),
            created,
            Coords::new(27.0, 75.0),
            20.0,
            60.0,
            150.0,
        );

        assert_eq!(ride.kind(), ActivityKind::Cycling);
        assert!((ride.speed().unwrap() - 20.0).abs() < 1e-9);
        assert_eq!(ride.elevation_gain(), Some(150.0));
        assert_eq!(ride.pace(), None);
        assert_eq!(ride.description(), "Cycling on July 1");
    }

    #[test]
    fn test_derived_fields_match_formulas() {
        let created = at("2024-01-02T00:00:00Z");
        for (distance, duration) in [(0.4, 3.0), (42.195, 180.5), (1e-3, 1e3), (7.0, 0.25)] {
            let run = Activity::running(
                ActivityId::from("r"),
                created,
                Coords::new(0.0, 0.0),
                distance,
                duration,
                170.0,
            );
            let ride = Activity::cycling(
                ActivityId::from("c"),
                created,
                Coords::new(0.0, 0.0),
                distance,
                duration,
                0.0,
            );
            assert!((run.pace().unwrap() - duration / distance).abs() < 1e-9);
            assert!((ride.speed().unwrap() - distance / (duration / 60.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_description_depends_only_on_kind_and_day() {
        let morning = at("2024-04-14T06:00:00+02:00");
        let evening = at("2024-04-14T21:45:00+02:00");
        assert_eq!(
            describe(ActivityKind::Running, &morning),
            describe(ActivityKind::Running, &evening)
        );
        assert_ne!(
            describe(ActivityKind::Running, &morning),
            describe(ActivityKind::Cycling, &morning)
        );
    }

    #[test]
    fn test_id_is_last_ten_millisecond_digits() {
        let created = at("2024-04-14T08:00:00.123Z");
        let id = ActivityId::from_instant(&created);
        let millis = created.timestamp_millis().to_string();

        assert_eq!(id.as_str().len(), 10);
        assert!(millis.ends_with(id.as_str()));
    }

    #[test]
    fn test_coords_serialize_as_pair() {
        let json = serde_json::to_string(&Coords::new(27.5, -74.25)).unwrap();
        assert_eq!(json, "[27.5,-74.25]");

        let back: Coords = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Coords::new(27.5, -74.25));
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("Running".parse::<ActivityKind>().unwrap(), ActivityKind::Running);
        assert_eq!(" cycling ".parse::<ActivityKind>().unwrap(), ActivityKind::Cycling);
        assert!("swimming".parse::<ActivityKind>().is_err());
    }
}
