// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout log persistence.
//!
//! The whole log is written under a single storage key on every save. Records
//! keep the derived fields (`pace`, `speed`, `description`) so the stored JSON
//! is self-describing, but loading rebuilds each [`Activity`] from its primary
//! fields and recomputes them.

use crate::db::{keys, KeyValueStore};
use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityId, ActivityKind, Coords, KindMetrics, WorkoutInput};
use crate::time_utils::format_rfc3339_millis;
use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One workout as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export))]
#[serde(rename_all = "camelCase", try_from = "RecordFields")]
pub struct StoredActivity {
    pub id: String,
    /// Creation time (RFC 3339, with the local offset)
    #[serde(serialize_with = "serialize_created_at")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<FixedOffset>,
    /// `[lat, lng]`
    pub coords: [f64; 2],
    /// Kilometers
    pub distance: f64,
    /// Minutes
    pub duration: f64,
    pub kind: ActivityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    pub description: String,
}

/// Record as read from storage, accepting both the current layout and the
/// older one (`date` in UTC, `type` for the kind).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordFields {
    id: String,
    created_at: Option<DateTime<FixedOffset>>,
    date: Option<DateTime<Utc>>,
    coords: [f64; 2],
    distance: f64,
    duration: f64,
    #[serde(alias = "type")]
    kind: ActivityKind,
    #[serde(default)]
    cadence: Option<f64>,
    #[serde(default)]
    elevation_gain: Option<f64>,
    #[serde(default)]
    pace: Option<f64>,
    #[serde(default)]
    speed: Option<f64>,
    #[serde(default)]
    description: String,
}

impl TryFrom<RecordFields> for StoredActivity {
    type Error = String;

    fn try_from(fields: RecordFields) -> std::result::Result<Self, Self::Error> {
        // Legacy `date` is UTC; the calendar day is the one seen locally
        let created_at = match (fields.created_at, fields.date) {
            (Some(created_at), _) => created_at,
            (None, Some(date)) => date.with_timezone(&Local).fixed_offset(),
            (None, None) => return Err("missing field `createdAt`".to_string()),
        };

        Ok(Self {
            id: fields.id,
            created_at,
            coords: fields.coords,
            distance: fields.distance,
            duration: fields.duration,
            kind: fields.kind,
            cadence: fields.cadence,
            elevation_gain: fields.elevation_gain,
            pace: fields.pace,
            speed: fields.speed,
            description: fields.description,
        })
    }
}

fn serialize_created_at<S: Serializer>(
    date: &DateTime<FixedOffset>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_rfc3339_millis(date))
}

impl From<&Activity> for StoredActivity {
    fn from(activity: &Activity) -> Self {
        let (cadence, pace, elevation_gain, speed) = match *activity.metrics() {
            KindMetrics::Running { cadence, pace } => (Some(cadence), Some(pace), None, None),
            KindMetrics::Cycling {
                elevation_gain,
                speed,
            } => (None, None, Some(elevation_gain), Some(speed)),
        };
        Self {
            id: activity.id().to_string(),
            created_at: *activity.created_at(),
            coords: activity.coords().into(),
            distance: activity.distance(),
            duration: activity.duration(),
            kind: activity.kind(),
            cadence,
            elevation_gain,
            pace,
            speed,
            description: activity.description().to_string(),
        }
    }
}

impl StoredActivity {
    /// Rebuild a typed activity from the primary fields, recomputing derived ones.
    ///
    /// Records that break a domain invariant are rejected with the reason.
    pub fn into_activity(self) -> std::result::Result<Activity, String> {
        let kind_param = match self.kind {
            ActivityKind::Running => self.cadence.ok_or("missing cadence")?,
            ActivityKind::Cycling => self.elevation_gain.ok_or("missing elevationGain")?,
        };

        let input = WorkoutInput {
            kind: self.kind,
            distance: self.distance,
            duration: self.duration,
            kind_param,
        };
        input.check().map_err(|e| e.to_string())?;

        if self.id.is_empty() {
            return Err("empty id".to_string());
        }
        let [lat, lng] = self.coords;
        if !lat.is_finite() || !lng.is_finite() {
            return Err("non-finite coordinates".to_string());
        }

        Ok(Activity::new(
            self.kind,
            ActivityId::from(self.id),
            self.created_at,
            Coords::new(lat, lng),
            self.distance,
            self.duration,
            kind_param,
        ))
    }
}

/// Serialize the full log and overwrite the stored value.
pub fn save(store: &dyn KeyValueStore, log: &[Activity]) -> Result<()> {
    let records: Vec<StoredActivity> = log.iter().map(StoredActivity::from).collect();
    let json = serde_json::to_string(&records)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize workouts: {}", e)))?;

    store
        .set(keys::WORKOUTS, &json)
        .map_err(|e| AppError::Storage(e.to_string()))?;

    tracing::debug!(count = log.len(), "Workout log saved");
    Ok(())
}

/// Load the stored log. Missing or unreadable data yields an empty log.
pub fn load(store: &dyn KeyValueStore) -> Vec<Activity> {
    match try_load(store) {
        Ok(log) => log,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding stored workouts");
            Vec::new()
        }
    }
}

/// Load the stored log, reporting storage and parse failures.
///
/// Individual records that fail to parse or violate an invariant are skipped,
/// as are repeated ids after their first occurrence.
pub fn try_load(store: &dyn KeyValueStore) -> Result<Vec<Activity>> {
    let Some(json) = store
        .get(keys::WORKOUTS)
        .map_err(|e| AppError::CorruptPersistedData(e.to_string()))?
    else {
        return Ok(Vec::new());
    };

    let raw: Vec<serde_json::Value> = serde_json::from_str(&json)
        .map_err(|e| AppError::CorruptPersistedData(e.to_string()))?;

    let mut seen = HashSet::new();
    let mut log = Vec::with_capacity(raw.len());

    for (index, value) in raw.into_iter().enumerate() {
        let activity = serde_json::from_value::<StoredActivity>(value)
            .map_err(|e| e.to_string())
            .and_then(StoredActivity::into_activity);

        match activity {
            Ok(activity) => {
                if !seen.insert(activity.id().clone()) {
                    tracing::warn!(index, id = %activity.id(), "Skipping duplicate workout id");
                    continue;
                }
                log.push(activity);
            }
            Err(reason) => {
                tracing::warn!(index, reason = %reason, "Skipping invalid stored workout");
            }
        }
    }

    tracing::debug!(count = log.len(), "Workout log loaded");
    Ok(log)
}

/// Remove the stored log.
pub fn clear(store: &dyn KeyValueStore) -> Result<()> {
    store
        .remove(keys::WORKOUTS)
        .map_err(|e| AppError::Storage(e.to_string()))
}
