// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interfaces to the collaborators the controller drives.
//!
//! The host (browser shell, terminal, or test harness) supplies one
//! implementation of each port, bundled into [`Ports`].

use crate::db::KeyValueStore;
use crate::models::{ActivityKind, Coords, FormValues};
use crate::services::render::{ListEntry, Marker};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local};

/// Source of the user's current position.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Resolve the current position once. There is no retry or timeout.
    async fn current_position(&self) -> Result<Coords, PositionError>;
}

/// Why a position could not be obtained.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PositionError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Position unavailable: {0}")]
    Unavailable(String),

    #[error("Geolocation not supported")]
    Unsupported,
}

/// Animation applied when the map pans to a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOptions {
    pub animate: bool,
    pub duration_secs: f64,
}

/// The interactive map.
pub trait MapWidget {
    /// Center the map on `center` at `zoom`.
    fn set_view(&mut self, center: Coords, zoom: u8);

    /// Start forwarding map clicks to the host as [`AppEvent::MapClicked`](crate::app::AppEvent).
    fn listen_for_clicks(&mut self);

    fn add_marker(&mut self, marker: &Marker);

    fn pan_to(&mut self, center: Coords, zoom: u8, options: PanOptions);

    /// Drop all markers and the view; the map must be set up again.
    fn clear(&mut self);
}

/// The workout input form.
pub trait FormSurface {
    fn values(&self) -> FormValues;
    fn show(&mut self);
    fn hide(&mut self);
    /// Empty every numeric field.
    fn clear(&mut self);
    fn focus_distance(&mut self);
    /// Show the cadence field for running or the elevation field for cycling.
    fn show_kind_fields(&mut self, kind: ActivityKind);
}

/// The workout list next to the map.
pub trait ListView {
    fn append(&mut self, entry: &ListEntry);
    fn clear(&mut self);
}

/// User-facing notices (alert dialogs).
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Wall clock used to stamp new workouts.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// All collaborators injected into the controller.
pub struct Ports {
    pub geolocation: Box<dyn GeolocationProvider>,
    pub map: Box<dyn MapWidget>,
    pub form: Box<dyn FormSurface>,
    pub list: Box<dyn ListView>,
    pub notifier: Box<dyn Notifier>,
    pub storage: Box<dyn KeyValueStore>,
    pub clock: Box<dyn Clock>,
}
