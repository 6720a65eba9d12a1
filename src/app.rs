// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application controller.
//!
//! Owns the workout log and keeps the map, the list and storage in step with
//! it. Handles the core workflow:
//! 1. Request the user's position and set up the map
//! 2. Replay the stored log onto the list and the map
//! 3. Turn map clicks plus form submissions into logged workouts
//! 4. Pan to a workout when it is selected in the list

use crate::config::MapSettings;
use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityId, ActivityKind, Coords, WorkoutInput};
use crate::ports::{PanOptions, Ports};
use crate::services::{persistence, render};
use chrono::{DateTime, Duration, FixedOffset, SubsecRound};

/// Input events delivered by the host, one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    MapClicked(Coords),
    KindChanged(ActivityKind),
    FormSubmitted,
    ActivitySelected(ActivityId),
    Reset,
}

/// The workout logging controller.
pub struct App {
    settings: MapSettings,
    ports: Ports,
    workouts: Vec<Activity>,
    /// Location of the last map click, waiting for the form to be submitted
    pending: Option<Coords>,
    map_ready: bool,
}

impl App {
    pub fn new(settings: MapSettings, ports: Ports) -> Self {
        Self {
            settings,
            ports,
            workouts: Vec::new(),
            pending: None,
            map_ready: false,
        }
    }

    /// Start a session: load the stored log, then request the position and
    /// set up the map.
    ///
    /// On positioning failure a notice is shown and the map stays
    /// uninitialized; the stored workouts are still listed. Calling it again
    /// redraws the list and the map from scratch.
    pub async fn initialize(&mut self) -> Result<Coords> {
        self.map_ready = false;
        self.ports.map.clear();
        self.load_persisted();

        match self.ports.geolocation.current_position().await {
            Ok(position) => {
                self.load_map(position);
                Ok(position)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not get current position");
                let err = AppError::PositioningDenied(e.to_string());
                self.surface(&err);
                Err(err)
            }
        }
    }

    /// Replace the in-memory log with the stored one and list every entry.
    fn load_persisted(&mut self) {
        self.workouts = persistence::load(self.ports.storage.as_ref());
        self.ports.list.clear();
        for activity in &self.workouts {
            render::project_list_entry(self.ports.list.as_mut(), activity);
        }
        tracing::info!(count = self.workouts.len(), "Restored workout log");
    }

    fn load_map(&mut self, center: Coords) {
        self.ports.map.set_view(center, self.settings.zoom);
        self.ports.map.listen_for_clicks();
        self.map_ready = true;

        for activity in &self.workouts {
            render::project_marker(self.ports.map.as_mut(), activity);
        }
        tracing::info!(center = %center, zoom = self.settings.zoom, "Map ready");
    }

    /// Remember the clicked location and open the form.
    pub fn on_map_clicked(&mut self, coords: Coords) {
        if !self.map_ready {
            tracing::debug!(coords = %coords, "Ignoring click before map is ready");
            return;
        }
        self.pending = Some(coords);
        self.ports.form.show();
        self.ports.form.focus_distance();
    }

    /// Swap the kind-specific form field.
    pub fn on_kind_changed(&mut self, kind: ActivityKind) {
        self.ports.form.show_kind_fields(kind);
    }

    /// Read the form and submit its values.
    pub fn submit_form(&mut self) -> Result<ActivityId> {
        let input = self.ports.form.values().to_input();
        self.on_form_submitted(input)
    }

    /// Validate the input and log a workout at the pending click location.
    ///
    /// The pending location is consumed whether or not the input is valid.
    pub fn on_form_submitted(&mut self, input: WorkoutInput) -> Result<ActivityId> {
        let Some(coords) = self.pending.take() else {
            self.hide_form();
            tracing::warn!("Form submitted without a selected location");
            return Err(AppError::NoPendingLocation);
        };

        if let Err(err) = input.check() {
            tracing::info!(error = %err, "Rejected workout input");
            self.hide_form();
            self.surface(&err);
            return Err(err);
        }

        let created_at = self.ports.clock.now().trunc_subsecs(3);
        let id = self.unique_id(created_at);
        let activity = Activity::new(
            input.kind,
            id.clone(),
            created_at,
            coords,
            input.distance,
            input.duration,
            input.kind_param,
        );

        tracing::info!(
            id = %id,
            kind = %activity.kind(),
            distance = activity.distance(),
            duration = activity.duration(),
            "Workout logged"
        );

        self.workouts.push(activity);
        if let Some(activity) = self.workouts.last() {
            render::project_marker(self.ports.map.as_mut(), activity);
            render::project_list_entry(self.ports.list.as_mut(), activity);
        }

        self.hide_form();
        self.persist()?;
        Ok(id)
    }

    /// Pan the map to the selected workout. Returns `false` if nothing moved.
    pub fn on_activity_selected(&mut self, id: &ActivityId) -> bool {
        if !self.map_ready {
            tracing::debug!(id = %id, "Ignoring selection before map is ready");
            return false;
        }
        let Some(activity) = self.find(id) else {
            tracing::debug!(id = %id, "Selected workout not in log");
            return false;
        };

        let center = activity.coords();
        self.ports.map.pan_to(
            center,
            self.settings.zoom,
            PanOptions {
                animate: true,
                duration_secs: self.settings.pan_duration_secs,
            },
        );
        true
    }

    /// Wipe stored and in-memory workouts, then start a fresh session.
    ///
    /// If storage cannot be cleared the session is left untouched.
    pub async fn reset(&mut self) -> Result<Coords> {
        persistence::clear(self.ports.storage.as_ref()).inspect_err(|e| {
            tracing::error!(error = %e, "Failed to clear stored workouts");
        })?;

        self.workouts.clear();
        self.pending = None;
        self.hide_form();

        tracing::info!("Session reset");
        self.initialize().await
    }

    /// Dispatch a host event. Errors are logged and never escape.
    pub async fn handle(&mut self, event: AppEvent) {
        let result = match event {
            AppEvent::MapClicked(coords) => {
                self.on_map_clicked(coords);
                Ok(())
            }
            AppEvent::KindChanged(kind) => {
                self.on_kind_changed(kind);
                Ok(())
            }
            AppEvent::FormSubmitted => self.submit_form().map(|_| ()),
            AppEvent::ActivitySelected(id) => {
                self.on_activity_selected(&id);
                Ok(())
            }
            AppEvent::Reset => self.reset().await.map(|_| ()),
        };

        if let Err(e) = result {
            tracing::debug!(error = %e, "Event handled with error");
        }
    }

    /// The workout log, oldest first.
    pub fn workouts(&self) -> &[Activity] {
        &self.workouts
    }

    pub fn find(&self, id: &ActivityId) -> Option<&Activity> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn pending_location(&self) -> Option<Coords> {
        self.pending
    }

    pub fn is_map_ready(&self) -> bool {
        self.map_ready
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Derive an id from the creation instant, stepping forward a millisecond
    /// at a time past ids already in the log.
    fn unique_id(&self, created_at: DateTime<FixedOffset>) -> ActivityId {
        let mut instant = created_at;
        loop {
            let id = ActivityId::from_instant(&instant);
            if self.find(&id).is_none() {
                return id;
            }
            instant += Duration::milliseconds(1);
        }
    }

    fn hide_form(&mut self) {
        self.ports.form.clear();
        self.ports.form.hide();
    }

    fn persist(&self) -> Result<()> {
        persistence::save(self.ports.storage.as_ref(), &self.workouts).inspect_err(|e| {
            tracing::error!(error = %e, "Failed to save workout log");
        })
    }

    fn surface(&mut self, err: &AppError) {
        if let Some(notice) = err.user_notice() {
            self.ports.notifier.notify(notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{KeyValueStore, MemoryStore, StorageError};
    use crate::models::FormValues;
    use crate::ports::{
        Clock, FormSurface, GeolocationProvider, ListView, MapWidget, Notifier, PositionError,
    };
    use crate::services::render::{ListEntry, Marker};
    use async_trait::async_trait;

    struct Fixed(Coords);

    #[async_trait]
    impl GeolocationProvider for Fixed {
        async fn current_position(&self) -> std::result::Result<Coords, PositionError> {
            Ok(self.0)
        }
    }

    struct Quiet;

    impl MapWidget for Quiet {
        fn set_view(&mut self, _: Coords, _: u8) {}
        fn listen_for_clicks(&mut self) {}
        fn add_marker(&mut self, _: &Marker) {}
        fn pan_to(&mut self, _: Coords, _: u8, _: PanOptions) {}
        fn clear(&mut self) {}
    }

    impl FormSurface for Quiet {
        fn values(&self) -> FormValues {
            FormValues::new(ActivityKind::Running)
        }
        fn show(&mut self) {}
        fn hide(&mut self) {}
        fn clear(&mut self) {}
        fn focus_distance(&mut self) {}
        fn show_kind_fields(&mut self, _: ActivityKind) {}
    }

    impl ListView for Quiet {
        fn append(&mut self, _: &ListEntry) {}
        fn clear(&mut self) {}
    }

    impl Notifier for Quiet {
        fn notify(&mut self, _: &str) {}
    }

    /// Clock frozen at one instant, so every workout gets the same base id.
    struct Frozen;

    impl Clock for Frozen {
        fn now(&self) -> DateTime<FixedOffset> {
            DateTime::parse_from_rfc3339("2024-04-14T08:00:00+02:00").unwrap()
        }
    }

    /// Store that reads and writes normally but cannot delete.
    struct StuckStore(MemoryStore);

    impl KeyValueStore for StuckStore {
        fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
            self.0.set(key, value)
        }

        fn remove(&self, _key: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn app_with_store(storage: Box<dyn KeyValueStore>) -> App {
        App::new(
            MapSettings::default(),
            Ports {
                geolocation: Box::new(Fixed(Coords::new(27.0, 74.0))),
                map: Box::new(Quiet),
                form: Box::new(Quiet),
                list: Box::new(Quiet),
                notifier: Box::new(Quiet),
                storage,
                clock: Box::new(Frozen),
            },
        )
    }

    fn app() -> App {
        app_with_store(Box::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_ids_unique_when_clock_repeats() {
        let mut app = app();
        app.initialize().await.unwrap();

        let mut ids = Vec::new();
        for _ in 0..3 {
            app.on_map_clicked(Coords::new(27.0, 74.0));
            ids.push(
                app.on_form_submitted(WorkoutInput::running(5.0, 25.0, 180.0))
                    .unwrap(),
            );
        }

        assert_eq!(app.workouts().len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);
    }

    #[test]
    fn test_click_before_map_ready_ignored() {
        let mut app = app();
        app.on_map_clicked(Coords::new(1.0, 2.0));
        assert_eq!(app.pending_location(), None);
    }

    #[tokio::test]
    async fn test_submit_without_click_is_rejected() {
        let mut app = app();
        app.initialize().await.unwrap();

        let result = app.on_form_submitted(WorkoutInput::running(5.0, 25.0, 180.0));
        assert!(matches!(result, Err(AppError::NoPendingLocation)));
        assert!(app.workouts().is_empty());
    }

    #[tokio::test]
    async fn test_reset_fails_when_storage_cannot_be_cleared() {
        let storage = MemoryStore::new();
        let mut app = app_with_store(Box::new(StuckStore(storage.clone())));
        app.initialize().await.unwrap();
        app.on_map_clicked(Coords::new(27.0, 74.0));
        app.on_form_submitted(WorkoutInput::running(5.0, 25.0, 180.0))
            .unwrap();

        let result = app.reset().await;

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert_eq!(app.workouts().len(), 1);
        assert!(app.is_map_ready());
        assert!(storage.get(crate::db::keys::WORKOUTS).unwrap().is_some());
    }
}
