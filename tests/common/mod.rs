// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use go_tracker::db::MemoryStore;
use go_tracker::models::{ActivityKind, Coords, FormValues};
use go_tracker::ports::{
    Clock, FormSurface, GeolocationProvider, ListView, MapWidget, Notifier, PanOptions, Ports,
    PositionError, SystemClock,
};
use go_tracker::services::{ListEntry, Marker};
use go_tracker::{App, MapSettings};
use std::sync::{Arc, Mutex};

/// Everything the test doubles observed.
#[derive(Debug)]
#[allow(dead_code)]
pub struct Recorded {
    pub position_requests: usize,
    pub views: Vec<(Coords, u8)>,
    pub listening: bool,
    pub markers: Vec<Marker>,
    pub pans: Vec<(Coords, u8, PanOptions)>,
    pub map_clears: usize,
    pub list: Vec<ListEntry>,
    pub list_clears: usize,
    pub notices: Vec<String>,
    pub form_values: FormValues,
    pub form_visible: bool,
    pub focus_count: usize,
    pub form_clears: usize,
    pub kind_fields: Vec<ActivityKind>,
}

impl Default for Recorded {
    fn default() -> Self {
        Self {
            position_requests: 0,
            views: Vec::new(),
            listening: false,
            markers: Vec::new(),
            pans: Vec::new(),
            map_clears: 0,
            list: Vec::new(),
            list_clears: 0,
            notices: Vec::new(),
            form_values: FormValues::new(ActivityKind::Running),
            form_visible: false,
            focus_count: 0,
            form_clears: 0,
            kind_fields: Vec::new(),
        }
    }
}

pub type Shared = Arc<Mutex<Recorded>>;

struct Position {
    result: Result<Coords, PositionError>,
    rec: Shared,
}

#[async_trait]
impl GeolocationProvider for Position {
    async fn current_position(&self) -> Result<Coords, PositionError> {
        self.rec.lock().unwrap().position_requests += 1;
        self.result.clone()
    }
}

struct Map(Shared);

impl MapWidget for Map {
    fn set_view(&mut self, center: Coords, zoom: u8) {
        self.0.lock().unwrap().views.push((center, zoom));
    }

    fn listen_for_clicks(&mut self) {
        self.0.lock().unwrap().listening = true;
    }

    fn add_marker(&mut self, marker: &Marker) {
        self.0.lock().unwrap().markers.push(marker.clone());
    }

    fn pan_to(&mut self, center: Coords, zoom: u8, options: PanOptions) {
        self.0.lock().unwrap().pans.push((center, zoom, options));
    }

    fn clear(&mut self) {
        let mut rec = self.0.lock().unwrap();
        rec.map_clears += 1;
        rec.markers.clear();
        rec.listening = false;
    }
}

struct Form(Shared);

impl FormSurface for Form {
    fn values(&self) -> FormValues {
        self.0.lock().unwrap().form_values.clone()
    }

    fn show(&mut self) {
        self.0.lock().unwrap().form_visible = true;
    }

    fn hide(&mut self) {
        self.0.lock().unwrap().form_visible = false;
    }

    fn clear(&mut self) {
        let mut rec = self.0.lock().unwrap();
        rec.form_clears += 1;
        let kind = rec.form_values.kind;
        rec.form_values = FormValues::new(kind);
    }

    fn focus_distance(&mut self) {
        self.0.lock().unwrap().focus_count += 1;
    }

    fn show_kind_fields(&mut self, kind: ActivityKind) {
        self.0.lock().unwrap().kind_fields.push(kind);
    }
}

struct List(Shared);

impl ListView for List {
    fn append(&mut self, entry: &ListEntry) {
        self.0.lock().unwrap().list.push(entry.clone());
    }

    fn clear(&mut self) {
        let mut rec = self.0.lock().unwrap();
        rec.list_clears += 1;
        rec.list.clear();
    }
}

struct Alerts(Shared);

impl Notifier for Alerts {
    fn notify(&mut self, message: &str) {
        self.0.lock().unwrap().notices.push(message.to_string());
    }
}

/// Clock pinned to one instant.
#[allow(dead_code)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// A controller wired to recording doubles.
#[allow(dead_code)]
pub struct Harness {
    pub app: App,
    pub rec: Shared,
    pub storage: MemoryStore,
}

/// Build a harness whose geolocation resolves to `position`.
#[allow(dead_code)]
pub fn harness(position: Result<Coords, PositionError>) -> Harness {
    harness_with(position, MemoryStore::new(), Box::new(SystemClock))
}

/// Build a harness over an existing store and clock.
#[allow(dead_code)]
pub fn harness_with(
    position: Result<Coords, PositionError>,
    storage: MemoryStore,
    clock: Box<dyn Clock>,
) -> Harness {
    let rec: Shared = Arc::new(Mutex::new(Recorded::default()));
    let ports = Ports {
        geolocation: Box::new(Position {
            result: position,
            rec: rec.clone(),
        }),
        map: Box::new(Map(rec.clone())),
        form: Box::new(Form(rec.clone())),
        list: Box::new(List(rec.clone())),
        notifier: Box::new(Alerts(rec.clone())),
        storage: Box::new(storage.clone()),
        clock,
    };

    Harness {
        app: App::new(MapSettings::default(), ports),
        rec,
        storage,
    }
}

/// Home position used by most tests.
#[allow(dead_code)]
pub fn home() -> Coords {
    Coords::new(27.0, 74.0)
}

/// Parse an RFC 3339 timestamp.
#[allow(dead_code)]
pub fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("valid timestamp")
}
