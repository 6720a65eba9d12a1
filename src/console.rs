// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Terminal adapters and line commands for driving the controller from a shell.

use async_trait::async_trait;
use go_tracker::models::{Activity, ActivityId, ActivityKind, Coords, FormValues};
use go_tracker::ports::{
    FormSurface, GeolocationProvider, ListView, MapWidget, Notifier, PanOptions, PositionError,
};
use go_tracker::services::{ListEntry, Marker};
use go_tracker::AppEvent;
use std::cell::RefCell;
use std::rc::Rc;

/// Geolocation that reports a configured position, or denies access.
pub struct FixedPosition(Option<Coords>);

impl FixedPosition {
    pub fn new(position: Option<Coords>) -> Self {
        Self(position)
    }
}

#[async_trait]
impl GeolocationProvider for FixedPosition {
    async fn current_position(&self) -> Result<Coords, PositionError> {
        self.0.ok_or(PositionError::PermissionDenied)
    }
}

pub struct TerminalMap;

impl MapWidget for TerminalMap {
    fn set_view(&mut self, center: Coords, zoom: u8) {
        println!("🗺  Map centered on {} (zoom {})", center, zoom);
    }

    fn listen_for_clicks(&mut self) {
        println!("🗺  Click the map with: click <lat> <lng>");
    }

    fn add_marker(&mut self, marker: &Marker) {
        println!("📍 {} at {}", marker.popup_content, marker.coords);
    }

    fn pan_to(&mut self, center: Coords, zoom: u8, options: PanOptions) {
        println!(
            "🗺  Panning to {} (zoom {}, {}s)",
            center, zoom, options.duration_secs
        );
    }

    fn clear(&mut self) {
        println!("🗺  Map cleared");
    }
}

pub struct TerminalList;

impl ListView for TerminalList {
    fn append(&mut self, entry: &ListEntry) {
        let rows: Vec<String> = entry
            .rows
            .iter()
            .map(|r| format!("{} {} {}", r.icon, r.value, r.unit))
            .collect();
        println!("[{}] {}  {}", entry.id, entry.title, rows.join("  "));
    }

    fn clear(&mut self) {
        println!("(workout list cleared)");
    }
}

pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, message: &str) {
        println!("⚠️  {}", message);
    }
}

/// Form fields that can be typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl FormField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "distance" => Some(FormField::Distance),
            "duration" => Some(FormField::Duration),
            "cadence" => Some(FormField::Cadence),
            "elevation" => Some(FormField::Elevation),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct FormState {
    values: FormValues,
    visible: bool,
}

/// Form contents shared between the command loop and the controller.
#[derive(Debug, Clone)]
pub struct SharedForm(Rc<RefCell<FormState>>);

impl Default for SharedForm {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(FormState {
            values: FormValues::new(ActivityKind::Running),
            visible: false,
        })))
    }
}

impl SharedForm {
    pub fn set(&self, field: FormField, text: String) {
        let mut state = self.0.borrow_mut();
        if !state.visible {
            println!("(form is hidden; click the map first)");
        }
        let values = &mut state.values;
        match field {
            FormField::Distance => values.distance = text,
            FormField::Duration => values.duration = text,
            FormField::Cadence => values.cadence = text,
            FormField::Elevation => values.elevation = text,
        }
    }

    pub fn set_kind(&self, kind: ActivityKind) {
        self.0.borrow_mut().values.kind = kind;
    }
}

impl FormSurface for SharedForm {
    fn values(&self) -> FormValues {
        self.0.borrow().values.clone()
    }

    fn show(&mut self) {
        self.0.borrow_mut().visible = true;
        println!("📝 New workout: set distance/duration, then submit");
    }

    fn hide(&mut self) {
        self.0.borrow_mut().visible = false;
    }

    fn clear(&mut self) {
        let mut state = self.0.borrow_mut();
        let kind = state.values.kind;
        state.values = FormValues::new(kind);
    }

    fn focus_distance(&mut self) {
        println!("📝 distance (km)?");
    }

    fn show_kind_fields(&mut self, kind: ActivityKind) {
        let field = match kind {
            ActivityKind::Running => "cadence (spm)",
            ActivityKind::Cycling => "elevation (m)",
        };
        println!("📝 {} selected; extra field: {}", kind.label(), field);
    }
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(AppEvent),
    Kind(ActivityKind),
    Set(FormField, String),
    List,
    Help,
    Quit,
}

/// Parse one line of input. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match (verb, args.as_slice()) {
        ("click", [lat, lng]) => {
            let lat: f64 = lat.parse().map_err(|_| format!("bad latitude: {}", lat))?;
            let lng: f64 = lng.parse().map_err(|_| format!("bad longitude: {}", lng))?;
            Command::Event(AppEvent::MapClicked(Coords::new(lat, lng)))
        }
        ("kind", [kind]) => {
            Command::Kind(kind.parse::<ActivityKind>().map_err(|e| e.to_string())?)
        }
        ("set", [field, value]) => {
            let field =
                FormField::parse(field).ok_or_else(|| format!("unknown field: {}", field))?;
            Command::Set(field, value.to_string())
        }
        ("submit", []) => Command::Event(AppEvent::FormSubmitted),
        ("select", [id]) => Command::Event(AppEvent::ActivitySelected(ActivityId::from(*id))),
        ("reset", []) => Command::Event(AppEvent::Reset),
        ("list", []) => Command::List,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => return Err(format!("unrecognized command: {} (try help)", line.trim())),
    };
    Ok(Some(command))
}

pub fn print_help() {
    println!(
        "commands:\n  click <lat> <lng>\n  kind <running|cycling>\n  set <distance|duration|cadence|elevation> <value>\n  submit\n  select <id>\n  list\n  reset\n  quit"
    );
}

pub fn print_log(workouts: &[Activity]) {
    if workouts.is_empty() {
        println!("(no workouts)");
    }
    for w in workouts {
        println!("[{}] {} at {}", w.id(), w.description(), w.coords());
    }
}
