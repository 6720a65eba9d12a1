// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Projection of workouts onto the map and the workout list.
//!
//! Both surfaces are append-only: every call adds one marker or one list
//! entry, in call order, and nothing is ever diffed or removed.

use crate::models::{Activity, ActivityKind, Coords, KindMetrics};
use crate::ports::{ListView, MapWidget};
use serde::Serialize;
use std::fmt::Write as _;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const POPUP_MAX_WIDTH: u32 = 250;
const POPUP_MIN_WIDTH: u32 = 200;

/// Display options for a marker popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

impl PopupOptions {
    fn for_kind(kind: ActivityKind) -> Self {
        Self {
            max_width: POPUP_MAX_WIDTH,
            min_width: POPUP_MIN_WIDTH,
            auto_close: false,
            close_on_click: false,
            class_name: format!("{}-popup", kind),
        }
    }
}

/// A map marker with its popup, opened as soon as it is placed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub coords: Coords,
    pub popup_content: String,
    pub options: PopupOptions,
    pub open: bool,
}

/// One icon/value/unit row of a list entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export))]
pub struct DetailRow {
    pub icon: String,
    pub value: String,
    pub unit: String,
}

impl DetailRow {
    fn new(icon: &str, value: String, unit: &str) -> Self {
        Self {
            icon: icon.to_string(),
            value,
            unit: unit.to_string(),
        }
    }
}

/// A workout as shown in the list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export))]
pub struct ListEntry {
    pub id: String,
    pub kind: ActivityKind,
    pub title: String,
    pub rows: Vec<DetailRow>,
}

impl ListEntry {
    /// Render the entry as the `<li>` markup used by the browser list view.
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<li class=\"workout workout--{}\" data-id=\"{}\">\n  <h2 class=\"workout__title\">{}</h2>\n",
            self.kind,
            escape_html(&self.id),
            escape_html(&self.title)
        );
        for row in &self.rows {
            // write! to a String cannot fail
            let _ = write!(
                html,
                "  <div class=\"workout__details\">\n    <span class=\"workout__icon\">{}</span>\n    <span class=\"workout__value\">{}</span>\n    <span class=\"workout__unit\">{}</span>\n  </div>\n",
                row.icon,
                escape_html(&row.value),
                row.unit
            );
        }
        html.push_str("</li>");
        html
    }
}

/// Print a number the way a form shows it: no trailing `.0` on whole values.
fn format_number(value: f64) -> String {
    format!("{}", value)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the marker for an activity.
pub fn marker_for(activity: &Activity) -> Marker {
    let kind = activity.kind();
    Marker {
        coords: activity.coords(),
        popup_content: format!("{} {}", kind.icon(), activity.description()),
        options: PopupOptions::for_kind(kind),
        open: true,
    }
}

/// Build the list entry for an activity.
pub fn list_entry_for(activity: &Activity) -> ListEntry {
    let kind = activity.kind();
    let mut rows = vec![
        DetailRow::new(kind.icon(), format_number(activity.distance()), "km"),
        DetailRow::new("⏱", format_number(activity.duration()), "min"),
    ];

    match *activity.metrics() {
        KindMetrics::Running { cadence, pace } => {
            rows.push(DetailRow::new("⚡️", format!("{:.1}", pace), "min/km"));
            rows.push(DetailRow::new("🦶🏼", format_number(cadence.round()), "spm"));
        }
        KindMetrics::Cycling {
            elevation_gain,
            speed,
        } => {
            rows.push(DetailRow::new("⚡️", format!("{:.1}", speed), "km/h"));
            rows.push(DetailRow::new("⛰", format_number(elevation_gain), "m"));
        }
    }

    ListEntry {
        id: activity.id().to_string(),
        kind,
        title: activity.description().to_string(),
        rows,
    }
}

/// Place a marker for the activity on the map.
pub fn project_marker(map: &mut dyn MapWidget, activity: &Activity) {
    let marker = marker_for(activity);
    tracing::debug!(id = %activity.id(), coords = %marker.coords, "Placing marker");
    map.add_marker(&marker);
}

/// Append the activity to the workout list.
pub fn project_list_entry(list: &mut dyn ListView, activity: &Activity) {
    list.append(&list_entry_for(activity));
}
