// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Datelike, FixedOffset, SecondsFormat};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English month name for a timestamp, in the timestamp's own offset.
pub fn month_name(date: &DateTime<FixedOffset>) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// "April 14" style calendar label.
pub fn month_day(date: &DateTime<FixedOffset>) -> String {
    format!("{} {}", month_name(date), date.day())
}

/// Format a timestamp as RFC3339 with millisecond precision, keeping its offset.
pub fn format_rfc3339_millis(date: &DateTime<FixedOffset>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}
