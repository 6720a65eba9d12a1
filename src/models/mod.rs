// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod input;

pub use activity::{describe, Activity, ActivityId, ActivityKind, Coords, KindMetrics};
pub use input::{FormValues, WorkoutInput};
