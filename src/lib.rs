// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GoTracker: log runs and rides by marking them on a map.
//!
//! This crate provides the workout model, the controller that turns map
//! clicks and form input into logged workouts, and the persistence and
//! rendering that keep storage, map markers and the workout list in sync.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod ports;
pub mod services;
pub mod time_utils;

pub use app::{App, AppEvent};
pub use config::{Config, MapSettings};
pub use ports::Ports;
