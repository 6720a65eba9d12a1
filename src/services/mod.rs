// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - persistence and rendering.

pub mod persistence;
pub mod render;

pub use render::{ListEntry, Marker, PopupOptions};
