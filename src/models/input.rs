// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout form input and its validation rules.

use crate::error::AppError;
use crate::models::ActivityKind;
use validator::{Validate, ValidationError};

/// Raw text as read from the input form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    pub kind: ActivityKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl FormValues {
    pub fn new(kind: ActivityKind) -> Self {
        Self {
            kind,
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation: String::new(),
        }
    }

    /// Coerce the text fields to numbers. Only the field that belongs to the
    /// selected kind is read for the kind-specific parameter.
    pub fn to_input(&self) -> WorkoutInput {
        let kind_param = match self.kind {
            ActivityKind::Running => &self.cadence,
            ActivityKind::Cycling => &self.elevation,
        };
        WorkoutInput {
            kind: self.kind,
            distance: parse_number(&self.distance),
            duration: parse_number(&self.duration),
            kind_param: parse_number(kind_param),
        }
    }
}

/// Number-input coercion: blank text is zero, anything unparsable is NaN.
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// Numeric workout parameters awaiting validation.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
#[validate(schema(function = "validate_kind_param"))]
pub struct WorkoutInput {
    pub kind: ActivityKind,
    /// Kilometers
    #[validate(custom(function = "positive_finite"))]
    pub distance: f64,
    /// Minutes
    #[validate(custom(function = "positive_finite"))]
    pub duration: f64,
    /// Cadence (steps/min) for running, elevation gain (m) for cycling
    pub kind_param: f64,
}

impl WorkoutInput {
    pub fn running(distance: f64, duration: f64, cadence: f64) -> Self {
        Self {
            kind: ActivityKind::Running,
            distance,
            duration,
            kind_param: cadence,
        }
    }

    pub fn cycling(distance: f64, duration: f64, elevation_gain: f64) -> Self {
        Self {
            kind: ActivityKind::Cycling,
            distance,
            duration,
            kind_param: elevation_gain,
        }
    }

    /// Check the input against the workout rules.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|e| AppError::InvalidInput(e.to_string()))
    }
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn positive_finite(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(rule_error("not_finite", "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(rule_error("not_positive", "must be greater than zero"));
    }
    Ok(())
}

/// Cadence follows the same rule as distance and duration. Elevation gain
/// may be zero (flat ride) but never negative.
fn validate_kind_param(input: &WorkoutInput) -> Result<(), ValidationError> {
    match input.kind {
        ActivityKind::Running => positive_finite(input.kind_param),
        ActivityKind::Cycling => {
            if !input.kind_param.is_finite() {
                Err(rule_error("not_finite", "elevation gain must be a finite number"))
            } else if input.kind_param < 0.0 {
                Err(rule_error("negative", "elevation gain cannot be negative"))
            } else {
                Ok(())
            }
        }
    }
}
