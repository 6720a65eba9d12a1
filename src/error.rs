// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types and the notices they surface to the user.

/// Application error type.
///
/// None of these are fatal: the controller handles each one and returns to an
/// interactive state.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Positioning unavailable: {0}")]
    PositioningDenied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Stored workouts could not be read: {0}")]
    CorruptPersistedData(String),

    #[error("No map location selected")]
    NoPendingLocation,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub const POSITION_NOTICE: &'static str = "Please give access to your location";
    pub const INVALID_INPUT_NOTICE: &'static str = "Invalid input: values must be positive numbers";

    /// Text to show the user, or `None` for errors that are recovered silently.
    pub fn user_notice(&self) -> Option<&'static str> {
        match self {
            AppError::PositioningDenied(_) => Some(Self::POSITION_NOTICE),
            AppError::InvalidInput(_) => Some(Self::INVALID_INPUT_NOTICE),
            AppError::CorruptPersistedData(_)
            | AppError::NoPendingLocation
            | AppError::Storage(_)
            | AppError::Internal(_) => None,
        }
    }
}

/// Result type alias for controller operations
pub type Result<T> = std::result::Result<T, AppError>;
