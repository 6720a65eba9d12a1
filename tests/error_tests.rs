// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use go_tracker::error::AppError;

#[test]
fn test_user_notices_for_visible_errors() {
    let err = AppError::PositioningDenied("denied".to_string());
    assert_eq!(err.user_notice(), Some(AppError::POSITION_NOTICE));

    let err = AppError::InvalidInput("distance: must be greater than zero".to_string());
    assert_eq!(err.user_notice(), Some(AppError::INVALID_INPUT_NOTICE));
}

#[test]
fn test_silent_errors_have_no_notice() {
    assert_eq!(
        AppError::CorruptPersistedData("eof".to_string()).user_notice(),
        None
    );
    assert_eq!(AppError::NoPendingLocation.user_notice(), None);
    assert_eq!(AppError::Storage("disk full".to_string()).user_notice(), None);
    assert_eq!(
        AppError::Internal(anyhow::anyhow!("boom")).user_notice(),
        None
    );
}
