// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn core_not_found_maps_to_not_found() {
    let err: AppError = intake_core::Error::RequestNotFound(3).into();
    assert!(matches!(err, AppError::NotFound(3)));
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[test]
fn other_core_errors_are_internal() {
    let err: AppError = intake_core::Error::CorruptedData("row".into()).into();
    assert!(matches!(err, AppError::Internal(_)));
    assert_eq!(
        err.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn missing_config_names_the_key() {
    let err = Error::MissingConfig("INTAKE_ADMIN_USER");
    assert!(err.to_string().contains("INTAKE_ADMIN_USER"));
}
