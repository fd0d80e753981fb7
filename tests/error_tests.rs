// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error response mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use fitness_site::error::AppError;
use fitness_site::services::{ApiError, ServiceError};
use serde_json::{json, Value};

async fn into_parts(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_bad_request_carries_details() {
    let (status, body) = into_parts(AppError::BadRequest("missing field".to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "bad_request", "details": "missing field"}));
}

#[tokio::test]
async fn test_service_error_is_bad_gateway() {
    let err: AppError = ServiceError::from(ApiError::Status(503)).into();
    let (status, body) = into_parts(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": "service_error"}));
}

#[tokio::test]
async fn test_internal_error_hides_cause() {
    let err: AppError = anyhow::anyhow!("disk on fire").into();
    let (status, body) = into_parts(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "internal_error"}));
}

#[test]
fn test_status_error_message() {
    let err = ServiceError::from(ApiError::Status(404));
    assert_eq!(err.to_string(), "HTTP error! status: 404");
}
