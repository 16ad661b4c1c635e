//! Tests for `AppError` -> HTTP response mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use gameshelf_server::error::AppError;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn authentication_error_returns_401() {
    let (status, json) = error_to_response(AppError::Authentication("User not found".into())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], 2);
    assert_eq!(json["message"], "User not found");
}

#[tokio::test]
async fn conflict_error_returns_400() {
    let (status, json) = error_to_response(AppError::Conflict("Game already in your list".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Duplicate");
    assert_eq!(json["message"], "Game already in your list");
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let (status, json) = error_to_response(AppError::NotFound("Game not found in your list".into())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "NoSuchEntry");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let (status, json) = error_to_response(AppError::Validation("Invalid game status: X".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "BadValue");
}

#[tokio::test]
async fn internal_error_is_sanitized() {
    let (status, json) = error_to_response(AppError::Internal("connection string leaked".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Internal server error");
}

#[tokio::test]
async fn database_error_is_sanitized() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "DbFailure");
    assert_eq!(json["message"], "Database error");
}

#[test]
fn non_database_insert_failure_stays_database_error() {
    let err = AppError::from_insert(sqlx::Error::RowNotFound, "dup");
    assert!(matches!(err, AppError::Database(_)));
}
