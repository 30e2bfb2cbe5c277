//! Error taxonomy for the HTTP surface.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::users::repo::StoreError;

pub type Result<T> = std::result::Result<T, AppError>;

pub const NOT_FOUND_MESSAGE: &str = "User doesn't exist.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing '{0}' in request body")]
    MissingField(&'static str),

    #[error("'{0}' must be a string")]
    InvalidField(&'static str),

    #[error("{0}")]
    InvalidPassword(&'static str),

    #[error("Email already taken")]
    DuplicateEmail,

    #[error("{0}")]
    MalformedBody(String),

    #[error("User doesn't exist.")]
    NotFound,

    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailTaken => AppError::DuplicateEmail,
            StoreError::Database(e) => AppError::Internal(e.into()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingField(_)
            | AppError::InvalidField(_)
            | AppError::InvalidPassword(_)
            | AppError::DuplicateEmail
            | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::NotFound => json!({ "error": { "message": NOT_FOUND_MESSAGE } }),
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "request failed with internal error");
                json!({ "error": { "message": "server error" } })
            }
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_field_names_the_field() {
        let (status, body) = body_json(AppError::MissingField("last_name")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Missing 'last_name' in request body" }));
    }

    #[tokio::test]
    async fn not_found_uses_nested_message() {
        let (status, body) = body_json(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": { "message": "User doesn't exist." } }));
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let err = AppError::Internal(anyhow::anyhow!("pool timed out"));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.to_string().contains("pool timed out"));
    }

    #[test]
    fn email_conflict_from_store_is_duplicate_email() {
        let err: AppError = StoreError::EmailTaken.into();
        assert!(matches!(err, AppError::DuplicateEmail));
        assert_eq!(err.to_string(), "Email already taken");
    }
}
