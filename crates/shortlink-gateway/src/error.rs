use crate::model::ErrorResponse;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shortlink_core::StoreError;
use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("malformed request body: {0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Store(err) => match err {
                StoreError::InvalidUrl(_)
                | StoreError::InvalidValidity(_)
                | StoreError::InvalidShortCode(_) => StatusCode::BAD_REQUEST,
                StoreError::ShortCodeCollision(_) => StatusCode::CONFLICT,
                StoreError::GenerationExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Store(err) => err.kind(),
            AppError::BadRequest(_) => "bad_request",
            AppError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Internal(detail) => {
                error!(detail = %detail, "request failed");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error: self.kind().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
