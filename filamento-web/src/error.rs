//! Error types for filamento-web
//!
//! HTML pages fail with [`PageError`], rendered as the shared error page.
//! JSON endpoints fail with [`ApiError`], rendered as `{"error": {"code", "message"}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use filamento_common::Error as CommonError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::ui::layout;

/// Failure while producing an HTML page
#[derive(Debug, Error)]
pub enum PageError {
    /// Catalog/inventory layer failure
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl PageError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            PageError::Common(CommonError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            PageError::Common(CommonError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, format!("Not found: {}", msg))
            }
            PageError::Common(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred: {}", err),
            ),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, layout::error_page(&message)).into_response()
    }
}

/// Failure in a JSON endpoint
#[derive(Debug, Error)]
pub enum ApiError {
    /// Catalog layer failure
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Common(CommonError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            ApiError::Common(CommonError::NotFound(msg)) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Common(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                err.to_string(),
            ),
        };

        if status.is_server_error() {
            error!("API request failed: {}", message);
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for page handlers
pub type PageResult<T> = Result<T, PageError>;

/// Result type for JSON handlers
pub type ApiResult<T> = Result<T, ApiError>;
