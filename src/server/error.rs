//! HTTP error mapping for the expense API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::models::ExpenseInputError;

/// Message returned when an update targets an unknown id.
pub const NOT_FOUND_MESSAGE: &str = "Expense not found";

/// Errors returned by the request handlers, rendered as `{"error": message}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
    Internal(AppError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::Internal(err)
    }
}

impl From<ExpenseInputError> for ApiError {
    fn from(err: ExpenseInputError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
