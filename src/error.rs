use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Body text returned for every 500, whatever the underlying cause.
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<mongodb::bson::oid::Error> for AppError {
    fn from(_: mongodb::bson::oid::Error) -> Self {
        AppError::Validation("Invalid id".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match self {
            AppError::NotFound(msg) | AppError::Conflict(msg) | AppError::Validation(msg) => msg,
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                return server_error_response();
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                return server_error_response();
            }
        };

        let body = json!({
            "error": error_message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

pub fn server_error_response() -> Response {
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    let body = json!({
        "message": SERVER_ERROR_MESSAGE,
        "status": status.as_u16(),
    });

    (status, Json(body)).into_response()
}

pub type AppResult<T> = Result<T, AppError>;
