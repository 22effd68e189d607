//! HTTP error type and its JSON rendering.
//!
//! Every failure leaves the server as `{ "message": ..., "code": ... }` where
//! `code` is one of a small set of stable strings clients can switch on.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use linkup_core::error::CoreError;
use serde::Serialize;

/// Error returned by handlers and extractors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain rule violation from `linkup_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Body, query, or path that could not be parsed into the handler's
    /// input type.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Logged in full, reported to the client as a generic 500.
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    code: &'static str,
}

impl ErrorBody {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    fn internal() -> Self {
        Self::new("INTERNAL_ERROR", "Internal server error")
    }
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Core(err) => core_status_and_body(err),
            AppError::Database(err) => sqlx_status_and_body(err),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorBody::new("BAD_REQUEST", msg.as_str()))
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

fn core_status_and_body(err: &CoreError) -> (StatusCode, ErrorBody) {
    match err {
        CoreError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("NOT_FOUND", err.to_string()),
        ),
        CoreError::Validation(msg) => (
            StatusCode::BAD_REQUEST,
            ErrorBody::new("VALIDATION_ERROR", msg.as_str()),
        ),
        CoreError::Conflict(msg) => {
            (StatusCode::CONFLICT, ErrorBody::new("CONFLICT", msg.as_str()))
        }
        CoreError::Unauthorized(msg) => (
            StatusCode::UNAUTHORIZED,
            ErrorBody::new("UNAUTHORIZED", msg.as_str()),
        ),
        CoreError::Forbidden(msg) => {
            (StatusCode::FORBIDDEN, ErrorBody::new("FORBIDDEN", msg.as_str()))
        }
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal domain error");
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
        }
    }
}

/// `RowNotFound` is 404 and a unique violation on a `uq_*` constraint or
/// index is 409. Anything else is logged and hidden behind a 500.
fn sqlx_status_and_body(err: &sqlx::Error) -> (StatusCode, ErrorBody) {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            ErrorBody::new("NOT_FOUND", "Resource not found"),
        );
    }

    let conflict = err
        .as_database_error()
        .filter(|db_err| db_err.is_unique_violation())
        .and_then(|db_err| db_err.constraint())
        .filter(|name| name.starts_with("uq_"));

    match conflict {
        Some(constraint) => (
            StatusCode::CONFLICT,
            ErrorBody::new("CONFLICT", conflict_message(constraint)),
        ),
        None => {
            tracing::error!(error = %err, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
        }
    }
}

/// Client-facing text for the unique constraints a request can trip.
fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_users_username" => "Username is already taken".to_string(),
        "uq_users_email" => "Email is already registered".to_string(),
        "uq_connection_requests_live_pair" => {
            "A connection or pending request already exists between these users".to_string()
        }
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}
