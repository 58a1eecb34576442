//! Application errors
//!
//! Every failure a handler can produce is an `AppError`; the conversion to
//! an HTTP response happens once, here, at the request boundary.

use std::borrow::Cow;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: &'static str,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Authentication(_) | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                ErrorResponse {
                    error: "Database Error".to_string(),
                    message: "An error occurred while accessing the database".to_string(),
                    details: None,
                    code: "DB_ERROR",
                }
            }

            AppError::Validation(e) => ErrorResponse {
                error: "Validation Error".to_string(),
                message: "Please correct the errors below.".to_string(),
                details: Some(json!(e)),
                code: "VALIDATION_ERROR",
            },

            AppError::Authentication(msg) => ErrorResponse {
                error: "Authentication Failed".to_string(),
                message: msg,
                details: None,
                code: "AUTHENTICATION_FAILED",
            },

            AppError::Unauthorized(msg) => ErrorResponse {
                error: "Unauthorized".to_string(),
                message: msg,
                details: Some(json!({ "login_url": "/login/" })),
                code: "UNAUTHORIZED",
            },

            AppError::NotFound(msg) => ErrorResponse {
                error: "Not Found".to_string(),
                message: msg,
                details: None,
                code: "NOT_FOUND",
            },

            AppError::BadRequest(msg) => ErrorResponse {
                error: "Bad Request".to_string(),
                message: msg,
                details: None,
                code: "BAD_REQUEST",
            },

            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "An unexpected error occurred".to_string(),
                    details: None,
                    code: "INTERNAL_ERROR",
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Single field error, reported the same way derived validation reports it.
pub fn validation_error(field: &'static str, message: impl Into<Cow<'static, str>>) -> AppError {
    AppError::Validation(field_errors(field, message))
}

pub fn field_errors(field: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationErrors {
    let mut error = ValidationError::new("invalid");
    error.message = Some(message.into());

    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}

pub fn not_found_error(resource: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Maps a unique-constraint failure on `table.column` to a field error;
/// everything else stays a database error.
pub fn map_unique_violation(
    err: sqlx::Error,
    constraints: &[(&str, &'static str, &'static str)],
) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            let message = db_err.message();
            for (column, field, text) in constraints {
                if message.contains(column) {
                    return validation_error(field, *text);
                }
            }
        }
    }
    AppError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_carries_field() {
        let err = validation_error("vehicle_number", "Vehicle with this number already exists.");
        match err {
            AppError::Validation(errors) => {
                let fields = errors.field_errors();
                let entry = fields.get("vehicle_number").unwrap();
                assert_eq!(
                    entry[0].message.as_deref(),
                    Some("Vehicle with this number already exists.")
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(not_found_error("Vehicle", 7).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Authentication("Invalid username or password.".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            validation_error("confirm", "required").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = not_found_error("Trip", 42);
        assert_eq!(err.to_string(), "Not found: Trip with id '42' not found");
    }
}
