use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::json;

use pharmacy_core::DomainError;

/// Field-level detail attached to a 422 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn from_domain(field: impl Into<String>, err: &DomainError) -> Self {
        Self::new(field, err.message())
    }
}

/// Business-rule failure raised by handler logic (HTTP 400).
pub fn invalid_argument(err: &DomainError) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_argument", err.message())
}

pub fn validation_error(
    message: impl Into<String>,
    details: Vec<FieldViolation>,
) -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(json!({
            "error": "validation_error",
            "message": message.into(),
            "details": details,
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
