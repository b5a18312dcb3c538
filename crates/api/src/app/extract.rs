//! Shape-validating extractors.
//!
//! `ValidatedJson<T>` and `ValidatedQuery<T>` run before any handler code:
//! they deserialize the input, then check the constraints declared by `T`'s
//! [`Validate`] impl. Every failure is answered with 422 and field details,
//! so handlers only ever see well-formed input.

use axum::{
    async_trait,
    extract::{
        FromRequest, FromRequestParts, Json, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::app::errors::{self, FieldViolation};

/// Declared field constraints for a request type.
///
/// Validation consumes the raw input and yields the checked value handlers
/// work with.
pub trait Validate: Sized {
    type Valid;

    fn validate(self) -> Result<Self::Valid, Vec<FieldViolation>>;
}

/// JSON body that deserialized and passed [`Validate`].
pub struct ValidatedJson<T: Validate>(pub T::Valid);

/// Query string that deserialized and passed [`Validate`].
pub struct ValidatedQuery<T: Validate>(pub T::Valid);

/// Rejection produced by the validating extractors (always HTTP 422).
#[derive(Debug)]
pub struct ValidationRejection {
    message: String,
    details: Vec<FieldViolation>,
}

impl ValidationRejection {
    fn from_violations(details: Vec<FieldViolation>) -> Self {
        let message = details
            .iter()
            .map(|d| format!("{}: {}", d.field, d.message))
            .collect::<Vec<_>>()
            .join("; ");
        Self { message, details }
    }

    fn from_json(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();
        let field = field_from_serde_message(&text).unwrap_or_else(|| "body".to_string());
        Self {
            message: text.clone(),
            details: vec![FieldViolation::new(field, text)],
        }
    }

    fn from_query(rejection: QueryRejection) -> Self {
        let text = rejection.body_text();
        let field = field_from_serde_message(&text).unwrap_or_else(|| "query".to_string());
        Self {
            message: text.clone(),
            details: vec![FieldViolation::new(field, text)],
        }
    }
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        tracing::warn!(message = %self.message, "request rejected by shape validation");
        errors::validation_error(self.message, self.details)
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::from_json)?;
        let valid = value.validate().map_err(ValidationRejection::from_violations)?;
        Ok(Self(valid))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::from_query)?;
        let valid = value.validate().map_err(ValidationRejection::from_violations)?;
        Ok(Self(valid))
    }
}

/// Best-effort field name from a serde error message.
///
/// Handles `missing field `name`` and path-prefixed errors such as
/// `price: invalid type: string "abc", expected f64`.
fn field_from_serde_message(text: &str) -> Option<String> {
    if let Some(rest) = text.split("missing field `").nth(1) {
        return rest.split('`').next().map(str::to_string);
    }

    // Drop axum's "Failed to deserialize ...: " lead-in, then look for a path prefix.
    let detail = text.split_once("target type: ").map(|(_, d)| d)?;
    let (path, _) = detail.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    is_path.then(|| path.to_string())
}
