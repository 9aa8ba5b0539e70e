//! Validating extractors
//!
//! Bridges `validator` rules and framework rejections to interface
//! violations. Payload rules become field violations and query rules become
//! constraint violations. Unparseable query strings and path parameters are
//! type mismatches; anything else unreadable is reported as such. Every
//! rejection is an [`AppError`], so it reaches the error boundary like any
//! other failure.

use async_trait::async_trait;
use axum::{
    extract::{
        path::ErrorKind, rejection::PathRejection, FromRequest, FromRequestParts, Path, Query,
        Request,
    },
    http::request::Parts,
    Json,
};
use error_kernel::{ConstraintViolation, FieldViolation, InterfaceViolation};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::AppError;

/// JSON payload deserialized and validated
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| InterfaceViolation::unreadable(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| InterfaceViolation::payload(field_violations(&errors)))?;

        Ok(Self(value))
    }
}

/// Query string deserialized and validated
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                InterfaceViolation::type_mismatch(
                    "query",
                    parts.uri.query().unwrap_or_default(),
                    short_type_name::<T>(),
                )
            })?;

        value
            .validate()
            .map_err(|errors| InterfaceViolation::constraints(constraint_violations(&errors)))?;

        Ok(Self(value))
    }
}

/// Path parameters whose rejections reach the error boundary
///
/// Unparseable parameters become type mismatches, anything else an
/// unreadable request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(path_violation)?;

        Ok(Self(value))
    }
}

fn path_violation(rejection: PathRejection) -> InterfaceViolation {
    if let PathRejection::FailedToDeserializePathParams(error) = &rejection {
        match error.kind() {
            ErrorKind::ParseErrorAtKey { key, value, expected_type } => {
                return InterfaceViolation::type_mismatch(key.as_str(), value.as_str(), *expected_type);
            }
            ErrorKind::ParseError { value, expected_type } => {
                return InterfaceViolation::type_mismatch("path", value.as_str(), *expected_type);
            }
            _ => {}
        }
    }
    InterfaceViolation::unreadable(rejection.body_text())
}

/// Flattens validation errors into payload field violations
pub fn field_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    flatten(errors)
        .into_iter()
        .map(|(field, message)| FieldViolation::new(field, message))
        .collect()
}

/// Flattens validation errors into constraint violations
pub fn constraint_violations(errors: &ValidationErrors) -> Vec<ConstraintViolation> {
    flatten(errors)
        .into_iter()
        .map(|(path, message)| ConstraintViolation::new(path, message))
        .collect()
}

/// Collects `(path, message)` pairs, sorted by path
///
/// Nested structs produce dotted paths and lists indexed ones
/// (`addresses[0].city`).
fn flatten(errors: &ValidationErrors) -> Vec<(String, String)> {
    let mut violations = Vec::new();
    collect(errors, None, &mut violations);
    violations.sort();
    violations
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, violations: &mut Vec<(String, String)>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(errors) => {
                violations.extend(errors.iter().map(|error| (path.clone(), message_of(error))));
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, Some(&path), violations),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, Some(&format!("{}[{}]", path, index)), violations);
                }
            }
        }
    }
}

/// Returns the rule's message, or the default message of its constraint
fn message_of(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let param = |name: &str| error.params.get(name).map(render_param);

    match error.code.as_ref() {
        "length" => match (param("equal"), param("min"), param("max")) {
            (Some(equal), _, _) => format!("length must be {}", equal),
            (None, Some(min), Some(max)) => format!("length must be between {} and {}", min, max),
            (None, Some(min), None) => format!("length must be at least {}", min),
            (None, None, Some(max)) => format!("length must be at most {}", max),
            (None, None, None) => "invalid length".to_string(),
        },
        "range" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("must be between {} and {}", min, max),
            (Some(min), None) => format!("must be greater than or equal to {}", min),
            (None, Some(max)) => format!("must be less than or equal to {}", max),
            (None, None) => "out of range".to_string(),
        },
        "email" => "must be a well-formed email address".to_string(),
        "url" => "must be a valid URL".to_string(),
        "required" => "must not be null".to_string(),
        "regex" => "must match the expected pattern".to_string(),
        code => format!("failed '{}' validation", code),
    }
}

/// Type name without its module path
fn short_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

fn render_param(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
