//! Boundary dispatcher
//!
//! The single place where a raised failure is terminated. The dispatcher
//! classifies the failure, logs its full diagnostic representation with the
//! cause chain, selects a response status from an ordered policy and builds
//! the response body through the error mapper.
//!
//! Only functional errors and interface violations ever reveal detail to the
//! caller. Technical and unclassified failures produce an empty 500.
//!
//! # Status policy
//!
//! First match wins:
//!
//! | Failure | Status | Body |
//! |---|---|---|
//! | functional, `NOT_FOUND` | 404 | yes |
//! | functional, `INVALID_FORMAT` | 400 | yes |
//! | functional, `UNAUTHORIZED` | 401 | yes |
//! | functional, `FORBIDDEN` | 403 | yes |
//! | functional, any other code | 400 | yes |
//! | interface violation | 400 | yes |
//! | anything else | 500 | no |

use std::error::Error;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use error_kernel::{
    mapper::{map_functional, map_interface_violation},
    BasicErrorCode, ErrorDocument, FunctionalCode, FunctionalError, InterfaceViolation,
    Retriability, ServiceError, TechnicalError,
};
use tracing::error;
use uuid::Uuid;

/// Media type of error response bodies
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Status of functional errors, scanned in order
const FUNCTIONAL_STATUS_POLICY: [(BasicErrorCode, StatusCode); 4] = [
    (BasicErrorCode::NotFound, StatusCode::NOT_FOUND),
    (BasicErrorCode::InvalidFormat, StatusCode::BAD_REQUEST),
    (BasicErrorCode::Unauthorized, StatusCode::UNAUTHORIZED),
    (BasicErrorCode::Forbidden, StatusCode::FORBIDDEN),
];

/// Status of functional errors whose code is not in the policy
const FUNCTIONAL_DEFAULT_STATUS: StatusCode = StatusCode::BAD_REQUEST;

/// Transport-agnostic description of the failed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub method: String,
    pub path: String,
    pub received_at: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context with a fresh request id
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            method: method.into(),
            path: path.into(),
            received_at: Utc::now(),
        }
    }

    pub fn with_request_id(self, request_id: Uuid) -> Self {
        Self { request_id, ..self }
    }
}

/// A raised failure sorted into its kind
#[derive(Debug, Clone, Copy)]
pub enum Failure<'a> {
    Functional(&'a FunctionalError),
    Technical(&'a TechnicalError),
    Interface(&'a InterfaceViolation),
    Unclassified(&'a (dyn Error + 'static)),
}

impl<'a> Failure<'a> {
    /// Classifies a raised failure by its concrete type
    pub fn classify(failure: &'a (dyn Error + 'static)) -> Self {
        if let Some(error) = failure.downcast_ref::<FunctionalError>() {
            Failure::Functional(error)
        } else if let Some(error) = failure.downcast_ref::<TechnicalError>() {
            Failure::Technical(error)
        } else if let Some(error) = failure.downcast_ref::<ServiceError>() {
            match error {
                ServiceError::Functional(error) => Failure::Functional(error),
                ServiceError::Technical(error) => Failure::Technical(error),
            }
        } else if let Some(violation) = failure.downcast_ref::<InterfaceViolation>() {
            Failure::Interface(violation)
        } else {
            Failure::Unclassified(failure)
        }
    }

    /// Returns the kind name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Failure::Functional(_) => "functional",
            Failure::Technical(_) => "technical",
            Failure::Interface(_) => "interface",
            Failure::Unclassified(_) => "unclassified",
        }
    }

    pub fn retriability(&self) -> Option<Retriability> {
        match self {
            Failure::Technical(error) => Some(error.retriability()),
            _ => None,
        }
    }

    /// Selects the response status
    pub fn status(&self) -> StatusCode {
        match self {
            Failure::Functional(error) => functional_status(error.code()),
            Failure::Interface(_) => StatusCode::BAD_REQUEST,
            Failure::Technical(_) | Failure::Unclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Selects the status of a functional error from its code
pub fn functional_status(code: &FunctionalCode) -> StatusCode {
    FUNCTIONAL_STATUS_POLICY
        .iter()
        .find(|(basic, _)| code == basic)
        .map(|(_, status)| *status)
        .unwrap_or(FUNCTIONAL_DEFAULT_STATUS)
}

/// Status and optional body produced for a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryResponse {
    pub status: StatusCode,
    pub body: Option<ErrorDocument>,
}

impl BoundaryResponse {
    /// A response revealing nothing about the failure
    pub fn withheld() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: None,
        }
    }
}

/// Builds the response for a classified failure without side effects
pub fn resolve(failure: &Failure<'_>) -> BoundaryResponse {
    let body = match failure {
        Failure::Functional(error) => Some(map_functional(error)),
        Failure::Interface(violation) => Some(map_interface_violation(violation)),
        Failure::Technical(_) | Failure::Unclassified(_) => None,
    };

    match body {
        Some(body) => BoundaryResponse {
            status: failure.status(),
            body: Some(body),
        },
        None => BoundaryResponse::withheld(),
    }
}

/// Terminates a raised failure
///
/// Logs the failure, then returns the status and body to send back.
///
/// # Example
///
/// ```rust
/// use axum::http::StatusCode;
/// use error_kernel::basic;
/// use interface_api::boundary::{dispatch, RequestContext};
///
/// let context = RequestContext::new("GET", "/api/v1/persons/42");
/// let response = dispatch(&basic::not_found(), &context);
///
/// assert_eq!(response.status, StatusCode::NOT_FOUND);
/// assert!(response.body.is_some());
/// ```
pub fn dispatch(failure: &(dyn Error + 'static), context: &RequestContext) -> BoundaryResponse {
    let classified = Failure::classify(failure);
    let response = resolve(&classified);
    log_failure(&classified, failure, response.status, context);
    response
}

/// Terminates violations reported by request validation
pub fn dispatch_violation(violation: &InterfaceViolation, context: &RequestContext) -> BoundaryResponse {
    dispatch(violation, context)
}

/// Collects the display text of every error in the source chain
pub fn cause_chain(failure: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes = Vec::new();
    let mut current = failure.source();
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }
    causes
}

fn log_failure(
    classified: &Failure<'_>,
    failure: &(dyn Error + 'static),
    status: StatusCode,
    context: &RequestContext,
) {
    let causes = cause_chain(failure);

    error!(
        request_id = %context.request_id,
        method = %context.method,
        path = %context.path,
        status = status.as_u16(),
        kind = classified.kind(),
        retriability = classified.retriability().map(|r| r.name()),
        causes = ?causes,
        "{}",
        failure
    );
}

impl IntoResponse for BoundaryResponse {
    fn into_response(self) -> Response {
        let Some(body) = self.body else {
            return self.status.into_response();
        };

        match serde_json::to_vec(&body) {
            Ok(bytes) => (
                self.status,
                [(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON))],
                Body::from(bytes),
            )
                .into_response(),
            Err(err) => {
                error!(error = %err, "Failed to serialize error document");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
