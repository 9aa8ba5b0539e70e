//! API middleware

use std::any::Any;

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use error_kernel::{params, TechnicalCode, TechnicalError};
use tracing::info;
use uuid::Uuid;

use crate::boundary::{dispatch, RequestContext};
use crate::error::{AppError, RaisedFailure};

/// Header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const HANDLER_PANICKED: TechnicalCode = TechnicalCode::from_static("HANDLER_PANICKED");

/// Error boundary middleware
///
/// Dispatches every failure raised below it and replaces the placeholder
/// response with the dispatched one.
pub async fn error_boundary(request: Request, next: Next) -> Response {
    let context = request_context(&request);

    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<RaisedFailure>() {
        Some(RaisedFailure(failure)) => dispatch(failure.failure(), &context).into_response(),
        None => response,
    }
}

/// Audit logging middleware
///
/// Logs all API requests for compliance and debugging
pub async fn audit_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request_id(request.headers());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        request_id = ?request_id,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}

/// Turns a handler panic into a fatal technical error
///
/// Used with `CatchPanicLayer::custom`. The error boundary then answers with
/// an empty 500 and logs the panic payload.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    let error = TechnicalError::new("request handler panicked: {}", params![detail])
        .with_code(HANDLER_PANICKED);

    AppError::from(error).into_response()
}

/// Builds the dispatcher context from an incoming request
pub fn request_context(request: &Request) -> RequestContext {
    let context = RequestContext::new(request.method().as_str(), request.uri().path());
    match request_id(request.headers()) {
        Some(request_id) => context.with_request_id(request_id),
        None => context,
    }
}

fn request_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
}
