//! Handler error type
//!
//! Handlers return `Result<_, AppError>` and raise any error with `?`. The
//! failure is not translated here: it travels in the response extensions up
//! to the [`error_boundary`](crate::middleware::error_boundary) middleware,
//! which knows the request context and dispatches it.
//!
//! Without that middleware the caller receives an empty 500.

use std::error::Error;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Any failure raised by a handler or an extractor
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    /// Returns the raised failure for classification
    pub fn failure(&self) -> &(dyn Error + 'static) {
        let failure: &(dyn Error + Send + Sync + 'static) = self.0.as_ref();
        failure
    }

    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(error: E) -> Self {
        AppError(error.into())
    }
}

/// Failure carried from a handler response to the boundary middleware
#[derive(Debug, Clone)]
pub struct RaisedFailure(pub Arc<AppError>);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(RaisedFailure(Arc::new(self)));
        response
    }
}
