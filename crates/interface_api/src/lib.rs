//! HTTP API Layer
//!
//! This crate terminates raised errors at the HTTP boundary using Axum.
//!
//! # Architecture
//!
//! - **Boundary**: Classifies failures, logs them and selects the response
//! - **Middleware**: Error boundary, panic capture, audit logging
//! - **Extractors**: Request validation reported as interface violations
//! - **Handlers**: A small person directory exercising every failure kind
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, directory::PersonDirectory};
//!
//! let app = create_router(PersonDirectory::new(), config);
//! axum::serve(listener, app).await?;
//! ```

pub mod boundary;
pub mod config;
pub mod directory;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::directory::PersonDirectory;
use crate::handlers::{health, persons};
use crate::middleware::{audit_middleware, error_boundary, handle_panic};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: PersonDirectory,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `directory` - Person store
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(directory: PersonDirectory, config: ApiConfig) -> Router {
    let state = AppState { directory, config };

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Person routes
    let person_routes = Router::new()
        .route("/", post(persons::create_person).get(persons::list_persons))
        .route("/:id", get(persons::get_person).delete(persons::delete_person))
        .route("/:id/archive", post(persons::archive_person));

    let router = Router::new()
        .merge(public_routes)
        .nest("/api/v1/persons", person_routes)
        .method_not_allowed_fallback(persons::method_not_allowed)
        .fallback(persons::route_not_found)
        .with_state(state);

    with_error_boundary(router)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Wraps a router with the error boundary
///
/// Handler panics become fatal technical errors, every raised failure is
/// dispatched, and each request is audited with its final status.
pub fn with_error_boundary(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(axum_middleware::from_fn(error_boundary))
        .layer(axum_middleware::from_fn(audit_middleware))
}
