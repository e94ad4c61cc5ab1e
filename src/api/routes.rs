//! Router configuration for the API.
//!
//! The HTTP surface is deliberately narrow: the notification core is an
//! in-process API consumed by the platform's route handlers, and the only
//! things exposed over HTTP here are the health probe and the manual
//! reminder sweep trigger.

use axum::routing::get;
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// Middleware is applied in reverse order of declaration (last added runs
/// first), so request IDs exist before the logging layer reads them.
pub fn create_router(state: AppState) -> Router {
    let task_routes = Router::new().route("/send-reminders", get(handlers::tasks::send_reminders));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api/tasks", task_routes)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
