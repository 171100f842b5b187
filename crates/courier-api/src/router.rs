//! Route definitions for the Courier HTTP API.
//!
//! Notification routes are mounted under `/api` behind the bearer-token
//! middleware; the health check stays public. The body limit bounds
//! attachment-heavy submissions at the shared 32 MiB message cap.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::middleware as axum_middleware;
use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use courier_core::config::CorsConfig;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes as usize;
    let cors = build_cors_layer(&state.config.server.cors);

    let api_routes = notification_routes().layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::auth::require_auth,
    ));

    Router::new()
        .route("/healthz", get(handlers::health::healthz))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Notification lifecycle endpoints.
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            post(handlers::notification::send_notification)
                .get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/{id}",
            get(handlers::notification::get_notification_status),
        )
        .route(
            "/notifications/{id}/schedule",
            patch(handlers::notification::reschedule_notification),
        )
        .route(
            "/notifications/{id}/cancel",
            post(handlers::notification::cancel_notification),
        )
}

/// CORS layer from configuration. An empty origin list is permissive.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
