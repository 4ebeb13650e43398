//! API Router configuration

use super::handlers;
use super::state::AppState;
use crate::config::ServerConfig;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main API router
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let api_routes = Router::new()
        // Health and status
        .route("/health", get(handlers::health_check))
        .route("/status", get(handlers::daemon_status))
        // Services
        .route("/services", get(handlers::get_services_by_system_version))
        .route("/services/deploy", post(handlers::deploy_service));

    // Build router with middleware
    let router = Router::new()
        .nest("/api/v1", api_routes)
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(TraceLayer::new_for_http());

    let router = if config.enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.with_state(state)
}
