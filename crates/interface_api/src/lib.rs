//! HTTP API Layer
//!
//! This crate provides the REST API for the case portal using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for auth, client and admin routes
//! - **Middleware**: Bearer authentication, admin gate, audit logging
//! - **DTOs**: Request/Response bodies, shared with the portal client
//! - **Error Handling**: `{error, message}` bodies with mapped status codes
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_case::CaseService;

use crate::config::ApiConfig;
use crate::handlers::{admin, auth as auth_handlers, clients, health};
use crate::middleware::{audit_middleware, auth_middleware, require_admin};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: CaseService,
    pub config: ApiConfig,
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origin = match config.allowed_origins() {
        None => AllowOrigin::from(Any),
        Some(origins) => AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        ),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - Case service over the configured adapters
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(service: CaseService, config: ApiConfig) -> Router {
    let cors = cors_layer(&config);
    let state = AppState { service, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/auth/login", post(auth_handlers::login))
        .route("/api/clients/submit", post(clients::submit_application));

    // Admin routes
    let admin_routes = Router::new()
        .route("/clients", get(admin::list_clients))
        .route("/clients/:id", get(admin::get_client))
        .route("/clients/:id/status", patch(admin::update_status))
        .route("/stats", get(admin::stats))
        .layer(axum_middleware::from_fn(require_admin));

    // Authenticated API routes
    let api_routes = Router::new()
        .route("/auth/me", get(auth_handlers::me))
        .route("/clients/me/dashboard", get(clients::my_dashboard))
        .nest("/admin", admin_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
