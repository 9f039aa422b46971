//! Case Portal - API Server Binary
//!
//! This binary starts the HTTP API server for the case portal.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin case-portal-api
//!
//! # Run with environment variables
//! PORTAL_PORT=9000 PORTAL_JWT_SECRET=... cargo run --bin case-portal-api
//! ```
//!
//! # Environment Variables
//!
//! * `PORTAL_HOST` - Server host (default: 0.0.0.0)
//! * `PORTAL_PORT` - Server port (default: 8080)
//! * `PORTAL_JWT_SECRET` - JWT signing secret (required in production)
//! * `PORTAL_JWT_EXPIRATION_SECS` - Token lifetime in seconds (default: 7 days)
//! * `PORTAL_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `PORTAL_CORS_ORIGINS` - Comma-separated allowed origins (default: `*`)
//! * `PORTAL_ADMIN_EMAIL` / `PORTAL_ADMIN_PASSWORD` - Admin login created at startup

use std::net::SocketAddr;
use std::sync::Arc;

use domain_case::{CaseService, InMemoryAccountDirectory, InMemoryCaseStore, InMemoryDocumentStore};
use interface_api::{config::ApiConfig, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, wires the in-memory adapters,
/// seeds the admin login and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration in the environment is malformed
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting case portal API server"
    );

    let service = build_service(&config).await;

    let app = create_router(service, config.clone());

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Wires the case service over in-memory adapters and seeds the admin login.
async fn build_service(config: &ApiConfig) -> CaseService {
    let directory = Arc::new(InMemoryAccountDirectory::new());
    let admin = directory
        .seed_admin(&config.admin_email, &config.admin_password)
        .await;
    tracing::info!(email = %admin.email, "Admin account ready");

    CaseService::new(
        Arc::new(InMemoryCaseStore::new()),
        Arc::new(InMemoryDocumentStore::new()),
        directory,
    )
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
