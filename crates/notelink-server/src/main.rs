//! Entry point for the notelink-server binary.

use std::sync::Arc;

use axum::middleware;
use notelink_server::{
    config::{ConfigError, ServerConfig},
    middleware::request_id::{propagate_request_id, request_id_layer},
    routes,
    state::AppState,
};
use notelink_store::{Store, StoreConfig};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!("Starting notelink-server");
    tracing::info!(
        "Configuration: addr={}, log_level={}, request_timeout={:?}",
        config.socket_addr(),
        config.log_level,
        config.request_timeout()
    );

    // Connect to database
    let store_config = StoreConfig::from_env()?;
    let store = Store::connect(store_config).await?;
    tracing::info!("Connected to database");

    let state = AppState::new(Arc::new(store), config.clone());

    let cors = build_cors_layer(&config.cors_allowed_origins)?;

    let app = routes::build_router(state)
        .layer(middleware::from_fn(propagate_request_id))
        .layer(request_id_layer())
        .layer(cors)
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Build CORS layer from configuration.
fn build_cors_layer(allowed_origins: &str) -> Result<CorsLayer, ConfigError> {
    if allowed_origins == "*" {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = allowed_origins
        .split(',')
        .map(|origin| {
            origin
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "CORS_ALLOWED_ORIGINS".to_string(),
                    reason: format!("invalid origin: {}", origin.trim()),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
