//! Madcamp RS Server
//!
//! HTTP server binary: wires configuration, the database pool, the
//! progress calculator, and the API router together.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mc_api::AppState;
use mc_core::config::AppConfig;
use mc_db::{Database, DatabaseConfig};
use mc_progress::{DbProgressStore, HttpCompletionClient, ProgressCalculator, PromptLimits};

mod health;

use health::HealthState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        "Starting Madcamp RS"
    );

    let db_config = DatabaseConfig::from_settings(&config.database);
    let db = Database::connect(&db_config).await?;
    info!("Connected to database");

    let completion_client = HttpCompletionClient::new(&config.completion)
        .map_err(|e| anyhow::anyhow!("completion client init failed: {}", e))?;
    let calculator = Arc::new(ProgressCalculator::new(
        Arc::new(DbProgressStore::new(db.pool().clone())),
        Arc::new(completion_client),
        PromptLimits {
            max_entries: config.completion.max_entries,
            max_field_chars: config.completion.max_field_chars,
        },
    ));

    let api_state = AppState::new(db.pool().clone(), calculator);
    let health_state = Arc::new(HealthState {
        db: Some(db.pool().clone()),
    });

    let app = build_router(api_state, health_state);

    let addr = config.server_addr();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mc_server=debug,mc_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Build the application router
fn build_router(api_state: AppState, health_state: Arc<HealthState>) -> Router {
    let health_routes = Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(health_state);

    Router::new()
        .merge(health_routes)
        .nest("/api/v1", mc_api::api_routes(api_state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn health_app() -> Router {
        let state = Arc::new(HealthState { db: None });
        Router::new()
            .route("/health/live", get(health::liveness))
            .route("/health/ready", get(health::readiness))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let app = health_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_reports_unavailable_without_pool() {
        let app = health_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
