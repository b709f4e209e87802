//! Health probes
//!
//! Liveness always answers 200; readiness pings the database pool and
//! answers 503 when it is unreachable.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::warn;

/// State for the health routes; kept separate from the API state so
/// probes can be served even before the pool exists.
#[derive(Clone)]
pub struct HealthState {
    pub db: Option<PgPool>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health/live
pub async fn liveness() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

/// GET /health/ready
pub async fn readiness(
    State(state): State<Arc<HealthState>>,
) -> (StatusCode, Json<HealthResponse>) {
    match &state.db {
        Some(pool) => match sqlx::query("SELECT 1").execute(pool).await {
            Ok(_) => (StatusCode::OK, Json(HealthResponse { status: "ok" })),
            Err(e) => {
                warn!(error = %e, "readiness check failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(HealthResponse {
                        status: "database unreachable",
                    }),
                )
            }
        },
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "database not configured",
            }),
        ),
    }
}
