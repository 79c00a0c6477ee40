//! Common routes: health, readiness, version.

use crate::response::{simple_response, Envelope};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Router};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
pub struct ReadyBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

async fn health() -> Envelope<HealthBody> {
    simple_response(StatusCode::OK, "", Some(HealthBody { status: "ok" }))
}

async fn ready(State(state): State<AppState>) -> Envelope<ReadyBody> {
    let Some(pool) = &state.pool else {
        return simple_response(StatusCode::OK, "", Some(ReadyBody { status: "ok", database: None }));
    };
    if let Err(e) = sqlx::query("SELECT 1").fetch_optional(pool).await {
        tracing::warn!(error = %e, "readiness probe failed");
        return simple_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "database unavailable",
            Some(ReadyBody {
                status: "degraded",
                database: Some("unavailable"),
            }),
        );
    }
    simple_response(
        StatusCode::OK,
        "",
        Some(ReadyBody {
            status: "ok",
            database: Some("ok"),
        }),
    )
}

async fn version() -> Envelope<serde_json::Value> {
    simple_response(
        StatusCode::OK,
        "",
        Some(serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /health, GET /ready, GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
