//! HTTP routes.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::app::App;
use crate::infrastructure::ports::ClockPort;

const SERVICE_MESSAGE: &str = "Ucronie e Tesori game server";

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    message: &'static str,
    status: &'static str,
    /// Live (not yet reaped) sessions
    sessions: usize,
    uptime_seconds: u64,
    timestamp: String,
}

async fn health(State(app): State<Arc<App>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        message: SERVICE_MESSAGE,
        status: "ok",
        sessions: app.registry.session_count().await,
        uptime_seconds: app.started_at.elapsed().as_secs(),
        timestamp: app.clock.now().to_rfc3339(),
    })
}
