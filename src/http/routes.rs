//! HTTP route definitions

use std::sync::atomic::Ordering;

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::app::AppState;
use crate::egi::handler::egi_handler;
use crate::util::time::uptime_secs;

/// Build the application router. Host signals are accepted from any origin,
/// so CORS is fully permissive.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/egi", get(egi_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    active_sessions: usize,
    best_distance: f64,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: uptime_secs(),
        active_sessions: state.active_sessions.load(Ordering::Relaxed),
        best_distance: state.scores.best(),
    })
}
