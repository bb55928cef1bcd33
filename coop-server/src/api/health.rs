//! Health check endpoints

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "ok": true,
        "service": "coop-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET {API_BASE}/health
///
/// Pings the database.
pub async fn api_health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "ok": true, "service": "coop-server", "db": "up" })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "service": "coop-server", "db": "down" })),
            )
        }
    }
}
