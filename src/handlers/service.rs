use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

const NOTE_ROUTES: [&str; 4] = [
    "/fetchallnotes",
    "/addnotes",
    "/updatenote/:id",
    "/deletenote/:id",
];

/// GET / - service identity, listing note routes under the mounted base path
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let notes = NOTE_ROUTES
        .iter()
        .map(|route| format!("{}{}", state.base_path, route))
        .collect::<Vec<_>>()
        .join(", ");

    Json(json!({
        "name": "Notes API",
        "version": version,
        "endpoints": {
            "notes": format!("{} (token required)", notes),
            "health": "/health (public)",
        }
    }))
}

/// GET /health - 200 when the note store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let now = chrono::Utc::now();

    match state.notes.store().health_check().await {
        Ok(()) => Ok(Json(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok"
        }))),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("database unavailable"))
        }
    }
}
