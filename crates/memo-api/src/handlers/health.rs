//! Liveness endpoint.

use axum::{extract::State, response::IntoResponse, Json};

use crate::AppState;

/// Report liveness, version and whether a real AI backend is configured.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let gateway = state.generation.gateway();
    Json(serde_json::json!({
        "success": true,
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "ai": {
            "available": gateway.is_available(),
            "model": gateway.model_name(),
        },
    }))
}
