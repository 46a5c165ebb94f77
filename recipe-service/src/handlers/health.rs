use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::models::StatusMessage;
use crate::startup::AppState;

pub const RUNNING_MESSAGE: &str = "GlobalChef AI backend is running";

/// Static acknowledgment; never consults the upstream model.
pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: RUNNING_MESSAGE.to_string(),
    })
}

/// Liveness probe. Reports the provider's local configuration state only.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.text_provider.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": "recipe-service",
                "version": env!("CARGO_PKG_VERSION"),
                "model": state.text_provider.model(),
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": "recipe-service",
                "error": e.to_string()
            })),
        ),
    }
}
