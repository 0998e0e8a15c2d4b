use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl HealthResponse {
    pub fn up(store: &str) -> Self {
        Self {
            status: "UP".to_string(),
            store: store.to_string(),
            reason: None,
        }
    }

    pub fn down(store: &str, reason: impl Into<String>) -> Self {
        Self {
            status: "DOWN".to_string(),
            store: store.to_string(),
            reason: Some(reason.into()),
        }
    }
}

/// UP si el cache store responde al ping, DOWN con 503 si no.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store = state.store();

    match store.health_check().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::up(store.name()))),
        Err(err) => {
            warn!(store = store.name(), error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::down(store.name(), err.to_string())),
            )
        }
    }
}
