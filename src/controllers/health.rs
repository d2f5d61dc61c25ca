use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// Providers the service was started with, reported by the readiness probe
#[derive(Debug, Clone)]
pub struct Readiness {
    pub translation_provider: &'static str,
    pub tts_provider: &'static str,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(readiness): State<Arc<Readiness>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "translation": readiness.translation_provider,
            "tts": readiness.tts_provider
        })),
    )
}
