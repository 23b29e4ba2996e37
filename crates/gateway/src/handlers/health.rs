//! Health check handlers

use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub library: CheckResult,
    pub assistant: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: literatus_common::VERSION.to_string(),
    })
}

/// Readiness probe - reports the state of the library and assistant
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let paper_count = state.library.len().await;

    Json(ReadyResponse {
        status: "ready".to_string(),
        checks: HealthChecks {
            library: CheckResult {
                status: "up".to_string(),
                detail: Some(format!("{paper_count} papers")),
            },
            assistant: CheckResult {
                status: "up".to_string(),
                detail: Some(state.assistant.provider_name().to_string()),
            },
        },
    })
}
