//! Health and statistics handlers

use axum::extract::State;
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::server::AppState;
use crate::utils::errors::{ExamGuardError, Result};

/// Database connectivity probe
///
/// Returns 200 with `{"status":"OK"}` when the database answers,
/// 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    state.db.health_check().await.map_err(|e| {
        error!("Health check failed: {}", e);
        ExamGuardError::ServiceUnavailable("database unreachable".to_string())
    })?;

    Ok(Json(json!({ "status": "OK" })))
}

/// Entity counters across the whole system
pub async fn stats(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let stats = state.db.get_stats().await?;
    Ok(Json(stats))
}
