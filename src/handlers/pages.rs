//! Page view-model handlers
//!
//! The routes the web pages render from: a home payload and the
//! exam editing view.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;

use crate::models::ExamDetail;
use crate::server::AppState;
use crate::utils::errors::Result;

/// Home view model: service identity and liveness
pub async fn home() -> Json<serde_json::Value> {
    Json(json!({
        "service": crate::NAME,
        "version": crate::VERSION,
        "status": "running",
    }))
}

/// Everything the exam editing view needs in one payload
pub async fn edit_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
) -> Result<Json<ExamDetail>> {
    let detail = state.services.exam_service.get_exam_detail(exam_id).await?;
    Ok(Json(detail))
}
