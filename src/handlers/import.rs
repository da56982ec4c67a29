//! CSV import handler

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::models::ImportReport;
use crate::server::AppState;
use crate::utils::errors::Result;

/// Query parameters accepted by the import endpoint
#[derive(Debug, Deserialize)]
pub struct ImportParams {
    /// User to attribute the batch to in the audit trail
    pub user_id: Option<i64>,
}

/// POST /api/exams/import
///
/// The request body is the CSV document itself.
pub async fn import_exams(
    State(state): State<AppState>,
    Query(params): Query<ImportParams>,
    body: String,
) -> Result<Json<ImportReport>> {
    let report = state
        .services
        .import_service
        .import_csv(body.as_bytes(), params.user_id)
        .await?;
    Ok(Json(report))
}
