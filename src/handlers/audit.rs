//! Audit trail handlers

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::models::{AuditAction, AuditFilter, CreateAuditActionRequest};
use crate::server::AppState;
use crate::utils::errors::Result;

/// POST /api/audit
pub async fn record_action(
    State(state): State<AppState>,
    Json(request): Json<CreateAuditActionRequest>,
) -> Result<(StatusCode, Json<AuditAction>)> {
    let action = state.services.audit_service.record_action(request).await?;
    Ok((StatusCode::CREATED, Json(action)))
}

/// GET /api/audit
pub async fn list_actions(
    State(state): State<AppState>,
    Query(filter): Query<AuditFilter>,
) -> Result<Json<Vec<AuditAction>>> {
    let actions = state.services.audit_service.list_actions(filter).await?;
    Ok(Json(actions))
}
