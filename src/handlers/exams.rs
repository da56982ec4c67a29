//! Exam handlers
//!
//! Exam CRUD plus the nested rule and checklist routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::Pagination;
use crate::models::{
    ChecklistItem, CreateChecklistItemRequest, CreateExamRequest, CreateRuleRequest, Exam,
    ExamDetail, Rule, UpdateChecklistItemRequest, UpdateExamRequest, UpdateRuleRequest,
};
use crate::server::AppState;
use crate::utils::errors::Result;

/// POST /api/exams
pub async fn create_exam(
    State(state): State<AppState>,
    Json(request): Json<CreateExamRequest>,
) -> Result<(StatusCode, Json<ExamDetail>)> {
    let detail = state.services.exam_service.create_exam(request).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/exams/:id
pub async fn get_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
) -> Result<Json<ExamDetail>> {
    let detail = state.services.exam_service.get_exam_detail(exam_id).await?;
    Ok(Json(detail))
}

/// GET /api/exams
pub async fn list_exams(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Exam>>> {
    let exams = state
        .services
        .exam_service
        .list_exams(pagination.limit(), pagination.offset())
        .await?;
    Ok(Json(exams))
}

/// PUT /api/exams/:id
pub async fn update_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
    Json(request): Json<UpdateExamRequest>,
) -> Result<Json<Exam>> {
    let exam = state
        .services
        .exam_service
        .update_exam(exam_id, request)
        .await?;
    Ok(Json(exam))
}

/// DELETE /api/exams/:id
pub async fn delete_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
) -> Result<StatusCode> {
    state.services.exam_service.delete_exam(exam_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/exams/:id/rules
pub async fn add_rule(
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
    Json(request): Json<CreateRuleRequest>,
) -> Result<(StatusCode, Json<Rule>)> {
    let rule = state
        .services
        .exam_service
        .add_rule(exam_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(rule)))
}

/// PATCH /api/rules/:id
pub async fn update_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<i64>,
    Json(request): Json<UpdateRuleRequest>,
) -> Result<Json<Rule>> {
    let rule = state
        .services
        .exam_service
        .update_rule(rule_id, request)
        .await?;
    Ok(Json(rule))
}

/// DELETE /api/rules/:id
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<i64>,
) -> Result<StatusCode> {
    state.services.exam_service.delete_rule(rule_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/exams/:id/checklist
pub async fn add_checklist_item(
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
    Json(request): Json<CreateChecklistItemRequest>,
) -> Result<(StatusCode, Json<ChecklistItem>)> {
    let item = state
        .services
        .exam_service
        .add_checklist_item(exam_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/checklist/:id
pub async fn update_checklist_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Json(request): Json<UpdateChecklistItemRequest>,
) -> Result<Json<ChecklistItem>> {
    let item = state
        .services
        .exam_service
        .update_checklist_item(item_id, request)
        .await?;
    Ok(Json(item))
}

/// DELETE /api/checklist/:id
pub async fn delete_checklist_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> Result<StatusCode> {
    state
        .services
        .exam_service
        .delete_checklist_item(item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
