//! Lecturer handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::Pagination;
use crate::models::{AttachLecturerRequest, CreateLecturerRequest, Lecturer};
use crate::server::AppState;
use crate::utils::errors::Result;

/// POST /api/lecturers
pub async fn create_lecturer(
    State(state): State<AppState>,
    Json(request): Json<CreateLecturerRequest>,
) -> Result<(StatusCode, Json<Lecturer>)> {
    let lecturer = state
        .services
        .exam_service
        .create_lecturer(request)
        .await?;
    Ok((StatusCode::CREATED, Json(lecturer)))
}

/// GET /api/lecturers
pub async fn list_lecturers(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Lecturer>>> {
    let lecturers = state
        .services
        .exam_service
        .list_lecturers(pagination.limit(), pagination.offset())
        .await?;
    Ok(Json(lecturers))
}

/// POST /api/exams/:id/lecturers
pub async fn attach_lecturer(
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
    Json(request): Json<AttachLecturerRequest>,
) -> Result<StatusCode> {
    state
        .services
        .exam_service
        .attach_lecturer(exam_id, request.lecturer_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/exams/:id/lecturers/:lecturer_id
pub async fn detach_lecturer(
    State(state): State<AppState>,
    Path((exam_id, lecturer_id)): Path<(i64, i64)>,
) -> Result<StatusCode> {
    state
        .services
        .exam_service
        .detach_lecturer(exam_id, lecturer_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
