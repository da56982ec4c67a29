//! Attendance handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::models::{AttendanceRecord, CreateAttendanceRequest, UpdateAttendanceRequest};
use crate::server::AppState;
use crate::utils::errors::Result;

/// GET /api/exams/:id/attendance
pub async fn list_for_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
) -> Result<Json<Vec<AttendanceRecord>>> {
    let records = state
        .services
        .attendance_service
        .list_for_exam(exam_id)
        .await?;
    Ok(Json(records))
}

/// POST /api/exams/:id/attendance
pub async fn register_student(
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
    Json(request): Json<CreateAttendanceRequest>,
) -> Result<(StatusCode, Json<AttendanceRecord>)> {
    let record = state
        .services
        .attendance_service
        .register_student(exam_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PATCH /api/attendance/:id
pub async fn update_record(
    State(state): State<AppState>,
    Path(record_id): Path<i64>,
    Json(request): Json<UpdateAttendanceRequest>,
) -> Result<Json<AttendanceRecord>> {
    let record = state
        .services
        .attendance_service
        .update_record(record_id, request)
        .await?;
    Ok(Json(record))
}

/// DELETE /api/attendance/:id
pub async fn delete_record(
    State(state): State<AppState>,
    Path(record_id): Path<i64>,
) -> Result<StatusCode> {
    state
        .services
        .attendance_service
        .delete_record(record_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
