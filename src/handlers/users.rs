//! User handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::Pagination;
use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::server::AppState;
use crate::utils::errors::Result;

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = state.services.user_service.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<User>> {
    let user = state.services.user_service.get_user(user_id).await?;
    Ok(Json(user))
}

/// PATCH /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    let user = state
        .services
        .user_service
        .update_user(user_id, request)
        .await?;
    Ok(Json(user))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<User>>> {
    let users = state
        .services
        .user_service
        .list_users(pagination.limit(), pagination.offset())
        .await?;
    Ok(Json(users))
}
