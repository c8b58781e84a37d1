use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use super::model::{
    ChangePasswordRequest, SetActiveRequest, UpdateProfileRequest, UpdateRoleRequest,
    UserListQuery, UserListResponse, UserResponse,
};
use crate::AppState;
use crate::common::{PageQuery, Pagination};
use crate::database::models::user::Role;
use crate::database::repositories::user::UserRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::utils;

#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit, offset) = PageQuery {
        page: query.page,
        limit: query.limit,
    }
    .normalize(20);

    let (users, total) =
        UserRepository::list(&state.pool, query.search, query.role, limit, offset).await?;

    Ok(Json(UserListResponse {
        users,
        pagination: Pagination::new(page, limit, total),
    }))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let user = UserRepository::update_profile(
        &state.pool,
        current.id,
        &req.full_name,
        req.phone.as_deref(),
        req.address.as_deref(),
    )
    .await?;

    Ok(Json(UserResponse {
        message: "Profile updated successfully".to_string(),
        user,
    }))
}

#[axum::debug_handler]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    // 改密前先验证当前密码
    let user = UserRepository::find_by_id(&state.pool, current.id)
        .await?
        .ok_or(AppError::Unauthorized("Invalid token"))?;

    if !utils::verify_password(&req.current_password, &user.password)? {
        return Err(AppError::Validation(
            "Current password is incorrect".to_string(),
        ));
    }

    let password_hash = utils::hash_password(&req.new_password)?;
    UserRepository::update_password(&state.pool, current.id, &password_hash).await?;

    Ok(Json(json!({ "message": "Password changed successfully" })))
}

#[axum::debug_handler]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    // 只接受封闭角色集合里的值
    let role = Role::from_str(&req.role)
        .ok_or_else(|| AppError::Validation("Invalid role".to_string()))?;

    let user = UserRepository::update_role(&state.pool, id, role.as_str())
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    Ok(Json(UserResponse {
        message: "User role updated successfully".to_string(),
        user,
    }))
}

#[axum::debug_handler]
pub async fn set_active(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetActiveRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserRepository::set_active(&state.pool, id, req.is_active)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    Ok(Json(UserResponse {
        message: "User status updated successfully".to_string(),
        user,
    }))
}
