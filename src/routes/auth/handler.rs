use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use super::model::{
    AuthResponse, AuthUser, LoginRequest, MeResponse, RefreshRequest, RefreshResponse,
    RegisterRequest,
};
use crate::AppState;
use crate::database::repositories::user::UserRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::utils;

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if UserRepository::find_by_email(&state.pool, &req.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email already registered"));
    }

    let password_hash = utils::hash_password(&req.password)?;
    let user = UserRepository::create(
        &state.pool,
        &req.email,
        &password_hash,
        &req.full_name,
        req.phone.as_deref(),
        req.address.as_deref(),
    )
    .await?;

    let role = user.parsed_role().ok_or(AppError::Internal)?;
    let access_token = utils::generate_access_token(user.id, &user.email, role, &state.config)
        .map_err(|e| {
            tracing::error!("Failed to generate access token: {}", e);
            AppError::Internal
        })?;
    let refresh_token = utils::generate_refresh_token(user.id, &state.config).map_err(|e| {
        tracing::error!("Failed to generate refresh token: {}", e);
        AppError::Internal
    })?;

    tracing::info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: AuthUser::from_user(&user),
            access_token,
            refresh_token,
        }),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    // 未知邮箱与密码错误返回同一个提示，不暴露账号是否存在
    let user = UserRepository::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or(AppError::Unauthorized("Invalid credentials"))?;

    if !user.is_active {
        return Err(AppError::Unauthorized("Account is deactivated"));
    }

    if !utils::verify_password(&req.password, &user.password)? {
        return Err(AppError::Unauthorized("Invalid credentials"));
    }

    let role = user.parsed_role().ok_or(AppError::Internal)?;
    let access_token = utils::generate_access_token(user.id, &user.email, role, &state.config)
        .map_err(|e| {
            tracing::error!("Failed to generate access token: {}", e);
            AppError::Internal
        })?;
    let refresh_token = utils::generate_refresh_token(user.id, &state.config).map_err(|e| {
        tracing::error!("Failed to generate refresh token: {}", e);
        AppError::Internal
    })?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user: AuthUser::from_user(&user),
        access_token,
        refresh_token,
    }))
}

/// 用刷新令牌换新的访问令牌；刷新令牌本身不授予资源访问权
#[axum::debug_handler]
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<impl IntoResponse, AppError> {
    let token = req
        .refresh_token
        .ok_or(AppError::Unauthorized("Refresh token required"))?;

    let claims = utils::verify_refresh_token(&token, &state.config)
        .map_err(|_| AppError::Forbidden("Invalid refresh token"))?;

    let user = UserRepository::find_by_id(&state.pool, claims.user_id)
        .await?
        .filter(|user| user.is_active)
        .ok_or(AppError::Unauthorized("Invalid refresh token"))?;

    let role = user.parsed_role().ok_or(AppError::Internal)?;
    let access_token = utils::generate_access_token(user.id, &user.email, role, &state.config)
        .map_err(|e| {
            tracing::error!("Failed to generate access token: {}", e);
            AppError::Internal
        })?;

    Ok(Json(RefreshResponse { access_token }))
}

#[axum::debug_handler]
pub async fn me(Extension(user): Extension<CurrentUser>) -> impl IntoResponse {
    Json(MeResponse { user })
}
