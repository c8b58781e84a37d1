use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use serde::Serialize;
use uuid::Uuid;

use crate::AppState;
use crate::database::models::user::Role;
use crate::database::repositories::user::UserRepository;
use crate::error::AppError;
use crate::utils;

/// 认证通过后挂到请求上的身份上下文
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub full_name: String,
}

/// 认证中间件：校验 Bearer 令牌并确认账号仍然有效
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(authorization) =
        bearer.ok_or(AppError::Unauthorized("Access token required"))?;

    let claims = utils::verify_access_token(authorization.token(), &state.config)
        .map_err(|_| AppError::Forbidden("Invalid token"))?;

    // 令牌只用于定位用户；角色、邮箱等以数据库当前行为准，
    // 停用账号即使持有未过期令牌也会在这里被拒绝
    let user = UserRepository::find_by_id(&state.pool, claims.user_id)
        .await?
        .filter(|user| user.is_active)
        .ok_or(AppError::Unauthorized("Invalid token"))?;

    let role = user.parsed_role().ok_or_else(|| {
        tracing::error!("User {} has unknown role: {}", user.id, user.role);
        AppError::Internal
    })?;

    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        email: user.email,
        role,
        full_name: user.full_name,
    });

    Ok(next.run(req).await)
}

pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    require_role(&[Role::Admin, Role::SuperAdmin], req, next).await
}

pub async fn require_super_admin(req: Request, next: Next) -> Result<Response, AppError> {
    require_role(&[Role::SuperAdmin], req, next).await
}

/// 角色门：身份上下文缺失一律拒绝
async fn require_role(allowed: &[Role], req: Request, next: Next) -> Result<Response, AppError> {
    let permitted = req
        .extensions()
        .get::<CurrentUser>()
        .map(|user| allowed.contains(&user.role))
        .unwrap_or(false);

    if !permitted {
        return Err(AppError::Forbidden("Insufficient permissions"));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use tower::ServiceExt;

    fn current_user(role: Role) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "user@example.com".into(),
            role,
            full_name: "Test User".into(),
        }
    }

    // 探针路由套上角色门；identity 为 None 时模拟认证门未运行
    fn gated_app(identity: Option<CurrentUser>) -> Router {
        let mut router = Router::new()
            .route("/probe", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn(require_admin));

        if let Some(user) = identity {
            router = router.layer(axum::middleware::from_fn(
                move |mut req: Request, next: Next| {
                    let user = user.clone();
                    async move {
                        req.extensions_mut().insert(user);
                        next.run(req).await
                    }
                },
            ));
        }

        router
    }

    async fn probe_status(identity: Option<CurrentUser>) -> StatusCode {
        let response = gated_app(identity)
            .oneshot(
                Request::builder()
                    .uri("/probe")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn admin_gate_permits_admin_roles() {
        assert_eq!(probe_status(Some(current_user(Role::Admin))).await, StatusCode::OK);
        assert_eq!(
            probe_status(Some(current_user(Role::SuperAdmin))).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn admin_gate_denies_other_roles() {
        assert_eq!(
            probe_status(Some(current_user(Role::Warga))).await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            probe_status(Some(current_user(Role::Operator))).await,
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn missing_identity_is_denied() {
        assert_eq!(probe_status(None).await, StatusCode::FORBIDDEN);
    }
}
