use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    middleware::{auth_middleware, require_admin, require_super_admin},
    routes,
};

/// 按认证要求分组组装路由，限流与日志中间件由 main 统一加在最外层
pub fn create_router(state: AppState) -> Router {
    // 无需认证的公开路由
    let public_routes = Router::new()
        .route("/health", get(routes::health))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/refresh", post(routes::auth::refresh))
        .route("/announcements", get(routes::announcement::list))
        .route("/events", get(routes::event::list))
        .route("/documents", get(routes::document::list))
        .route("/documents/{id}/download", get(routes::document::download))
        .route("/gallery", get(routes::gallery::list))
        .route("/gallery/{id}", get(routes::gallery::view))
        .route("/contacts", get(routes::contact::list));

    // 登录即可访问的路由
    let protected_routes = Router::new()
        .route("/auth/me", get(routes::auth::me))
        .route(
            "/complaints",
            get(routes::complaint::list).post(routes::complaint::create),
        )
        .route("/complaints/{id}/rate", patch(routes::complaint::rate))
        .route("/users/profile", put(routes::user::update_profile))
        .route("/users/password", put(routes::user::change_password))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    // admin / super_admin 角色路由
    let admin_routes = Router::new()
        .route(
            "/complaints/{id}/status",
            patch(routes::complaint::update_status),
        )
        .route("/announcements", post(routes::announcement::create))
        .route(
            "/announcements/{id}",
            put(routes::announcement::update).delete(routes::announcement::delete),
        )
        .route("/events", post(routes::event::create))
        .route(
            "/events/{id}",
            put(routes::event::update).delete(routes::event::delete),
        )
        .route("/documents", post(routes::document::create))
        .route(
            "/documents/{id}",
            put(routes::document::update).delete(routes::document::delete),
        )
        .route("/gallery", post(routes::gallery::create))
        .route(
            "/gallery/{id}",
            put(routes::gallery::update).delete(routes::gallery::delete),
        )
        .route("/contacts", post(routes::contact::create))
        .route(
            "/contacts/{id}",
            put(routes::contact::update).delete(routes::contact::delete),
        )
        .route("/users", get(routes::user::list))
        .route("/dashboard/stats", get(routes::dashboard::stats))
        .route("/dashboard/analytics", get(routes::dashboard::analytics))
        .layer(from_fn(require_admin))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    // 仅 super_admin 的路由
    let super_admin_routes = Router::new()
        .route("/users/{id}/role", patch(routes::user::update_role))
        .route("/users/{id}/active", patch(routes::user::set_active))
        .layer(from_fn(require_super_admin))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .merge(super_admin_routes);

    Router::new()
        .nest(&state.config.api_base_uri, api)
        .nest_service("/uploads", ServeDir::new(state.config.upload_dir.clone()))
        // 每张图片/文档限 10MB，整体放宽到相册批量上传的体量
        .layer(DefaultBodyLimit::max(100 * 1024 * 1024))
        .with_state(state)
}
