use axum::Json;
use axum::response::IntoResponse;
use serde::Serialize;

pub mod announcement;
pub mod auth;
pub mod complaint;
pub mod contact;
pub mod dashboard;
pub mod document;
pub mod event;
pub mod gallery;
pub mod user;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// 健康检查接口
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
