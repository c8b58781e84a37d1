use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use super::model::{
    AnnouncementListQuery, AnnouncementListResponse, AnnouncementRequest, AnnouncementResponse,
};
use crate::AppState;
use crate::common::{PageQuery, Pagination};
use crate::database::models::announcement::{AnnouncementCategory, initial_status};
use crate::database::models::complaint::Priority;
use crate::database::repositories::announcement::AnnouncementRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;

#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AnnouncementListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit, offset) = PageQuery {
        page: query.page,
        limit: query.limit,
    }
    .normalize(10);

    let (announcements, total) = AnnouncementRepository::list_published(
        &state.pool,
        query.category,
        query.search,
        limit,
        offset,
    )
    .await?;

    Ok(Json(AnnouncementListResponse {
        announcements,
        pagination: Pagination::new(page, limit, total),
    }))
}

#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<AnnouncementRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;
    let (category, priority) = parse_enums(&req)?;

    // 给了未来的计划时间就挂为 scheduled，否则立即发布
    let (status, published_at) = initial_status(req.scheduled_at, Utc::now());

    let announcement = AnnouncementRepository::create(
        &state.pool,
        &req.title,
        &req.content,
        category.as_str(),
        priority.as_str(),
        current.id,
        req.scheduled_at,
        status.as_str(),
        published_at,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(AnnouncementResponse {
            message: "Announcement created successfully".to_string(),
            announcement,
        }),
    ))
}

#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnnouncementRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;
    let (category, priority) = parse_enums(&req)?;

    let announcement = AnnouncementRepository::update(
        &state.pool,
        id,
        &req.title,
        &req.content,
        category.as_str(),
        priority.as_str(),
        req.scheduled_at,
    )
    .await?
    .ok_or(AppError::NotFound("Announcement not found"))?;

    Ok(Json(AnnouncementResponse {
        message: "Announcement updated successfully".to_string(),
        announcement,
    }))
}

#[axum::debug_handler]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !AnnouncementRepository::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Announcement not found"));
    }

    Ok(Json(json!({ "message": "Announcement deleted successfully" })))
}

fn parse_enums(req: &AnnouncementRequest) -> Result<(AnnouncementCategory, Priority), AppError> {
    let category = match req.category.as_deref() {
        None | Some("") => AnnouncementCategory::Info,
        Some(value) => AnnouncementCategory::from_str(value)
            .ok_or_else(|| AppError::Validation("Invalid category".to_string()))?,
    };
    let priority = match req.priority.as_deref() {
        None | Some("") => Priority::Normal,
        Some(value) => Priority::from_str(value)
            .ok_or_else(|| AppError::Validation("Invalid priority".to_string()))?,
    };

    Ok((category, priority))
}
