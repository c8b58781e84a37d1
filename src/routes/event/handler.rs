use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use super::model::{EventListQuery, EventListResponse, EventRequest, EventResponse};
use crate::AppState;
use crate::common::{PageQuery, Pagination};
use crate::database::repositories::event::EventRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;

#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit, offset) = PageQuery {
        page: query.page,
        limit: query.limit,
    }
    .normalize(10);

    let (events, total) = EventRepository::list_public(
        &state.pool,
        query.category,
        query.month,
        query.year,
        limit,
        offset,
    )
    .await?;

    Ok(Json(EventListResponse {
        events,
        pagination: Pagination::new(page, limit, total),
    }))
}

#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<EventRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let event = EventRepository::create(
        &state.pool,
        &req.title,
        req.description.as_deref(),
        req.start_date,
        req.end_date,
        req.location.as_deref(),
        req.organizer.as_deref(),
        &req.category,
        req.max_participants,
        req.is_public.unwrap_or(true),
        current.id,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            message: "Event created successfully".to_string(),
            event,
        }),
    ))
}

#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EventRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let event = EventRepository::update(
        &state.pool,
        id,
        &req.title,
        req.description.as_deref(),
        req.start_date,
        req.end_date,
        req.location.as_deref(),
        req.organizer.as_deref(),
        &req.category,
        req.max_participants,
        req.is_public.unwrap_or(true),
    )
    .await?
    .ok_or(AppError::NotFound("Event not found"))?;

    Ok(Json(EventResponse {
        message: "Event updated successfully".to_string(),
        event,
    }))
}

#[axum::debug_handler]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !EventRepository::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Event not found"));
    }

    Ok(Json(json!({ "message": "Event deleted successfully" })))
}
