use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use super::model::{ContactListQuery, ContactListResponse, ContactRequest, ContactResponse};
use crate::AppState;
use crate::common::{PageQuery, Pagination};
use crate::database::repositories::contact::ContactRepository;
use crate::error::AppError;

#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ContactListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit, offset) = PageQuery {
        page: query.page,
        limit: query.limit,
    }
    .normalize(20);

    let (contacts, total) =
        ContactRepository::list(&state.pool, query.department, query.search, limit, offset)
            .await?;

    Ok(Json(ContactListResponse {
        contacts,
        pagination: Pagination::new(page, limit, total),
    }))
}

#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let contact = ContactRepository::create(
        &state.pool,
        &req.name,
        &req.position,
        &req.department,
        req.phone.as_deref(),
        req.email.as_deref(),
        req.whatsapp.as_deref(),
        req.office_hours.as_deref(),
        req.photo.as_deref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: "Contact created successfully".to_string(),
            contact,
        }),
    ))
}

#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let contact = ContactRepository::update(
        &state.pool,
        id,
        &req.name,
        &req.position,
        &req.department,
        req.phone.as_deref(),
        req.email.as_deref(),
        req.whatsapp.as_deref(),
        req.office_hours.as_deref(),
        req.photo.as_deref(),
    )
    .await?
    .ok_or(AppError::NotFound("Contact not found"))?;

    Ok(Json(ContactResponse {
        message: "Contact updated successfully".to_string(),
        contact,
    }))
}

#[axum::debug_handler]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !ContactRepository::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Contact not found"));
    }

    Ok(Json(json!({ "message": "Contact deleted successfully" })))
}
