use axum::{
    Json,
    extract::{Extension, Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use super::model::{
    GalleryItemResponse, GalleryListQuery, GalleryListResponse, GalleryUploadResponse,
    UpdateGalleryRequest,
};
use crate::AppState;
use crate::common::{PageQuery, Pagination};
use crate::database::repositories::gallery::GalleryRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::upload::{PendingFile, UploadKind};

/// 一次最多上传 10 张图片
const MAX_UPLOADS: usize = 10;

#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<GalleryListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit, offset) = PageQuery {
        page: query.page,
        limit: query.limit,
    }
    .normalize(12);

    let (gallery, total) =
        GalleryRepository::list(&state.pool, query.category, query.search, limit, offset).await?;

    Ok(Json(GalleryListResponse {
        gallery,
        pagination: Pagination::new(page, limit, total),
    }))
}

/// 详情查看，浏览次数随查询累加
#[axum::debug_handler]
pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let item = GalleryRepository::view(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("Gallery item not found"))?;

    Ok(Json(json!({ "item": item })))
}

#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut title = None;
    let mut description = None;
    let mut category = None;
    let mut tags: Vec<String> = Vec::new();
    let mut files: Vec<PendingFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::Validation("Invalid multipart form data".to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "title" => title = Some(read_text(field).await?),
            "description" => description = Some(read_text(field).await?),
            "category" => category = Some(read_text(field).await?),
            "tags" => tags.push(read_text(field).await?),
            "gallery" => {
                if files.len() >= MAX_UPLOADS {
                    return Err(AppError::Validation(
                        "A maximum of 10 files is allowed".to_string(),
                    ));
                }
                files.push(PendingFile::read(field).await?);
            }
            _ => {}
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Title is required".to_string()))?;
    if title.chars().count() < 3 || title.chars().count() > 255 {
        return Err(AppError::Validation(
            "Title must be between 3 and 255 characters".to_string(),
        ));
    }

    let category = category
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Category is required".to_string()))?;

    if files.is_empty() {
        return Err(AppError::Validation(
            "At least one file is required".to_string(),
        ));
    }

    let mut items = Vec::with_capacity(files.len());
    for file in files {
        let stored = file.store(UploadKind::Gallery, &state.config.upload_dir).await?;
        let item = GalleryRepository::create(
            &state.pool,
            &title,
            description.as_deref(),
            &category,
            &stored.path,
            stored.size,
            stored.mime_type.as_deref(),
            tags.clone(),
            current.id,
        )
        .await?;
        items.push(item);
    }

    Ok((
        StatusCode::CREATED,
        Json(GalleryUploadResponse {
            message: "Gallery items uploaded successfully".to_string(),
            items,
        }),
    ))
}

#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateGalleryRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let item = GalleryRepository::update(
        &state.pool,
        id,
        &req.title,
        req.description.as_deref(),
        &req.category,
        req.tags.unwrap_or_default(),
    )
    .await?
    .ok_or(AppError::NotFound("Gallery item not found"))?;

    Ok(Json(GalleryItemResponse {
        message: "Gallery item updated successfully".to_string(),
        item,
    }))
}

#[axum::debug_handler]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !GalleryRepository::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Gallery item not found"));
    }

    Ok(Json(json!({ "message": "Gallery item deleted successfully" })))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|_| AppError::Validation("Invalid multipart form data".to_string()))
}
