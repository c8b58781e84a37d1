use axum::{
    Json,
    extract::{Extension, Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use super::model::{
    DocumentListQuery, DocumentListResponse, DocumentResponse, UpdateDocumentRequest,
};
use crate::AppState;
use crate::common::{PageQuery, Pagination};
use crate::database::repositories::document::DocumentRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::upload::{PendingFile, UploadKind};

#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DocumentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit, offset) = PageQuery {
        page: query.page,
        limit: query.limit,
    }
    .normalize(10);

    let (documents, total) = DocumentRepository::list_public(
        &state.pool,
        query.category,
        query.search,
        limit,
        offset,
    )
    .await?;

    Ok(Json(DocumentListResponse {
        documents,
        pagination: Pagination::new(page, limit, total),
    }))
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
    let mut is_public = true;
    let mut file: Option<PendingFile> = None;

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
            "isPublic" => is_public = read_text(field).await? != "false",
            "documents" => file = Some(PendingFile::read(field).await?),
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

    let file = file.ok_or_else(|| AppError::Validation("Document file is required".to_string()))?;
    let stored = file.store(UploadKind::Documents, &state.config.upload_dir).await?;

    let document = DocumentRepository::create(
        &state.pool,
        &title,
        description.as_deref(),
        &category,
        &stored.path,
        stored.size,
        stored.mime_type.as_deref(),
        current.id,
        is_public,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DocumentResponse {
            message: "Document uploaded successfully".to_string(),
            document,
        }),
    ))
}

/// 下载公开文档，同一条语句里累加下载次数
#[axum::debug_handler]
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let document = DocumentRepository::take_for_download(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("Document not found"))?;

    let data = tokio::fs::read(&document.file_path).await?;

    let content_type = document
        .mime_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let disposition = format!(
        "attachment; filename=\"{}\"",
        document.title.replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    ))
}

#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDocumentRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let document = DocumentRepository::update(
        &state.pool,
        id,
        &req.title,
        req.description.as_deref(),
        &req.category,
        req.is_public.unwrap_or(true),
    )
    .await?
    .ok_or(AppError::NotFound("Document not found"))?;

    Ok(Json(DocumentResponse {
        message: "Document updated successfully".to_string(),
        document,
    }))
}

#[axum::debug_handler]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !DocumentRepository::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Document not found"));
    }

    Ok(Json(json!({ "message": "Document deleted successfully" })))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|_| AppError::Validation("Invalid multipart form data".to_string()))
}
