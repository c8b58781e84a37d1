use axum::{
    Json,
    extract::{Extension, Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use super::model::{
    ComplaintListQuery, ComplaintListResponse, ComplaintResponse, RateRequest,
    UpdateStatusRequest,
};
use crate::AppState;
use crate::common::{PageQuery, Pagination};
use crate::database::models::complaint::{ComplaintStatus, Priority};
use crate::database::repositories::complaint::ComplaintRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::upload::{PendingFile, UploadKind};

/// 投诉最多允许 3 张图片附件
const MAX_ATTACHMENTS: usize = 3;

#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ComplaintListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit, offset) = PageQuery {
        page: query.page,
        limit: query.limit,
    }
    .normalize(10);

    // warga 只能看到自己提交的投诉，其余角色看全部
    let owner = current.role.is_citizen().then_some(current.id);

    let (complaints, total) = ComplaintRepository::list(
        &state.pool,
        owner,
        query.status,
        query.category,
        limit,
        offset,
    )
    .await?;

    Ok(Json(ComplaintListResponse {
        complaints,
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
    let mut location = None;
    let mut priority = None;
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
            "location" => location = Some(read_text(field).await?),
            "priority" => priority = Some(read_text(field).await?),
            "complaints" => {
                if files.len() >= MAX_ATTACHMENTS {
                    return Err(AppError::Validation(
                        "A maximum of 3 attachments is allowed".to_string(),
                    ));
                }
                files.push(PendingFile::read(field).await?);
            }
            _ => {}
        }
    }

    // 字段校验全部通过后才落盘附件、写库
    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Title is required".to_string()))?;
    if title.chars().count() < 5 || title.chars().count() > 255 {
        return Err(AppError::Validation(
            "Title must be between 5 and 255 characters".to_string(),
        ));
    }

    let description = description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Description is required".to_string()))?;
    if description.chars().count() < 10 {
        return Err(AppError::Validation(
            "Description must be at least 10 characters".to_string(),
        ));
    }

    let category = category
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Category is required".to_string()))?;

    let priority = match priority.as_deref() {
        None | Some("") => Priority::Normal,
        Some(value) => Priority::from_str(value)
            .ok_or_else(|| AppError::Validation("Invalid priority".to_string()))?,
    };

    let mut attachments = Vec::with_capacity(files.len());
    for file in files {
        let stored = file
            .store(UploadKind::Complaints, &state.config.upload_dir)
            .await?;
        attachments.push(stored.into_attachment());
    }

    let complaint = ComplaintRepository::create(
        &state.pool,
        &title,
        &description,
        &category,
        location.as_deref(),
        priority.as_str(),
        current.id,
        attachments,
    )
    .await?;

    tracing::info!("Complaint {} submitted by {}", complaint.id, current.id);

    Ok((
        StatusCode::CREATED,
        Json(ComplaintResponse {
            message: "Complaint submitted successfully".to_string(),
            complaint,
        }),
    ))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = ComplaintStatus::from_str(&req.status)
        .filter(|status| status.is_valid_target())
        .ok_or_else(|| AppError::Validation("Invalid status".to_string()))?;

    // 条件更新只命中非终态投诉
    let complaint = ComplaintRepository::update_status(
        &state.pool,
        id,
        status.as_str(),
        req.response.as_deref(),
        req.assigned_to,
    )
    .await?
    .ok_or(AppError::NotFound("Complaint not found"))?;

    Ok(Json(ComplaintResponse {
        message: "Complaint status updated successfully".to_string(),
        complaint,
    }))
}

/// 满意度评分；不存在、非本人、未解决、已评分统一按未找到处理
#[axum::debug_handler]
pub async fn rate(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<RateRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !(1..=5).contains(&req.rating) {
        return Err(AppError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    let complaint =
        ComplaintRepository::rate(&state.pool, id, current.id, req.rating, req.feedback.as_deref())
            .await?
            .ok_or(AppError::NotFound("Complaint not found or cannot be rated"))?;

    Ok(Json(ComplaintResponse {
        message: "Rating submitted successfully".to_string(),
        complaint,
    }))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|_| AppError::Validation("Invalid multipart form data".to_string()))
}
