use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::Pagination;
use crate::database::models::document::{Document, DocumentListRow};

#[derive(Debug, Deserialize)]
pub struct DocumentListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentListRow>,
    pub pagination: Pagination,
}

/// 元数据更新请求；文件本身上传后不可替换
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    #[validate(length(
        min = 3,
        max = 255,
        message = "Title must be between 3 and 255 characters"
    ))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub is_public: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub message: String,
    pub document: Document,
}
