use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::Pagination;
use crate::database::models::gallery::{GalleryItem, GalleryListRow};

#[derive(Debug, Deserialize)]
pub struct GalleryListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GalleryListResponse {
    pub gallery: Vec<GalleryListRow>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGalleryRequest {
    #[validate(length(
        min = 3,
        max = 255,
        message = "Title must be between 3 and 255 characters"
    ))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct GalleryItemResponse {
    pub message: String,
    pub item: GalleryItem,
}

#[derive(Debug, Serialize)]
pub struct GalleryUploadResponse {
    pub message: String,
    pub items: Vec<GalleryItem>,
}
