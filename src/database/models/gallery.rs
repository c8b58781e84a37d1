use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GalleryItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: Option<String>,
    pub tags: Json<Vec<String>>,
    pub uploaded_by: Uuid,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GalleryListRow {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub item: GalleryItem,
    pub uploaded_by_name: Option<String>,
}
