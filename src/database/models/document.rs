use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: Option<String>,
    pub version: i32,
    pub parent_id: Option<Uuid>,
    pub uploaded_by: Uuid,
    pub download_count: i32,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DocumentListRow {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub document: Document,
    pub uploaded_by_name: Option<String>,
}
