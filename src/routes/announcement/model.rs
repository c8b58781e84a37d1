use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::Pagination;
use crate::database::models::announcement::{Announcement, AnnouncementListRow};

#[derive(Debug, Deserialize)]
pub struct AnnouncementListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnnouncementListResponse {
    pub announcements: Vec<AnnouncementListRow>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementRequest {
    #[validate(length(
        min = 3,
        max = 255,
        message = "Title must be between 3 and 255 characters"
    ))]
    pub title: String,
    #[validate(length(min = 10, message = "Content must be at least 10 characters"))]
    pub content: String,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct AnnouncementResponse {
    pub message: String,
    pub announcement: Announcement,
}
