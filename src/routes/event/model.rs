use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::Pagination;
use crate::database::models::event::{Event, EventListRow};

#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventListRow>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    #[validate(length(
        min = 3,
        max = 255,
        message = "Title must be between 3 and 255 characters"
    ))]
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub organizer: Option<String>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(range(min = 1, message = "Max participants must be at least 1"))]
    pub max_participants: Option<i32>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub message: String,
    pub event: Event,
}
