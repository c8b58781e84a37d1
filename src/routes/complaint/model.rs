use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Pagination;
use crate::database::models::complaint::{Complaint, ComplaintListRow};

#[derive(Debug, Deserialize)]
pub struct ComplaintListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ComplaintListResponse {
    pub complaints: Vec<ComplaintListRow>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: String,
    pub response: Option<String>,
    pub assigned_to: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub rating: i32,
    pub feedback: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ComplaintResponse {
    pub message: String,
    pub complaint: Complaint,
}
