use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::Pagination;
use crate::database::models::contact::Contact;

#[derive(Debug, Deserialize)]
pub struct ContactListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub department: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub contacts: Vec<Contact>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 2, max = 255, message = "Name must be between 2 and 255 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    pub phone: Option<String>,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub office_hours: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: String,
    pub contact: Contact,
}
