use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

/// 投诉生命周期：submitted → in_progress → resolved | rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Submitted,
    InProgress,
    Resolved,
    Rejected,
}

impl ComplaintStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplaintStatus::Submitted => "submitted",
            ComplaintStatus::InProgress => "in_progress",
            ComplaintStatus::Resolved => "resolved",
            ComplaintStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "submitted" => Some(ComplaintStatus::Submitted),
            "in_progress" => Some(ComplaintStatus::InProgress),
            "resolved" => Some(ComplaintStatus::Resolved),
            "rejected" => Some(ComplaintStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        match self {
            ComplaintStatus::Resolved | ComplaintStatus::Rejected => true,
            ComplaintStatus::Submitted | ComplaintStatus::InProgress => false,
        }
    }

    /// 工作人员能把投诉推进到的目标状态
    pub fn is_valid_target(self) -> bool {
        match self {
            ComplaintStatus::InProgress
            | ComplaintStatus::Resolved
            | ComplaintStatus::Rejected => true,
            ComplaintStatus::Submitted => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Normal,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "normal" => Some(Priority::Normal),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// 投诉附件，路径指向磁盘上的已存文件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    #[serde(rename = "originalName")]
    pub original_name: String,
    pub path: String,
    pub size: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Complaint {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub priority: String,
    pub user_id: Uuid,
    pub assigned_to: Option<Uuid>,
    pub location: Option<String>,
    pub attachments: Json<Vec<Attachment>>,
    pub response: Option<String>,
    pub rating: Option<i32>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 列表行，附带提交人/受理人姓名
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ComplaintListRow {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub complaint: Complaint,
    pub user_name: Option<String>,
    pub assigned_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            ComplaintStatus::Submitted,
            ComplaintStatus::InProgress,
            ComplaintStatus::Resolved,
            ComplaintStatus::Rejected,
        ] {
            assert_eq!(ComplaintStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ComplaintStatus::from_str("done"), None);
    }

    #[test]
    fn terminal_states_are_resolved_and_rejected() {
        assert!(ComplaintStatus::Resolved.is_terminal());
        assert!(ComplaintStatus::Rejected.is_terminal());
        assert!(!ComplaintStatus::Submitted.is_terminal());
        assert!(!ComplaintStatus::InProgress.is_terminal());
    }

    #[test]
    fn submitted_is_not_an_update_target() {
        assert!(!ComplaintStatus::Submitted.is_valid_target());
        assert!(ComplaintStatus::InProgress.is_valid_target());
        assert!(ComplaintStatus::Resolved.is_valid_target());
        assert!(ComplaintStatus::Rejected.is_valid_target());
    }

    #[test]
    fn priority_parses_known_values_only() {
        assert_eq!(Priority::from_str("normal"), Some(Priority::Normal));
        assert_eq!(Priority::from_str("urgent"), None);
    }
}
