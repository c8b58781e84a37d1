use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementStatus {
    Draft,
    Scheduled,
    Published,
}

impl AnnouncementStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AnnouncementStatus::Draft => "draft",
            AnnouncementStatus::Scheduled => "scheduled",
            AnnouncementStatus::Published => "published",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementCategory {
    Urgent,
    Info,
    Event,
}

impl AnnouncementCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            AnnouncementCategory::Urgent => "urgent",
            AnnouncementCategory::Info => "info",
            AnnouncementCategory::Event => "event",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "urgent" => Some(AnnouncementCategory::Urgent),
            "info" => Some(AnnouncementCategory::Info),
            "event" => Some(AnnouncementCategory::Event),
            _ => None,
        }
    }
}

/// 创建时根据计划发布时间推导初始状态
pub fn initial_status(
    scheduled_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (AnnouncementStatus, Option<DateTime<Utc>>) {
    match scheduled_at {
        Some(at) if at > now => (AnnouncementStatus::Scheduled, None),
        _ => (AnnouncementStatus::Published, Some(now)),
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub author_id: Uuid,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnnouncementListRow {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub announcement: Announcement,
    pub author_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn no_schedule_publishes_immediately() {
        let now = Utc::now();
        let (status, published_at) = initial_status(None, now);
        assert_eq!(status, AnnouncementStatus::Published);
        assert_eq!(published_at, Some(now));
    }

    #[test]
    fn future_schedule_defers_publication() {
        let now = Utc::now();
        let (status, published_at) = initial_status(Some(now + Duration::hours(2)), now);
        assert_eq!(status, AnnouncementStatus::Scheduled);
        assert_eq!(published_at, None);
    }

    #[test]
    fn past_schedule_publishes_immediately() {
        let now = Utc::now();
        let (status, published_at) = initial_status(Some(now - Duration::hours(2)), now);
        assert_eq!(status, AnnouncementStatus::Published);
        assert_eq!(published_at, Some(now));
    }
}
