use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::database::models::complaint::ComplaintListRow;

#[derive(Debug, Serialize, FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct TopDownload {
    pub title: String,
    pub download_count: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub users: i64,
    pub announcements: i64,
    pub complaints: i64,
    pub events: i64,
    pub documents: i64,
    pub recent_complaints: Vec<ComplaintListRow>,
    pub complaints_by_status: Vec<StatusCount>,
    pub announcements_by_category: Vec<CategoryCount>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAnalytics {
    pub user_registrations: Vec<DateCount>,
    pub complaint_trends: Vec<DateCount>,
    pub document_downloads: Vec<TopDownload>,
}

/// 仪表盘聚合查询
pub struct DashboardRepository;

impl DashboardRepository {
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        let (users, announcements, complaints, events, documents) = tokio::try_join!(
            count(pool, "SELECT COUNT(*) FROM users WHERE is_active = true"),
            count(
                pool,
                "SELECT COUNT(*) FROM announcements WHERE status = 'published'"
            ),
            count(pool, "SELECT COUNT(*) FROM complaints"),
            count(
                pool,
                "SELECT COUNT(*) FROM events WHERE start_date >= CURRENT_DATE"
            ),
            count(
                pool,
                "SELECT COUNT(*) FROM documents WHERE is_public = true"
            ),
        )?;

        let recent_complaints = sqlx::query_as::<_, ComplaintListRow>(
            r#"
            SELECT c.*, u.full_name AS user_name, a.full_name AS assigned_name
            FROM complaints c
            LEFT JOIN users u ON c.user_id = u.id
            LEFT JOIN users a ON c.assigned_to = a.id
            ORDER BY c.created_at DESC
            LIMIT 5
            "#,
        )
        .fetch_all(pool)
        .await?;

        let complaints_by_status = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM complaints GROUP BY status",
        )
        .fetch_all(pool)
        .await?;

        let announcements_by_category = sqlx::query_as::<_, CategoryCount>(
            r#"
            SELECT category, COUNT(*) AS count
            FROM announcements
            WHERE status = 'published'
            GROUP BY category
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(DashboardStats {
            users,
            announcements,
            complaints,
            events,
            documents,
            recent_complaints,
            complaints_by_status,
            announcements_by_category,
        })
    }

    pub async fn analytics(pool: &PgPool, days: i32) -> Result<DashboardAnalytics, sqlx::Error> {
        let registrations = sqlx::query_as::<_, DateCount>(
            r#"
            SELECT DATE(created_at) AS date, COUNT(*) AS count
            FROM users
            WHERE created_at >= NOW() - make_interval(days => $1)
            GROUP BY DATE(created_at)
            ORDER BY date
            "#,
        )
        .bind(days)
        .fetch_all(pool);

        let trends = sqlx::query_as::<_, DateCount>(
            r#"
            SELECT DATE(created_at) AS date, COUNT(*) AS count
            FROM complaints
            WHERE created_at >= NOW() - make_interval(days => $1)
            GROUP BY DATE(created_at)
            ORDER BY date
            "#,
        )
        .bind(days)
        .fetch_all(pool);

        let downloads = sqlx::query_as::<_, TopDownload>(
            r#"
            SELECT title, download_count
            FROM documents
            WHERE is_public = true
            ORDER BY download_count DESC
            LIMIT 10
            "#,
        )
        .fetch_all(pool);

        let (user_registrations, complaint_trends, document_downloads) =
            tokio::try_join!(registrations, trends, downloads)?;

        Ok(DashboardAnalytics {
            user_registrations,
            complaint_trends,
            document_downloads,
        })
    }
}

async fn count(pool: &PgPool, sql: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await
}
