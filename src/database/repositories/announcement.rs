use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::models::announcement::{Announcement, AnnouncementListRow};

/// 公告存储库实现
pub struct AnnouncementRepository;

impl AnnouncementRepository {
    /// 公开列表：只返回已发布且计划时间已到的公告
    pub async fn list_published(
        pool: &PgPool,
        category: Option<String>,
        search: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<AnnouncementListRow>, i64), sqlx::Error> {
        let visible = " AND a.status = 'published' AND (a.scheduled_at IS NULL OR a.scheduled_at <= NOW())";

        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT a.*, u.full_name AS author_name
            FROM announcements a
            LEFT JOIN users u ON a.author_id = u.id
            WHERE 1=1
            "#,
        );
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM announcements a WHERE 1=1");

        for builder in [&mut query, &mut count] {
            builder.push(visible);
            if let Some(category) = &category {
                builder.push(" AND a.category = ").push_bind(category.clone());
            }
            if let Some(search) = &search {
                let pattern = format!("%{search}%");
                builder
                    .push(" AND (a.title ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR a.content ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        }

        query
            .push(
                r#"
                ORDER BY CASE a.priority
                    WHEN 'high' THEN 3
                    WHEN 'normal' THEN 2
                    ELSE 1
                END DESC, a.created_at DESC
                "#,
            )
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let announcements = query
            .build_query_as::<AnnouncementListRow>()
            .fetch_all(pool)
            .await?;
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        Ok((announcements, total))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        title: &str,
        content: &str,
        category: &str,
        priority: &str,
        author_id: Uuid,
        scheduled_at: Option<DateTime<Utc>>,
        status: &str,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<Announcement, sqlx::Error> {
        sqlx::query_as::<_, Announcement>(
            r#"
            INSERT INTO announcements
                (title, content, category, priority, author_id, scheduled_at, status, published_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(category)
        .bind(priority)
        .bind(author_id)
        .bind(scheduled_at)
        .bind(status)
        .bind(published_at)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        title: &str,
        content: &str,
        category: &str,
        priority: &str,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        sqlx::query_as::<_, Announcement>(
            r#"
            UPDATE announcements
            SET title = $1, content = $2, category = $3, priority = $4,
                scheduled_at = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(category)
        .bind(priority)
        .bind(scheduled_at)
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
