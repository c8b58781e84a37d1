use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::models::event::{Event, EventListRow};

/// 活动存储库实现
pub struct EventRepository;

impl EventRepository {
    pub async fn list_public(
        pool: &PgPool,
        category: Option<String>,
        month: Option<i32>,
        year: Option<i32>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<EventListRow>, i64), sqlx::Error> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT e.*, u.full_name AS creator_name
            FROM events e
            LEFT JOIN users u ON e.created_by = u.id
            WHERE e.is_public = true
            "#,
        );
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM events e WHERE e.is_public = true");

        for builder in [&mut query, &mut count] {
            if let Some(category) = &category {
                builder.push(" AND e.category = ").push_bind(category.clone());
            }
            if let (Some(month), Some(year)) = (month, year) {
                builder
                    .push(" AND EXTRACT(MONTH FROM e.start_date) = ")
                    .push_bind(month)
                    .push(" AND EXTRACT(YEAR FROM e.start_date) = ")
                    .push_bind(year);
            }
        }

        query
            .push(" ORDER BY e.start_date ASC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let events = query.build_query_as::<EventListRow>().fetch_all(pool).await?;
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        Ok((events, total))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: Option<&str>,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        location: Option<&str>,
        organizer: Option<&str>,
        category: &str,
        max_participants: Option<i32>,
        is_public: bool,
        created_by: Uuid,
    ) -> Result<Event, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events
                (title, description, start_date, end_date, location, organizer,
                 category, max_participants, is_public, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(start_date)
        .bind(end_date)
        .bind(location)
        .bind(organizer)
        .bind(category)
        .bind(max_participants)
        .bind(is_public)
        .bind(created_by)
        .fetch_one(pool)
        .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        title: &str,
        description: Option<&str>,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        location: Option<&str>,
        organizer: Option<&str>,
        category: &str,
        max_participants: Option<i32>,
        is_public: bool,
    ) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = $1, description = $2, start_date = $3, end_date = $4,
                location = $5, organizer = $6, category = $7, max_participants = $8,
                is_public = $9, updated_at = NOW()
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(start_date)
        .bind(end_date)
        .bind(location)
        .bind(organizer)
        .bind(category)
        .bind(max_participants)
        .bind(is_public)
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
