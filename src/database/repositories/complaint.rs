use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::models::complaint::{Attachment, Complaint, ComplaintListRow};

const LIST_SELECT: &str = r#"
    SELECT c.*, u.full_name AS user_name, a.full_name AS assigned_name
    FROM complaints c
    LEFT JOIN users u ON c.user_id = u.id
    LEFT JOIN users a ON c.assigned_to = a.id
    WHERE 1=1
"#;

// high > normal > low，再按创建时间倒序
const LIST_ORDER: &str = r#"
    ORDER BY CASE c.priority
        WHEN 'high' THEN 3
        WHEN 'normal' THEN 2
        ELSE 1
    END DESC, c.created_at DESC
"#;

/// 投诉存储库实现
pub struct ComplaintRepository;

impl ComplaintRepository {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: &str,
        category: &str,
        location: Option<&str>,
        priority: &str,
        user_id: Uuid,
        attachments: Vec<Attachment>,
    ) -> Result<Complaint, sqlx::Error> {
        sqlx::query_as::<_, Complaint>(
            r#"
            INSERT INTO complaints (title, description, category, location, priority, user_id, attachments)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(location)
        .bind(priority)
        .bind(user_id)
        .bind(Json(attachments))
        .fetch_one(pool)
        .await
    }

    /// 列表查询；owner 限定提交人（warga 只能看自己的投诉）
    pub async fn list(
        pool: &PgPool,
        owner: Option<Uuid>,
        status: Option<String>,
        category: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ComplaintListRow>, i64), sqlx::Error> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(LIST_SELECT);
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM complaints c WHERE 1=1");

        for builder in [&mut query, &mut count] {
            if let Some(owner) = owner {
                builder.push(" AND c.user_id = ").push_bind(owner);
            }
            if let Some(status) = &status {
                builder.push(" AND c.status = ").push_bind(status.clone());
            }
            if let Some(category) = &category {
                builder.push(" AND c.category = ").push_bind(category.clone());
            }
        }

        query
            .push(LIST_ORDER)
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let complaints = query
            .build_query_as::<ComplaintListRow>()
            .fetch_all(pool)
            .await?;
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        Ok((complaints, total))
    }

    /// 状态推进。条件更新限定在非终态行上，终态投诉不再变化
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: &str,
        response: Option<&str>,
        assigned_to: Option<Uuid>,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        sqlx::query_as::<_, Complaint>(
            r#"
            UPDATE complaints
            SET status = $1, response = $2, assigned_to = $3, updated_at = NOW()
            WHERE id = $4 AND status IN ('submitted', 'in_progress')
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(response)
        .bind(assigned_to)
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// 评分。所有前置条件（本人、已解决、未评过分）并入同一条
    /// 条件更新，两个并发请求至多一个命中
    pub async fn rate(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        rating: i32,
        feedback: Option<&str>,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        sqlx::query_as::<_, Complaint>(
            r#"
            UPDATE complaints
            SET rating = $1, feedback = $2, updated_at = NOW()
            WHERE id = $3 AND user_id = $4 AND status = 'resolved' AND rating IS NULL
            RETURNING *
            "#,
        )
        .bind(rating)
        .bind(feedback)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
