use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::models::gallery::{GalleryItem, GalleryListRow};

/// 相册存储库实现
pub struct GalleryRepository;

impl GalleryRepository {
    pub async fn list(
        pool: &PgPool,
        category: Option<String>,
        search: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<GalleryListRow>, i64), sqlx::Error> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT g.*, u.full_name AS uploaded_by_name
            FROM gallery g
            LEFT JOIN users u ON g.uploaded_by = u.id
            WHERE 1=1
            "#,
        );
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM gallery g WHERE 1=1");

        for builder in [&mut query, &mut count] {
            if let Some(category) = &category {
                builder.push(" AND g.category = ").push_bind(category.clone());
            }
            if let Some(search) = &search {
                let pattern = format!("%{search}%");
                builder
                    .push(" AND (g.title ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR g.description ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        }

        query
            .push(" ORDER BY g.created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let items = query.build_query_as::<GalleryListRow>().fetch_all(pool).await?;
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        Ok((items, total))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: Option<&str>,
        category: &str,
        file_path: &str,
        file_size: i64,
        mime_type: Option<&str>,
        tags: Vec<String>,
        uploaded_by: Uuid,
    ) -> Result<GalleryItem, sqlx::Error> {
        sqlx::query_as::<_, GalleryItem>(
            r#"
            INSERT INTO gallery
                (title, description, category, file_path, file_size, mime_type,
                 tags, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(file_path)
        .bind(file_size)
        .bind(mime_type)
        .bind(Json(tags))
        .bind(uploaded_by)
        .fetch_one(pool)
        .await
    }

    /// 详情查看同时累加浏览次数
    pub async fn view(pool: &PgPool, id: Uuid) -> Result<Option<GalleryItem>, sqlx::Error> {
        sqlx::query_as::<_, GalleryItem>(
            r#"
            UPDATE gallery
            SET view_count = view_count + 1
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        title: &str,
        description: Option<&str>,
        category: &str,
        tags: Vec<String>,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        sqlx::query_as::<_, GalleryItem>(
            r#"
            UPDATE gallery
            SET title = $1, description = $2, category = $3, tags = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(Json(tags))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
