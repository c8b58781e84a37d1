use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::models::document::{Document, DocumentListRow};

/// 文档存储库实现
pub struct DocumentRepository;

impl DocumentRepository {
    pub async fn list_public(
        pool: &PgPool,
        category: Option<String>,
        search: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<DocumentListRow>, i64), sqlx::Error> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT d.*, u.full_name AS uploaded_by_name
            FROM documents d
            LEFT JOIN users u ON d.uploaded_by = u.id
            WHERE d.is_public = true
            "#,
        );
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM documents d WHERE d.is_public = true");

        for builder in [&mut query, &mut count] {
            if let Some(category) = &category {
                builder.push(" AND d.category = ").push_bind(category.clone());
            }
            if let Some(search) = &search {
                let pattern = format!("%{search}%");
                builder
                    .push(" AND (d.title ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR d.description ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        }

        query
            .push(" ORDER BY d.created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let documents = query
            .build_query_as::<DocumentListRow>()
            .fetch_all(pool)
            .await?;
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        Ok((documents, total))
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
        uploaded_by: Uuid,
        is_public: bool,
    ) -> Result<Document, sqlx::Error> {
        sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents
                (title, description, category, file_path, file_size, mime_type,
                 uploaded_by, is_public)
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
        .bind(uploaded_by)
        .bind(is_public)
        .fetch_one(pool)
        .await
    }

    /// 取出可下载的文档并累加下载次数，单条语句完成
    pub async fn take_for_download(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<Document>, sqlx::Error> {
        sqlx::query_as::<_, Document>(
            r#"
            UPDATE documents
            SET download_count = download_count + 1
            WHERE id = $1 AND is_public = true
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
        is_public: bool,
    ) -> Result<Option<Document>, sqlx::Error> {
        sqlx::query_as::<_, Document>(
            r#"
            UPDATE documents
            SET title = $1, description = $2, category = $3, is_public = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(is_public)
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
