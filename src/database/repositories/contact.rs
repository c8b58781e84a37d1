use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::models::contact::Contact;

/// 联系人存储库实现
pub struct ContactRepository;

impl ContactRepository {
    pub async fn list(
        pool: &PgPool,
        department: Option<String>,
        search: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Contact>, i64), sqlx::Error> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM contacts WHERE 1=1");
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM contacts WHERE 1=1");

        for builder in [&mut query, &mut count] {
            if let Some(department) = &department {
                builder.push(" AND department = ").push_bind(department.clone());
            }
            if let Some(search) = &search {
                let pattern = format!("%{search}%");
                builder
                    .push(" AND (name ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR position ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        }

        query
            .push(" ORDER BY department, position LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let contacts = query.build_query_as::<Contact>().fetch_all(pool).await?;
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        Ok((contacts, total))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        name: &str,
        position: &str,
        department: &str,
        phone: Option<&str>,
        email: Option<&str>,
        whatsapp: Option<&str>,
        office_hours: Option<&str>,
        photo: Option<&str>,
    ) -> Result<Contact, sqlx::Error> {
        sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts
                (name, position, department, phone, email, whatsapp, office_hours, photo)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(position)
        .bind(department)
        .bind(phone)
        .bind(email)
        .bind(whatsapp)
        .bind(office_hours)
        .bind(photo)
        .fetch_one(pool)
        .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        name: &str,
        position: &str,
        department: &str,
        phone: Option<&str>,
        email: Option<&str>,
        whatsapp: Option<&str>,
        office_hours: Option<&str>,
        photo: Option<&str>,
    ) -> Result<Option<Contact>, sqlx::Error> {
        sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts
            SET name = $1, position = $2, department = $3, phone = $4, email = $5,
                whatsapp = $6, office_hours = $7, photo = $8, updated_at = NOW()
            WHERE id = $9
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(position)
        .bind(department)
        .bind(phone)
        .bind(email)
        .bind(whatsapp)
        .bind(office_hours)
        .bind(photo)
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
