use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::models::user::{User, UserSummary};

const SUMMARY_COLUMNS: &str =
    "id, email, full_name, role, is_active, phone, address, created_at";

/// 用户存储库实现
pub struct UserRepository;

impl UserRepository {
    /// 注册新用户，角色固定为默认值 warga
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        full_name: &str,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, full_name, phone, address)
            VALUES (LOWER($1), $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(full_name)
        .bind(phone)
        .bind(address)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = LOWER($1)")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// 管理端用户列表，支持姓名/邮箱模糊搜索与角色过滤
    pub async fn list(
        pool: &PgPool,
        search: Option<String>,
        role: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<UserSummary>, i64), sqlx::Error> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {SUMMARY_COLUMNS} FROM users WHERE 1=1"));
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM users WHERE 1=1");

        if let Some(search) = search {
            let pattern = format!("%{search}%");
            for builder in [&mut query, &mut count] {
                builder
                    .push(" AND (full_name ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR email ILIKE ")
                    .push_bind(pattern.clone())
                    .push(")");
            }
        }

        if let Some(role) = role {
            for builder in [&mut query, &mut count] {
                builder.push(" AND role = ").push_bind(role.clone());
            }
        }

        query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let users = query.build_query_as::<UserSummary>().fetch_all(pool).await?;
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        Ok((users, total))
    }

    pub async fn update_profile(
        pool: &PgPool,
        id: Uuid,
        full_name: &str,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<UserSummary, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(&format!(
            r#"
            UPDATE users
            SET full_name = $1, phone = $2, address = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING {SUMMARY_COLUMNS}
            "#
        ))
        .bind(full_name)
        .bind(phone)
        .bind(address)
        .bind(id)
        .fetch_one(pool)
        .await
    }

    pub async fn update_password(
        pool: &PgPool,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn update_role(
        pool: &PgPool,
        id: Uuid,
        role: &str,
    ) -> Result<Option<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(&format!(
            r#"
            UPDATE users
            SET role = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {SUMMARY_COLUMNS}
            "#
        ))
        .bind(role)
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// 软删除开关：停用后已签发令牌会在认证中间件被拒
    pub async fn set_active(
        pool: &PgPool,
        id: Uuid,
        is_active: bool,
    ) -> Result<Option<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(&format!(
            r#"
            UPDATE users
            SET is_active = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {SUMMARY_COLUMNS}
            "#
        ))
        .bind(is_active)
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
