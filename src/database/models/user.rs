use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// 封闭角色集合，权限判断一律用枚举匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Warga,
    Operator,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Warga => "warga",
            Role::Operator => "operator",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "warga" => Some(Role::Warga),
            "operator" => Some(Role::Operator),
            "admin" => Some(Role::Admin),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// 普通居民只能看到自己的数据
    pub fn is_citizen(self) -> bool {
        match self {
            Role::Warga => true,
            Role::Operator | Role::Admin | Role::SuperAdmin => false,
        }
    }

    pub fn is_admin(self) -> bool {
        match self {
            Role::Admin | Role::SuperAdmin => true,
            Role::Warga | Role::Operator => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn parsed_role(&self) -> Option<Role> {
        Role::from_str(&self.role)
    }
}

/// 用户列表行，不携带密码散列
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Warga, Role::Operator, Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str("root"), None);
        assert_eq!(Role::from_str("Admin"), None);
    }

    #[test]
    fn role_predicates_are_exhaustive() {
        assert!(Role::Warga.is_citizen());
        assert!(!Role::Operator.is_citizen());
        assert!(!Role::Admin.is_citizen());

        assert!(Role::Admin.is_admin());
        assert!(Role::SuperAdmin.is_admin());
        assert!(!Role::Operator.is_admin());
        assert!(!Role::Warga.is_admin());
    }
}
