use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::database::models::user::Role;

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), DEFAULT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}

/// 访问令牌声明，角色与邮箱随令牌下发
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// 刷新令牌声明，只携带用户ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

pub fn generate_access_token(
    user_id: Uuid,
    email: &str,
    role: Role,
    config: &Config,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::seconds(
            config.access_token_expiration().as_secs() as i64,
        ))
        .expect("valid timestamp")
        .timestamp();

    let claims = AccessClaims {
        user_id,
        email: email.to_string(),
        role,
        iat: now.timestamp(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

pub fn generate_refresh_token(
    user_id: Uuid,
    config: &Config,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::seconds(
            config.refresh_token_expiration().as_secs() as i64,
        ))
        .expect("valid timestamp")
        .timestamp();

    let claims = RefreshClaims {
        user_id,
        iat: now.timestamp(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
    )
}

pub fn verify_access_token(
    token: &str,
    config: &Config,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

pub fn verify_refresh_token(
    token: &str,
    config: &Config,
) -> Result<RefreshClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/test".into(),
            redis_url: "redis://localhost".into(),
            jwt_secret: "access-secret-for-tests".into(),
            refresh_token_secret: "refresh-secret-for-tests".into(),
            access_token_expiration_secs: 3600,
            refresh_token_expiration_secs: 7 * 86400,
            rate_limit_window_secs: 900,
            rate_limit_requests: 100,
            server_host: "127.0.0.1".into(),
            server_port: 5000,
            api_base_uri: "/api".into(),
            upload_dir: "uploads".into(),
        }
    }

    #[test]
    fn hashed_password_never_equals_plaintext() {
        let hashed = hash_password("password123").unwrap();
        assert_ne!(hashed, "password123");
        assert!(verify_password("password123", &hashed).unwrap());
        assert!(!verify_password("password124", &hashed).unwrap());
    }

    #[test]
    fn access_token_round_trip() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token =
            generate_access_token(user_id, "alice@example.com", Role::Warga, &config).unwrap();
        let claims = verify_access_token(&token, &config).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, Role::Warga);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_token_round_trip() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = generate_refresh_token(user_id, &config).unwrap();
        let claims = verify_refresh_token(&token, &config).unwrap();

        assert_eq!(claims.user_id, user_id);
    }

    #[test]
    fn secrets_are_not_interchangeable() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        // 刷新令牌不能当访问令牌用，反之亦然
        let refresh = generate_refresh_token(user_id, &config).unwrap();
        assert!(verify_access_token(&refresh, &config).is_err());

        let access =
            generate_access_token(user_id, "a@example.com", Role::Admin, &config).unwrap();
        assert!(verify_refresh_token(&access, &config).is_err());
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let config = test_config();
        let other = Config {
            jwt_secret: "a-different-secret".into(),
            ..test_config()
        };

        let token =
            generate_access_token(Uuid::new_v4(), "a@example.com", Role::Warga, &other).unwrap();
        assert!(verify_access_token(&token, &config).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            user_id: Uuid::new_v4(),
            email: "a@example.com".into(),
            role: Role::Warga,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_access_token(&token, &config).is_err());
    }
}
