use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::http::StatusCode;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::config::Config;
use crate::entities::admin_user;
use crate::models::auth_model::{AdminProfile, LoginResponse};
use crate::utils::api_response::ServiceError;
use crate::utils::jwt_utils::JwtUtils;

pub struct AuthService;

impl AuthService {
    /// Credential check against `admin_users`. The failure message is the
    /// same for unknown username and wrong password.
    pub async fn login(
        db: &DatabaseConnection,
        cfg: &Config,
        username: String,
        password: String,
    ) -> Result<LoginResponse, ServiceError> {
        let admin = admin_user::Entity::find()
            .filter(admin_user::Column::Username.eq(&username))
            .one(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Database error".to_string(),
                )
            })?
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "AUTH_FAILED",
                "Invalid username or password".to_string(),
            ))?;

        let is_valid = Self::verify_password(&password, &admin.password_hash).map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "HASH_ERR",
                "Password verification failed".to_string(),
            )
        })?;

        if !is_valid {
            return Err((
                StatusCode::UNAUTHORIZED,
                "AUTH_FAILED",
                "Invalid username or password".to_string(),
            ));
        }

        let (token, token_expires_at) =
            JwtUtils::generate_token(cfg, admin.public_id, &admin.username).map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "JWT_ERR",
                    "Token generation failed".to_string(),
                )
            })?;

        Ok(LoginResponse {
            token,
            token_expires_at,
            admin: AdminProfile {
                id: admin.public_id,
                username: admin.username,
                email: admin.email,
            },
        })
    }

    pub async fn profile(
        db: &DatabaseConnection,
        admin_id: Uuid,
    ) -> Result<AdminProfile, ServiceError> {
        let admin = admin_user::Entity::find()
            .filter(admin_user::Column::PublicId.eq(admin_id))
            .one(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Database error".to_string(),
                )
            })?
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "ADMIN_NOT_FOUND",
                "Admin account no longer exists".to_string(),
            ))?;

        Ok(AdminProfile {
            id: admin.public_id,
            username: admin.username,
            email: admin.email,
        })
    }

    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
    }

    pub fn verify_password(
        password: &str,
        hash: &str,
    ) -> Result<bool, argon2::password_hash::Error> {
        let parsed = PasswordHash::new(hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_accepts_original_password() {
        let hash = AuthService::hash_password("tiger@1234").unwrap();
        assert!(AuthService::verify_password("tiger@1234", &hash).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = AuthService::hash_password("correct horse").unwrap();
        assert!(!AuthService::verify_password("battery staple", &hash).unwrap());
    }

    #[tokio::test]
    async fn login_with_unknown_username_fails_uniformly() {
        use sea_orm::{DatabaseBackend, MockDatabase};

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<admin_user::Model>::new()])
            .into_connection();
        let cfg = Config {
            server_host: String::new(),
            server_port: 0,
            database_url: String::new(),
            jwt_secret: "secret".to_string(),
            jwt_expires_in: 15,
            s3_endpoint: String::new(),
            s3_region: String::new(),
            s3_access_key: String::new(),
            s3_secret_key: String::new(),
            s3_bucket_name: String::new(),
            site_base_url: String::new(),
        };

        let err = AuthService::login(&db, &cfg, "ghost".to_string(), "pw".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
        assert_eq!(err.1, "AUTH_FAILED");
    }
}
