use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::admin_user;
use crate::services::auth_service::AuthService;

/// Create the admin account from environment credentials if it does not
/// exist yet. Without ADMIN_PASSWORD the seeder is skipped entirely.
pub async fn seed_admin_user(db: &DatabaseConnection) -> Result<(), String> {
    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@newshub.local".to_string());
    let password = match std::env::var("ADMIN_PASSWORD") {
        Ok(p) if !p.is_empty() => p,
        _ => {
            tracing::warn!("ADMIN_PASSWORD not set, skipping admin seeder");
            return Ok(());
        }
    };

    let exists = admin_user::Entity::find()
        .filter(admin_user::Column::Username.eq(&username))
        .one(db)
        .await
        .map_err(|e| e.to_string())?;

    if exists.is_none() {
        let password_hash = AuthService::hash_password(&password).map_err(|e| e.to_string())?;

        let new_admin = admin_user::ActiveModel {
            public_id: Set(Uuid::now_v7()),
            username: Set(username.clone()),
            email: Set(email),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        new_admin.insert(db).await.map_err(|e| e.to_string())?;
        tracing::info!("Seeded admin user: {}", username);
    }

    Ok(())
}
