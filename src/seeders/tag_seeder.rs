use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::tag;

pub async fn seed_tags(db: &DatabaseConnection) -> Result<(), String> {
    let tags = vec![
        ("Technology", "#3b82f6"),
        ("Science", "#8b5cf6"),
        ("Environment", "#22c55e"),
        ("Politics", "#ef4444"),
        ("Business", "#eab308"),
        ("Sports", "#f97316"),
        ("Health", "#14b8a6"),
        ("Entertainment", "#ec4899"),
    ];

    for (name, color) in tags {
        let exists = tag::Entity::find()
            .filter(tag::Column::Name.eq(name))
            .one(db)
            .await
            .map_err(|e| e.to_string())?;

        if exists.is_none() {
            let new_tag = tag::ActiveModel {
                public_id: Set(Uuid::now_v7()),
                name: Set(name.to_string()),
                color: Set(color.to_string()),
                created_at: Set(Utc::now()),
                ..Default::default()
            };
            new_tag.insert(db).await.map_err(|e| e.to_string())?;
            tracing::info!("Seeded tag: {}", name);
        }
    }

    Ok(())
}
