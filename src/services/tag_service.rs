use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::tag;
use crate::models::tag_model::{CreateTagRequest, TagResponse, UpdateTagRequest};
use crate::utils::api_response::ServiceError;

pub struct TagService;

impl TagService {
    pub async fn list_tags(db: &DatabaseConnection) -> Result<Vec<TagResponse>, ServiceError> {
        let tags = tag::Entity::find()
            .order_by_asc(tag::Column::Name)
            .all(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Failed to fetch tags".to_string(),
                )
            })?;

        Ok(tags.into_iter().map(Self::map_to_response).collect())
    }

    pub async fn create_tag(
        db: &DatabaseConnection,
        payload: CreateTagRequest,
    ) -> Result<TagResponse, ServiceError> {
        let exists = tag::Entity::find()
            .filter(tag::Column::Name.eq(&payload.name))
            .one(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Tag lookup failed".to_string(),
                )
            })?;

        if exists.is_some() {
            return Err((
                StatusCode::CONFLICT,
                "TAG_EXISTS",
                format!("Tag '{}' already exists", payload.name),
            ));
        }

        let new_tag = tag::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            name: Set(payload.name),
            color: Set(payload.color),
            created_at: Set(Utc::now()),
        };

        let saved = new_tag.insert(db).await.map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_WRITE_ERR",
                format!("Failed to create tag: {}", e),
            )
        })?;

        Ok(Self::map_to_response(saved))
    }

    pub async fn update_tag(
        db: &DatabaseConnection,
        public_id: Uuid,
        payload: UpdateTagRequest,
    ) -> Result<TagResponse, ServiceError> {
        let existing = Self::find_by_public_id(db, public_id).await?;

        if let Some(new_name) = &payload.name {
            let clash = tag::Entity::find()
                .filter(tag::Column::Name.eq(new_name))
                .filter(tag::Column::Id.ne(existing.id))
                .one(db)
                .await
                .map_err(|_| {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DB_ERR",
                        "Tag lookup failed".to_string(),
                    )
                })?;
            if clash.is_some() {
                return Err((
                    StatusCode::CONFLICT,
                    "TAG_EXISTS",
                    format!("Tag '{}' already exists", new_name),
                ));
            }
        }

        let mut active: tag::ActiveModel = existing.into();
        if let Some(name) = payload.name {
            active.name = Set(name);
        }
        if let Some(color) = payload.color {
            active.color = Set(color);
        }

        let updated = active.update(db).await.map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_WRITE_ERR",
                format!("Failed to update tag: {}", e),
            )
        })?;

        Ok(Self::map_to_response(updated))
    }

    // Association rows go with it via FK cascade
    pub async fn delete_tag(db: &DatabaseConnection, public_id: Uuid) -> Result<(), ServiceError> {
        let existing = Self::find_by_public_id(db, public_id).await?;

        tag::Entity::delete_by_id(existing.id)
            .exec(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_WRITE_ERR",
                    "Failed to delete tag".to_string(),
                )
            })?;

        Ok(())
    }

    async fn find_by_public_id(
        db: &DatabaseConnection,
        public_id: Uuid,
    ) -> Result<tag::Model, ServiceError> {
        tag::Entity::find()
            .filter(tag::Column::PublicId.eq(public_id))
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
                StatusCode::NOT_FOUND,
                "TAG_NOT_FOUND",
                "Tag not found".to_string(),
            ))
    }

    fn map_to_response(model: tag::Model) -> TagResponse {
        TagResponse {
            id: model.public_id,
            name: model.name,
            color: model.color,
        }
    }
}
