use axum::http::StatusCode;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::config::AppState;
use crate::entities::article;
use crate::enrichment::MediaKind;
use crate::models::media_model::{MediaUploadResponse, RemoveMediaResponse};
use crate::utils::api_response::ServiceError;

const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub struct MediaService;

impl MediaService {
    /// Store an uploaded file. Files for an article that does not exist yet
    /// land under `temp/` and are relocated when the article is saved.
    pub async fn upload(
        state: &AppState,
        article_id: Option<Uuid>,
        file_name: String,
        file_data: Vec<u8>,
        content_type: String,
    ) -> Result<MediaUploadResponse, ServiceError> {
        if file_data.len() > MAX_UPLOAD_BYTES {
            return Err((
                StatusCode::BAD_REQUEST,
                "MEDIA_TOO_LARGE",
                "File size exceeds 20MB".to_string(),
            ));
        }

        let kind = Self::kind_from_content_type(&content_type).ok_or((
            StatusCode::BAD_REQUEST,
            "MEDIA_INVALID_TYPE",
            "Only image and video uploads are supported".to_string(),
        ))?;

        // An explicit article id must resolve; otherwise the file would be
        // stranded under a prefix no save will ever reconcile.
        if let Some(public_id) = article_id {
            let exists = article::Entity::find()
                .filter(article::Column::PublicId.eq(public_id))
                .one(&state.db)
                .await
                .map_err(|_| {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DB_ERR",
                        "Database error".to_string(),
                    )
                })?;
            if exists.is_none() {
                return Err((
                    StatusCode::NOT_FOUND,
                    "ARTICLE_NOT_FOUND",
                    "Article not found".to_string(),
                ));
            }
        }

        let key = Self::build_storage_key(article_id, Uuid::now_v7(), &file_name);

        let url = state
            .s3_service
            .upload_file(file_data, key.clone(), content_type)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_UPLOAD_ERR",
                    format!("Upload failed: {}", e),
                )
            })?;

        Ok(MediaUploadResponse {
            url,
            storage_path: key,
            media_type: kind,
        })
    }

    /// Immediate storage removal. Failures are collected and reported; the
    /// caller drops the item from its form state either way.
    pub async fn remove(state: &AppState, paths: Vec<String>) -> RemoveMediaResponse {
        let mut removed = Vec::new();
        let mut failed = Vec::new();

        for path in paths {
            match state.s3_service.remove_object(&path).await {
                Ok(()) => removed.push(path),
                Err(e) => {
                    tracing::warn!("failed to remove media object {}: {}", path, e);
                    failed.push(path);
                }
            }
        }

        RemoveMediaResponse { removed, failed }
    }

    fn kind_from_content_type(content_type: &str) -> Option<MediaKind> {
        if content_type.starts_with("image/") {
            Some(MediaKind::Image)
        } else if content_type.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    fn build_storage_key(article_id: Option<Uuid>, unique: Uuid, file_name: &str) -> String {
        let safe: String = file_name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '-'
                }
            })
            .collect();

        match article_id {
            Some(public_id) => format!("articles/{}/{}-{}", public_id, unique, safe),
            None => format!("temp/{}-{}", unique, safe),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_uses_temp_prefix_without_article() {
        let key = MediaService::build_storage_key(None, Uuid::from_u128(7), "photo.jpg");
        assert_eq!(
            key,
            "temp/00000000-0000-0000-0000-000000000007-photo.jpg"
        );
    }

    #[test]
    fn storage_key_uses_article_prefix_when_known() {
        let article = Uuid::from_u128(1);
        let key = MediaService::build_storage_key(Some(article), Uuid::from_u128(7), "clip.mp4");
        assert!(key.starts_with(&format!("articles/{}/", article)));
        assert!(key.ends_with("-clip.mp4"));
    }

    #[test]
    fn storage_key_sanitizes_file_names() {
        let key = MediaService::build_storage_key(None, Uuid::from_u128(7), "my photo (1).jpg");
        assert!(key.ends_with("-my-photo--1-.jpg"));
    }

    #[test]
    fn content_type_maps_to_media_kind() {
        assert_eq!(
            MediaService::kind_from_content_type("image/png"),
            Some(MediaKind::Image)
        );
        assert_eq!(
            MediaService::kind_from_content_type("video/mp4"),
            Some(MediaKind::Video)
        );
        assert_eq!(MediaService::kind_from_content_type("application/pdf"), None);
    }
}
