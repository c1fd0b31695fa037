use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::article::ArticleStatus;
use crate::enrichment::MediaKind;
use crate::models::tag_model::TagResponse;

#[derive(Deserialize, Validate)]
pub struct SaveArticleRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[serde(default = "default_status")]
    pub status: ArticleStatus,

    pub published_at: Option<DateTime<Utc>>,

    // Tag public ids; membership is replaced wholesale on save
    #[serde(default)]
    pub tags: Vec<Uuid>,

    // Final media list in presentation order
    #[serde(default)]
    pub media: Vec<MediaInput>,
}

fn default_status() -> ArticleStatus {
    ArticleStatus::Draft
}

#[derive(Deserialize)]
pub struct MediaInput {
    pub media_url: String,
    // Storage key, present for files this service uploaded. Keys under
    // "temp/" are relocated to the article prefix on save.
    pub storage_path: Option<String>,
    pub media_type: String,
}

#[derive(Deserialize)]
pub struct ArticleFilterParams {
    pub tag: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct MediaResponse {
    pub url: String,
    pub media_type: MediaKind,
    pub display_order: i32,
}

#[derive(Serialize)]
pub struct ArticleResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: String,
    pub html_content: Option<String>,
    pub image_url: String,
    pub status: ArticleStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Vec<TagResponse>,
    pub media: Vec<MediaResponse>,
    pub share_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Card shape for "related articles" strips
#[derive(Serialize)]
pub struct RelatedArticleResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

#[derive(Serialize)]
pub struct ArticleDetailResponse {
    pub article: ArticleResponse,
    pub related: Vec<RelatedArticleResponse>,
}
