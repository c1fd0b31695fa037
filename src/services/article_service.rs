use std::collections::HashMap;
use std::sync::OnceLock;

use axum::http::StatusCode;
use chrono::Utc;
use regex::Regex;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::config::{AppState, Config};
use crate::entities::{article, article::ArticleStatus, article_media, article_tag, tag};
use crate::enrichment::{
    enrich, filter_articles, related_articles, ArticleSourceRow, EnrichedArticle, MediaKind,
    MediaSourceRow, TagRef, TagSelector,
};
use crate::models::article_model::*;
use crate::models::tag_model::TagResponse;
use crate::utils::api_response::ServiceError;

/// Which article rows a read touches. Public readers get published articles
/// newest-first by publication date; admin reads sort by creation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusScope {
    Published,
    Drafts,
    All,
}

impl StatusScope {
    fn from_param(param: Option<&str>) -> Result<Self, ServiceError> {
        match param {
            None => Ok(StatusScope::Published),
            Some("published") => Ok(StatusScope::Published),
            Some("draft") => Ok(StatusScope::Drafts),
            Some("all") => Ok(StatusScope::All),
            Some(other) => Err((
                StatusCode::BAD_REQUEST,
                "INVALID_STATUS",
                format!("Unknown status filter '{}'", other),
            )),
        }
    }
}

pub struct ArticleService;

impl ArticleService {
    pub async fn list_articles(
        db: &DatabaseConnection,
        cfg: &Config,
        params: ArticleFilterParams,
    ) -> Result<Vec<ArticleResponse>, ServiceError> {
        let scope = StatusScope::from_param(params.status.as_deref())?;
        let rows = Self::load_enriched(db, scope).await?;

        let enriched: Vec<EnrichedArticle> = rows.iter().map(|(_, _, e)| e.clone()).collect();
        let selector = TagSelector::from_param(params.tag.as_deref());
        let search = params.search.as_deref().unwrap_or("");
        let filtered = filter_articles(&enriched, &selector, search);

        let by_id: HashMap<Uuid, &(article::Model, Vec<tag::Model>, EnrichedArticle)> =
            rows.iter().map(|row| (row.0.public_id, row)).collect();

        Ok(filtered
            .into_iter()
            .filter_map(|e| {
                by_id
                    .get(&e.id)
                    .map(|(model, tags, _)| Self::map_to_response(cfg, model, tags, &e))
            })
            .collect())
    }

    pub async fn get_article(
        db: &DatabaseConnection,
        cfg: &Config,
        public_id: Uuid,
    ) -> Result<ArticleDetailResponse, ServiceError> {
        let (model, tags, enriched) = Self::load_one(db, public_id).await?;

        // Related articles are derived over the published set
        let published = Self::load_enriched(db, StatusScope::Published).await?;
        let published_enriched: Vec<EnrichedArticle> =
            published.iter().map(|(_, _, e)| e.clone()).collect();

        let related = related_articles(&published_enriched, &enriched)
            .into_iter()
            .map(|e| RelatedArticleResponse {
                id: e.id,
                title: e.title,
                description: e.description,
                image_url: e.image_url,
                published_at: e.published_at,
                tags: e.tags,
            })
            .collect();

        Ok(ArticleDetailResponse {
            article: Self::map_to_response(cfg, &model, &tags, &enriched),
            related,
        })
    }

    /// Save orchestration: upsert the article row, relocate temporary media
    /// in storage, then replace the media and tag sets wholesale. Row
    /// replacement runs in the same transaction as the upsert.
    pub async fn save_article(
        state: &AppState,
        existing: Option<Uuid>,
        payload: SaveArticleRequest,
    ) -> Result<ArticleResponse, ServiceError> {
        // Reject unknown media types before writing anything
        let mut media_kinds = Vec::with_capacity(payload.media.len());
        for item in &payload.media {
            let kind = MediaKind::parse(&item.media_type).ok_or((
                StatusCode::BAD_REQUEST,
                "MEDIA_INVALID_TYPE",
                format!("Unknown media type '{}'", item.media_type),
            ))?;
            media_kinds.push(kind);
        }

        let txn = state.db.begin().await.map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TXN_ERR",
                "Transaction start failed".to_string(),
            )
        })?;

        let html_content = render_html_content(&payload.content);
        let now = Utc::now();

        let saved = match existing {
            Some(public_id) => {
                let current = article::Entity::find()
                    .filter(article::Column::PublicId.eq(public_id))
                    .one(&txn)
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
                        "ARTICLE_NOT_FOUND",
                        "Article not found".to_string(),
                    ))?;

                let published_at = payload
                    .published_at
                    .or(current.published_at)
                    .or_else(|| (payload.status == ArticleStatus::Published).then_some(now));

                let mut active: article::ActiveModel = current.into();
                active.title = Set(payload.title);
                active.description = Set(payload.description);
                active.content = Set(payload.content);
                active.html_content = Set(Some(html_content));
                active.status = Set(payload.status);
                active.published_at = Set(published_at);
                active.updated_at = Set(now);

                active.update(&txn).await.map_err(|e| {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DB_WRITE_ERR",
                        format!("Failed to update article: {}", e),
                    )
                })?
            }
            None => {
                let published_at = payload
                    .published_at
                    .or_else(|| (payload.status == ArticleStatus::Published).then_some(now));

                let new_article = article::ActiveModel {
                    id: NotSet,
                    public_id: Set(Uuid::now_v7()),
                    title: Set(payload.title),
                    description: Set(payload.description),
                    content: Set(payload.content),
                    html_content: Set(Some(html_content)),
                    status: Set(payload.status),
                    published_at: Set(published_at),
                    created_at: Set(now),
                    updated_at: Set(now),
                };

                new_article.insert(&txn).await.map_err(|e| {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DB_WRITE_ERR",
                        format!("Failed to create article: {}", e),
                    )
                })?
            }
        };

        // Relocate temporary uploads before their rows are persisted, so the
        // rows carry final URLs. A failed move keeps the temp URL rather than
        // aborting the save.
        let mut final_media: Vec<(String, MediaKind)> = Vec::with_capacity(payload.media.len());
        for (item, kind) in payload.media.into_iter().zip(media_kinds) {
            let mut url = item.media_url;
            if let Some(path) = item.storage_path {
                if let Some(basename) = path.strip_prefix("temp/") {
                    let dest = format!("articles/{}/{}", saved.public_id, basename);
                    match state.s3_service.move_object(&path, &dest).await {
                        Ok(()) => url = state.s3_service.public_url(&dest),
                        Err(e) => {
                            tracing::warn!("media relocation failed for {}: {}", path, e);
                        }
                    }
                }
            }
            final_media.push((url, kind));
        }

        Self::replace_media_rows(&txn, saved.id, &final_media).await?;
        Self::replace_tag_links(&txn, saved.id, &payload.tags).await?;

        txn.commit().await.map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TXN_COMMIT_ERR",
                "Transaction commit failed".to_string(),
            )
        })?;

        let (model, tags, enriched) = Self::load_one(&state.db, saved.public_id).await?;
        Ok(Self::map_to_response(&state.config, &model, &tags, &enriched))
    }

    pub async fn delete_article(state: &AppState, public_id: Uuid) -> Result<(), ServiceError> {
        let found = article::Entity::find()
            .filter(article::Column::PublicId.eq(public_id))
            .one(&state.db)
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
                "ARTICLE_NOT_FOUND",
                "Article not found".to_string(),
            ))?;

        let media = article_media::Entity::find()
            .filter(article_media::Column::ArticleId.eq(found.id))
            .all(&state.db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Failed to fetch media".to_string(),
                )
            })?;

        article::Entity::delete_by_id(found.id)
            .exec(&state.db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_WRITE_ERR",
                    "Failed to delete article".to_string(),
                )
            })?;

        // Storage cleanup is best-effort; the rows are already gone
        for row in media {
            if let Some(key) = state.s3_service.key_from_url(&row.media_url) {
                if let Err(e) = state.s3_service.remove_object(&key).await {
                    tracing::warn!("failed to remove storage object {}: {}", key, e);
                }
            }
        }

        Ok(())
    }

    async fn replace_media_rows<C: ConnectionTrait>(
        conn: &C,
        article_id: i64,
        media: &[(String, MediaKind)],
    ) -> Result<(), ServiceError> {
        article_media::Entity::delete_many()
            .filter(article_media::Column::ArticleId.eq(article_id))
            .exec(conn)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_WRITE_ERR",
                    "Failed to clear media rows".to_string(),
                )
            })?;

        for (index, (url, kind)) in media.iter().enumerate() {
            let row = article_media::ActiveModel {
                id: NotSet,
                article_id: Set(article_id),
                media_url: Set(url.clone()),
                media_type: Set(kind.as_str().to_string()),
                display_order: Set(index as i32),
                created_at: Set(Utc::now()),
            };
            row.insert(conn).await.map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_WRITE_ERR",
                    "Failed to insert media row".to_string(),
                )
            })?;
        }

        Ok(())
    }

    async fn replace_tag_links<C: ConnectionTrait>(
        conn: &C,
        article_id: i64,
        tag_ids: &[Uuid],
    ) -> Result<(), ServiceError> {
        article_tag::Entity::delete_many()
            .filter(article_tag::Column::ArticleId.eq(article_id))
            .exec(conn)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_WRITE_ERR",
                    "Failed to clear tags".to_string(),
                )
            })?;

        for tag_public_id in tag_ids {
            let found = tag::Entity::find()
                .filter(tag::Column::PublicId.eq(*tag_public_id))
                .one(conn)
                .await
                .map_err(|_| {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DB_ERR",
                        "Tag lookup failed".to_string(),
                    )
                })?
                .ok_or((
                    StatusCode::BAD_REQUEST,
                    "TAG_NOT_FOUND",
                    format!("Tag with ID {} not found", tag_public_id),
                ))?;

            let link = article_tag::ActiveModel {
                article_id: Set(article_id),
                tag_id: Set(found.id),
            };
            // A repeated tag id in the payload just collides with itself
            link.insert(conn).await.ok();
        }

        Ok(())
    }

    async fn load_one(
        db: &DatabaseConnection,
        public_id: Uuid,
    ) -> Result<(article::Model, Vec<tag::Model>, EnrichedArticle), ServiceError> {
        let mut rows = article::Entity::find()
            .filter(article::Column::PublicId.eq(public_id))
            .find_with_related(tag::Entity)
            .all(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Database error".to_string(),
                )
            })?;

        if rows.is_empty() {
            return Err((
                StatusCode::NOT_FOUND,
                "ARTICLE_NOT_FOUND",
                "Article not found".to_string(),
            ));
        }
        let (model, tags) = rows.remove(0);

        let media = article_media::Entity::find()
            .filter(article_media::Column::ArticleId.eq(model.id))
            .order_by_asc(article_media::Column::Id)
            .all(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Failed to fetch media".to_string(),
                )
            })?;

        let enriched = Self::enrich_rows(vec![(model.clone(), tags.clone())], media)
            .pop()
            .ok_or((
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_ERR",
                "Enrichment produced no output".to_string(),
            ))?;

        Ok((model, tags, enriched))
    }

    /// Fetch a scope of articles with tags and media, run them through the
    /// enrichment pipeline, and keep the source models alongside for
    /// response mapping.
    async fn load_enriched(
        db: &DatabaseConnection,
        scope: StatusScope,
    ) -> Result<Vec<(article::Model, Vec<tag::Model>, EnrichedArticle)>, ServiceError> {
        let mut query = article::Entity::find();
        query = match scope {
            StatusScope::Published => query
                .filter(article::Column::Status.eq(ArticleStatus::Published))
                .order_by_desc(article::Column::PublishedAt),
            StatusScope::Drafts => query
                .filter(article::Column::Status.eq(ArticleStatus::Draft))
                .order_by_desc(article::Column::CreatedAt),
            StatusScope::All => query.order_by_desc(article::Column::CreatedAt),
        };

        let articles_with_tags = query
            .find_with_related(tag::Entity)
            .all(db)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DB_ERR",
                    "Database error".to_string(),
                )
            })?;

        let ids: Vec<i64> = articles_with_tags.iter().map(|(a, _)| a.id).collect();
        let media = if ids.is_empty() {
            Vec::new()
        } else {
            article_media::Entity::find()
                .filter(article_media::Column::ArticleId.is_in(ids))
                .order_by_asc(article_media::Column::Id)
                .all(db)
                .await
                .map_err(|_| {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DB_ERR",
                        "Failed to fetch media".to_string(),
                    )
                })?
        };

        let enriched = Self::enrich_rows(articles_with_tags.clone(), media);

        Ok(articles_with_tags
            .into_iter()
            .zip(enriched)
            .map(|((model, tags), e)| (model, tags, e))
            .collect())
    }

    fn enrich_rows(
        articles_with_tags: Vec<(article::Model, Vec<tag::Model>)>,
        media: Vec<article_media::Model>,
    ) -> Vec<EnrichedArticle> {
        let public_ids: HashMap<i64, Uuid> = articles_with_tags
            .iter()
            .map(|(a, _)| (a.id, a.public_id))
            .collect();

        let media_rows = media
            .into_iter()
            .filter_map(|m| {
                public_ids.get(&m.article_id).map(|public_id| MediaSourceRow {
                    article_id: *public_id,
                    media_url: Some(m.media_url),
                    media_type: Some(m.media_type),
                    display_order: Some(m.display_order),
                })
            })
            .collect();

        let article_rows = articles_with_tags
            .into_iter()
            .map(|(a, tags)| ArticleSourceRow {
                id: a.public_id,
                title: a.title,
                description: a.description,
                content: a.content,
                published_at: a.published_at,
                tag_joins: tags
                    .into_iter()
                    .map(|t| {
                        Some(TagRef {
                            id: t.public_id,
                            name: t.name,
                            color: t.color,
                        })
                    })
                    .collect(),
            })
            .collect();

        enrich(article_rows, media_rows)
    }

    fn map_to_response(
        cfg: &Config,
        model: &article::Model,
        tags: &[tag::Model],
        enriched: &EnrichedArticle,
    ) -> ArticleResponse {
        let base = cfg.site_base_url.trim_end_matches('/');
        ArticleResponse {
            id: model.public_id,
            title: model.title.clone(),
            description: model.description.clone(),
            content: model.content.clone(),
            html_content: model.html_content.clone(),
            image_url: enriched.image_url.clone(),
            status: model.status,
            published_at: model.published_at,
            tags: tags
                .iter()
                .map(|t| TagResponse {
                    id: t.public_id,
                    name: t.name.clone(),
                    color: t.color.clone(),
                })
                .collect(),
            media: enriched
                .media
                .iter()
                .map(|m| MediaResponse {
                    url: m.url.clone(),
                    media_type: m.kind,
                    display_order: m.display_order,
                })
                .collect(),
            share_url: format!("{}/api/share/article/{}", base, model.public_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Escape the raw content and wrap detected http(s) URLs in anchors.
/// Newlines become `<br/>` so plain-text paragraphs survive display.
fn render_html_content(content: &str) -> String {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    let re = URL_RE.get_or_init(|| Regex::new(r"https?://[^\s<>]+").expect("valid url regex"));

    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    for m in re.find_iter(content) {
        out.push_str(&html_escape::encode_text(&content[last..m.start()]));
        let url = m.as_str();
        out.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            html_escape::encode_double_quoted_attribute(url),
            html_escape::encode_text(url),
        ));
        last = m.end();
    }
    out.push_str(&html_escape::encode_text(&content[last..]));
    out.replace('\n', "<br/>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_escaped() {
        let html = render_html_content("a < b & c");
        assert_eq!(html, "a &lt; b &amp; c");
    }

    #[test]
    fn urls_become_anchors() {
        let html = render_html_content("read more at https://news.example/story today");
        assert!(html.contains(
            "<a href=\"https://news.example/story\" target=\"_blank\" rel=\"noopener noreferrer\">https://news.example/story</a>"
        ));
        assert!(html.starts_with("read more at "));
        assert!(html.ends_with(" today"));
    }

    #[test]
    fn newlines_become_breaks() {
        let html = render_html_content("first\nsecond");
        assert_eq!(html, "first<br/>second");
    }

    #[test]
    fn markup_in_content_cannot_escape_into_the_page() {
        let html = render_html_content("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn status_scope_parses_known_filters() {
        assert_eq!(
            StatusScope::from_param(None).unwrap(),
            StatusScope::Published
        );
        assert_eq!(
            StatusScope::from_param(Some("all")).unwrap(),
            StatusScope::All
        );
        assert_eq!(
            StatusScope::from_param(Some("draft")).unwrap(),
            StatusScope::Drafts
        );
        assert!(StatusScope::from_param(Some("archived")).is_err());
    }
}
