use axum::http::StatusCode;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::config::Config;
use crate::entities::{article, article_media};
use crate::enrichment::{enrich, ArticleSourceRow, MediaSourceRow};
use crate::utils::api_response::ServiceError;

pub struct ShareService;

impl ShareService {
    /// Link-preview HTML for crawlers: Open Graph + Twitter card meta tags
    /// and a client redirect for anyone following the share link.
    pub async fn share_page(
        db: &DatabaseConnection,
        cfg: &Config,
        public_id: Uuid,
    ) -> Result<String, ServiceError> {
        let found = article::Entity::find()
            .filter(article::Column::PublicId.eq(public_id))
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
                "ARTICLE_NOT_FOUND",
                "Article not found".to_string(),
            ))?;

        let media = article_media::Entity::find()
            .filter(article_media::Column::ArticleId.eq(found.id))
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

        // Run the single row through the enrichment pipeline so the preview
        // image is derived exactly like everywhere else.
        let source = ArticleSourceRow {
            id: found.public_id,
            title: found.title.clone(),
            description: found.description.clone(),
            content: found.content.clone(),
            published_at: found.published_at,
            tag_joins: Vec::new(),
        };
        let media_rows = media
            .into_iter()
            .map(|m| MediaSourceRow {
                article_id: found.public_id,
                media_url: Some(m.media_url),
                media_type: Some(m.media_type),
                display_order: Some(m.display_order),
            })
            .collect();

        let enriched = enrich(vec![source], media_rows);
        let image_url = enriched
            .first()
            .map(|e| e.image_url.clone())
            .unwrap_or_default();

        Ok(Self::render_page(
            cfg,
            &found.title,
            &found.description,
            &image_url,
            found.public_id,
        ))
    }

    fn render_page(
        cfg: &Config,
        title: &str,
        description: &str,
        image_url: &str,
        id: Uuid,
    ) -> String {
        let og_title = html_escape::encode_double_quoted_attribute(title);
        let og_description = html_escape::encode_double_quoted_attribute(description);
        let og_image = html_escape::encode_double_quoted_attribute(image_url);
        let base = cfg.site_base_url.trim_end_matches('/');

        format!(
            r#"<!DOCTYPE html>
<html>
  <head>
    <meta property="og:title" content="{og_title}" />
    <meta property="og:description" content="{og_description}" />
    <meta property="og:image" content="{og_image}" />
    <meta property="og:url" content="{base}/article/{id}" />
    <meta name="twitter:card" content="summary_large_image" />
  </head>
  <body>
    <script>
      window.location.href = "/article/{id}";
    </script>
  </body>
</html>
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_config() -> Config {
        Config {
            server_host: String::new(),
            server_port: 0,
            database_url: String::new(),
            jwt_secret: String::new(),
            jwt_expires_in: 60,
            s3_endpoint: String::new(),
            s3_region: String::new(),
            s3_access_key: String::new(),
            s3_secret_key: String::new(),
            s3_bucket_name: String::new(),
            site_base_url: "https://news.example/".to_string(),
        }
    }

    fn article_model(id: i64, public_id: Uuid, title: &str) -> article::Model {
        article::Model {
            id,
            public_id,
            title: title.to_string(),
            description: "A breakthrough".to_string(),
            content: "Full text".to_string(),
            html_content: None,
            status: article::ArticleStatus::Published,
            published_at: Some(Utc::now()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn media_model(id: i64, article_id: i64, url: &str, kind: &str, order: i32) -> article_media::Model {
        article_media::Model {
            id,
            article_id,
            media_url: url.to_string(),
            media_type: kind.to_string(),
            display_order: order,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn rendered_page_escapes_title_into_og_tag() {
        let page = ShareService::render_page(
            &test_config(),
            r#"Quantum "Leap" <Breakthrough>"#,
            "desc",
            "",
            Uuid::from_u128(5),
        );
        assert!(page.contains(r#"property="og:title""#));
        assert!(page.contains("Quantum &quot;Leap&quot; &lt;Breakthrough&gt;"));
        assert!(!page.contains(r#"content="Quantum "Leap""#));
    }

    #[test]
    fn rendered_page_links_back_to_article_route() {
        let page = ShareService::render_page(&test_config(), "T", "d", "img.jpg", Uuid::from_u128(5));
        assert!(page.contains(&format!(
            "https://news.example/article/{}",
            Uuid::from_u128(5)
        )));
        assert!(page.contains(&format!(
            "window.location.href = \"/article/{}\"",
            Uuid::from_u128(5)
        )));
        assert!(page.contains("summary_large_image"));
    }

    #[tokio::test]
    async fn share_page_returns_not_found_for_missing_article() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<article::Model>::new()])
            .into_connection();

        let err = ShareService::share_page(&db, &test_config(), Uuid::from_u128(9))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
        assert_eq!(err.1, "ARTICLE_NOT_FOUND");
    }

    #[tokio::test]
    async fn share_page_uses_first_image_for_og_image() {
        let public_id = Uuid::from_u128(3);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![article_model(1, public_id, "Hello")]])
            .append_query_results([vec![
                media_model(1, 1, "clip.mp4", "video", 0),
                media_model(2, 1, "cover.jpg", "image", 1),
            ]])
            .into_connection();

        let page = ShareService::share_page(&db, &test_config(), public_id)
            .await
            .unwrap();
        assert!(page.contains(r#"<meta property="og:image" content="cover.jpg" />"#));
        assert!(page.contains(r#"<meta property="og:title" content="Hello" />"#));
    }
}
