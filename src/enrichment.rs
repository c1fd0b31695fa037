//! Merges raw article rows, tag joins and media rows into the denormalized
//! display model served by the article API, and derives the related-articles
//! and list-filter views over it. Pure functions; the services feed them rows
//! and never touch the merge logic themselves.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "image" => Some(MediaKind::Image),
            "video" => Some(MediaKind::Video),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TagRef {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

/// One article row as read from the database, with its tag joins resolved.
/// A `None` join is a dangling association and is skipped during enrichment.
#[derive(Debug, Clone)]
pub struct ArticleSourceRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: String,
    pub published_at: Option<DateTime<Utc>>,
    pub tag_joins: Vec<Option<TagRef>>,
}

/// One media row, loosely typed on purpose: rows with a missing url or an
/// unrecognized type must be dropped without aborting the whole read.
#[derive(Debug, Clone)]
pub struct MediaSourceRow {
    pub article_id: Uuid,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaItem {
    pub url: String,
    pub kind: MediaKind,
    pub display_order: i32,
}

impl MediaItem {
    fn from_source(row: MediaSourceRow) -> Option<(Uuid, MediaItem)> {
        let url = row.media_url.filter(|u| !u.is_empty())?;
        let kind = MediaKind::parse(row.media_type.as_deref()?)?;
        let item = MediaItem {
            url,
            kind,
            display_order: row.display_order.unwrap_or(0),
        };
        Some((row.article_id, item))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrichedArticle {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: String,
    pub image_url: String,
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub media: Vec<MediaItem>,
}

/// Join article rows with their media groups. Output order equals input
/// article order, and no article is dropped, media or not.
pub fn enrich(articles: Vec<ArticleSourceRow>, media: Vec<MediaSourceRow>) -> Vec<EnrichedArticle> {
    let mut groups: HashMap<Uuid, Vec<MediaItem>> = HashMap::new();
    for row in media {
        if let Some((article_id, item)) = MediaItem::from_source(row) {
            groups.entry(article_id).or_default().push(item);
        }
    }

    articles
        .into_iter()
        .map(|article| {
            let group = groups.remove(&article.id).unwrap_or_default();
            // The Open Graph image is the first image in row order, not in
            // display order.
            let image_url = group
                .iter()
                .find(|m| m.kind == MediaKind::Image)
                .map(|m| m.url.clone())
                .unwrap_or_default();

            let mut sorted = group;
            sorted.sort_by_key(|m| m.display_order);

            let tags: Vec<String> = article
                .tag_joins
                .into_iter()
                .flatten()
                .map(|t| t.name)
                .collect();

            EnrichedArticle {
                id: article.id,
                title: article.title,
                description: article.description,
                content: article.content,
                image_url,
                published_at: article.published_at,
                tags,
                media: sorted,
            }
        })
        .collect()
}

/// Every article sharing at least one tag with `current`, excluding
/// `current` itself. No ranking and no cap; callers truncate for display.
pub fn related_articles(all: &[EnrichedArticle], current: &EnrichedArticle) -> Vec<EnrichedArticle> {
    if current.tags.is_empty() {
        return Vec::new();
    }
    let current_tags: HashSet<&str> = current.tags.iter().map(String::as_str).collect();
    all.iter()
        .filter(|a| a.id != current.id)
        .filter(|a| a.tags.iter().any(|t| current_tags.contains(t.as_str())))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSelector {
    All,
    Named(String),
}

impl TagSelector {
    /// "All" (any casing), empty, or absent means no tag constraint.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None => TagSelector::All,
            Some(s) if s.is_empty() || s.eq_ignore_ascii_case("all") => TagSelector::All,
            Some(s) => TagSelector::Named(s.to_string()),
        }
    }
}

/// Conjunction of the tag predicate and a case-folded substring search over
/// title, description and content.
pub fn filter_articles(
    all: &[EnrichedArticle],
    selector: &TagSelector,
    search: &str,
) -> Vec<EnrichedArticle> {
    let needle = search.to_lowercase();
    all.iter()
        .filter(|a| match selector {
            TagSelector::All => true,
            TagSelector::Named(name) => a.tags.iter().any(|t| t == name),
        })
        .filter(|a| {
            needle.is_empty()
                || a.title.to_lowercase().contains(&needle)
                || a.description.to_lowercase().contains(&needle)
                || a.content.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: u128, title: &str, tags: &[&str]) -> ArticleSourceRow {
        ArticleSourceRow {
            id: Uuid::from_u128(id),
            title: title.to_string(),
            description: format!("{} description", title),
            content: format!("{} content", title),
            published_at: None,
            tag_joins: tags
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    Some(TagRef {
                        id: Uuid::from_u128(1000 + i as u128),
                        name: name.to_string(),
                        color: "#3b82f6".to_string(),
                    })
                })
                .collect(),
        }
    }

    fn media(article_id: u128, url: &str, kind: &str, order: i32) -> MediaSourceRow {
        MediaSourceRow {
            article_id: Uuid::from_u128(article_id),
            media_url: Some(url.to_string()),
            media_type: Some(kind.to_string()),
            display_order: Some(order),
        }
    }

    #[test]
    fn enrich_preserves_article_count_and_order() {
        let articles = vec![
            article(1, "First", &["Technology"]),
            article(2, "Second", &[]),
            article(3, "Third", &["Sports"]),
        ];
        let out = enrich(articles, vec![media(1, "a.jpg", "image", 0)]);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].title, "First");
        assert_eq!(out[1].title, "Second");
        assert_eq!(out[2].title, "Third");
        assert!(out[1].media.is_empty());
        assert!(out[1].tags.is_empty());
    }

    #[test]
    fn media_sorted_by_display_order() {
        let rows = vec![
            media(1, "third.jpg", "image", 3),
            media(1, "first.jpg", "image", 1),
            media(1, "second.mp4", "video", 2),
        ];
        let out = enrich(vec![article(1, "A", &[])], rows);
        let urls: Vec<&str> = out[0].media.iter().map(|m| m.url.as_str()).collect();
        assert_eq!(urls, vec!["first.jpg", "second.mp4", "third.jpg"]);
    }

    #[test]
    fn display_order_ties_keep_row_order() {
        let rows = vec![
            media(1, "a.jpg", "image", 1),
            media(1, "b.jpg", "image", 1),
            media(1, "c.jpg", "image", 0),
        ];
        let out = enrich(vec![article(1, "A", &[])], rows);
        let urls: Vec<&str> = out[0].media.iter().map(|m| m.url.as_str()).collect();
        assert_eq!(urls, vec!["c.jpg", "a.jpg", "b.jpg"]);
    }

    #[test]
    fn image_url_is_first_image_in_row_order() {
        let rows = vec![
            media(1, "clip.mp4", "video", 0),
            media(1, "late.jpg", "image", 9),
            media(1, "early.jpg", "image", 1),
        ];
        let out = enrich(vec![article(1, "A", &[])], rows);
        // First image by row order, even though "early.jpg" sorts first.
        assert_eq!(out[0].image_url, "late.jpg");
    }

    #[test]
    fn image_url_empty_when_only_video_media() {
        let rows = vec![media(1, "clip.mp4", "video", 0)];
        let out = enrich(vec![article(1, "A", &[])], rows);
        assert_eq!(out[0].image_url, "");
        assert_eq!(out[0].media.len(), 1);
    }

    #[test]
    fn malformed_media_rows_are_dropped_silently() {
        let rows = vec![
            MediaSourceRow {
                article_id: Uuid::from_u128(1),
                media_url: None,
                media_type: Some("image".to_string()),
                display_order: Some(0),
            },
            MediaSourceRow {
                article_id: Uuid::from_u128(1),
                media_url: Some("gif.gif".to_string()),
                media_type: Some("gif".to_string()),
                display_order: Some(1),
            },
            MediaSourceRow {
                article_id: Uuid::from_u128(1),
                media_url: Some(String::new()),
                media_type: Some("image".to_string()),
                display_order: Some(2),
            },
            media(1, "ok.jpg", "image", 3),
        ];
        let out = enrich(vec![article(1, "A", &[])], rows);
        assert_eq!(out[0].media.len(), 1);
        assert_eq!(out[0].media[0].url, "ok.jpg");
    }

    #[test]
    fn dangling_tag_joins_are_skipped() {
        let mut row = article(1, "A", &["Technology"]);
        row.tag_joins.push(None);
        row.tag_joins.push(Some(TagRef {
            id: Uuid::from_u128(7),
            name: "Science".to_string(),
            color: "#8b5cf6".to_string(),
        }));
        let out = enrich(vec![row], vec![]);
        assert_eq!(out[0].tags, vec!["Technology", "Science"]);
    }

    #[test]
    fn enrich_of_empty_inputs_is_empty() {
        assert!(enrich(vec![], vec![]).is_empty());
    }

    #[test]
    fn related_excludes_current_by_id() {
        let all = enrich(
            vec![
                article(1, "A", &["Technology"]),
                article(2, "B", &["Technology"]),
            ],
            vec![],
        );
        let related = related_articles(&all, &all[0]);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, Uuid::from_u128(2));
    }

    #[test]
    fn related_empty_for_tagless_article() {
        let all = enrich(
            vec![article(1, "A", &[]), article(2, "B", &["Technology"])],
            vec![],
        );
        assert!(related_articles(&all, &all[0]).is_empty());
    }

    #[test]
    fn related_requires_shared_tag() {
        let all = enrich(
            vec![
                article(1, "A", &["Technology", "Health"]),
                article(2, "B", &["Health"]),
                article(3, "C", &["Sports"]),
            ],
            vec![],
        );
        let related = related_articles(&all, &all[0]);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].title, "B");
    }

    #[test]
    fn filter_all_and_empty_search_is_identity() {
        let all = enrich(
            vec![article(1, "A", &["Technology"]), article(2, "B", &[])],
            vec![],
        );
        let out = filter_articles(&all, &TagSelector::from_param(Some("All")), "");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, all[0].id);
        assert_eq!(out[1].id, all[1].id);
    }

    #[test]
    fn filter_is_conjunctive_over_tag_and_search() {
        let mut quantum = article(1, "Quantum Computing Breakthrough", &["Technology"]);
        quantum.content = "room temperature qubits".to_string();
        let all = enrich(
            vec![quantum, article(2, "Markets Rally", &["Technology"])],
            vec![],
        );
        let out = filter_articles(
            &all,
            &TagSelector::Named("Technology".to_string()),
            "quantum",
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, Uuid::from_u128(1));
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let all = enrich(vec![article(1, "Quantum Leap", &[])], vec![]);
        assert_eq!(filter_articles(&all, &TagSelector::All, "QUANTUM").len(), 1);
        assert_eq!(filter_articles(&all, &TagSelector::All, "description").len(), 1);
        assert_eq!(filter_articles(&all, &TagSelector::All, "missing").len(), 0);
    }

    #[test]
    fn media_kind_parse_rejects_unknown_values() {
        assert_eq!(MediaKind::parse("image"), Some(MediaKind::Image));
        assert_eq!(MediaKind::parse("video"), Some(MediaKind::Video));
        assert_eq!(MediaKind::parse("Image"), None);
        assert_eq!(MediaKind::parse(""), None);
    }
}
