use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use uuid::Uuid;

use crate::config::AppState;
use crate::services::share_service::ShareService;

/// Crawler-facing endpoint; responds with raw HTML or plain text, never the
/// JSON envelope.
pub async fn share_article_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let Ok(public_id) = Uuid::parse_str(&id) else {
        return (StatusCode::NOT_FOUND, "Article not found").into_response();
    };

    match ShareService::share_page(&state.db, &state.config, public_id).await {
        Ok(html) => Html(html).into_response(),
        Err((status, _, message)) => {
            if status == StatusCode::NOT_FOUND {
                (StatusCode::NOT_FOUND, "Article not found").into_response()
            } else {
                tracing::error!("share page failed for {}: {}", id, message);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
