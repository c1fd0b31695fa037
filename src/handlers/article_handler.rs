use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::config::AppState;
use crate::models::article_model::*;
use crate::services::article_service::ArticleService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn list_articles_handler(
    State(state): State<AppState>,
    Query(params): Query<ArticleFilterParams>,
) -> impl IntoResponse {
    match ArticleService::list_articles(&state.db, &state.config, params).await {
        Ok(res) => ResponseBuilder::success("ARTICLES_FETCHED", "Success", res).into_response(),
        Err(e) => ResponseBuilder::service_error::<()>(e).into_response(),
    }
}

pub async fn get_article_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match ArticleService::get_article(&state.db, &state.config, id).await {
        Ok(res) => ResponseBuilder::success("ARTICLE_FETCHED", "Success", res).into_response(),
        Err(e) => ResponseBuilder::service_error::<()>(e).into_response(),
    }
}

pub async fn create_article_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SaveArticleRequest>,
) -> impl IntoResponse {
    match ArticleService::save_article(&state, None, payload).await {
        Ok(res) => ResponseBuilder::created("ARTICLE_CREATED", "Article created", res).into_response(),
        Err(e) => ResponseBuilder::service_error::<()>(e).into_response(),
    }
}

pub async fn update_article_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<SaveArticleRequest>,
) -> impl IntoResponse {
    match ArticleService::save_article(&state, Some(id), payload).await {
        Ok(res) => ResponseBuilder::success("ARTICLE_UPDATED", "Article updated", res).into_response(),
        Err(e) => ResponseBuilder::service_error::<()>(e).into_response(),
    }
}

pub async fn delete_article_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match ArticleService::delete_article(&state, id).await {
        Ok(()) => ResponseBuilder::success::<()>("ARTICLE_DELETED", "Article deleted", ()).into_response(),
        Err(e) => ResponseBuilder::service_error::<()>(e).into_response(),
    }
}
