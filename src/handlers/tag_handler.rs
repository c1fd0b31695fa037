use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::config::AppState;
use crate::models::tag_model::{CreateTagRequest, UpdateTagRequest};
use crate::services::tag_service::TagService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn list_tags_handler(State(state): State<AppState>) -> impl IntoResponse {
    match TagService::list_tags(&state.db).await {
        Ok(res) => ResponseBuilder::success("TAGS_FETCHED", "Success", res).into_response(),
        Err(e) => ResponseBuilder::service_error::<()>(e).into_response(),
    }
}

pub async fn create_tag_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateTagRequest>,
) -> impl IntoResponse {
    match TagService::create_tag(&state.db, payload).await {
        Ok(res) => ResponseBuilder::created("TAG_CREATED", "Tag created", res).into_response(),
        Err(e) => ResponseBuilder::service_error::<()>(e).into_response(),
    }
}

pub async fn update_tag_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTagRequest>,
) -> impl IntoResponse {
    match TagService::update_tag(&state.db, id, payload).await {
        Ok(res) => ResponseBuilder::success("TAG_UPDATED", "Tag updated", res).into_response(),
        Err(e) => ResponseBuilder::service_error::<()>(e).into_response(),
    }
}

pub async fn delete_tag_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match TagService::delete_tag(&state.db, id).await {
        Ok(()) => ResponseBuilder::success::<()>("TAG_DELETED", "Tag deleted", ()).into_response(),
        Err(e) => ResponseBuilder::service_error::<()>(e).into_response(),
    }
}
