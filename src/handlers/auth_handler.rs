use axum::{extract::State, response::IntoResponse, Extension};

use crate::config::AppState;
use crate::models::auth_model::{CurrentAdmin, LoginRequest};
use crate::services::auth_service::AuthService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn login_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> impl IntoResponse {
    match AuthService::login(&state.db, &state.config, payload.username, payload.password).await {
        Ok(res) => ResponseBuilder::success("LOGIN_SUCCESS", "Logged in", res).into_response(),
        Err(e) => ResponseBuilder::service_error::<()>(e).into_response(),
    }
}

// Token revalidation for the client-held session marker
pub async fn profile_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> impl IntoResponse {
    match AuthService::profile(&state.db, admin.id).await {
        Ok(res) => ResponseBuilder::success("PROFILE_FETCHED", "Success", res).into_response(),
        Err(e) => ResponseBuilder::service_error::<()>(e).into_response(),
    }
}
