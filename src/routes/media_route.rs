use axum::{
    middleware,
    routing::{delete, post},
    Router,
};

use crate::config::AppState;
use crate::handlers::media_handler::*;
use crate::middleware::{jwt_middleware::jwt_middleware, rate_limiter::rate_limit_middleware};

pub fn media_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_media_handler))
        .route("/", delete(remove_media_handler))
        .layer(middleware::from_fn_with_state(state.clone(), jwt_middleware))
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}
