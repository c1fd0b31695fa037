use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::config::AppState;
use crate::handlers::tag_handler::*;
use crate::middleware::{jwt_middleware::jwt_middleware, rate_limiter::rate_limit_middleware};

pub fn tag_routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_tag_handler))
        .route("/{id}", put(update_tag_handler).delete(delete_tag_handler))
        .layer(middleware::from_fn_with_state(state.clone(), jwt_middleware));

    Router::new()
        .route("/", get(list_tags_handler))
        .merge(admin)
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}
