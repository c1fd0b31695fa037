use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::config::AppState;
use crate::handlers::article_handler::*;
use crate::middleware::{jwt_middleware::jwt_middleware, rate_limiter::rate_limit_middleware};

pub fn article_routes(state: AppState) -> Router<AppState> {
    // Admin mutations sit behind the JWT guard; reads stay public
    let admin = Router::new()
        .route("/", post(create_article_handler))
        .route(
            "/{id}",
            put(update_article_handler).delete(delete_article_handler),
        )
        .layer(middleware::from_fn_with_state(state.clone(), jwt_middleware));

    Router::new()
        .route("/", get(list_articles_handler))
        .route("/{id}", get(get_article_handler))
        .merge(admin)
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}
