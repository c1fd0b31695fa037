use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppState;

pub mod article_route;
pub mod auth_route;
pub mod media_route;
pub mod share_route;
pub mod tag_route;

pub fn create_routes(state: AppState) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/auth", auth_route::auth_routes(state.clone()))
        .nest("/api/articles", article_route::article_routes(state.clone()))
        .nest("/api/tags", tag_route::tag_routes(state.clone()))
        .nest("/api/media", media_route::media_routes(state))
        .nest("/api/share", share_route::share_routes())
        .route(
            "/api/health",
            axum::routing::get(crate::handlers::health_check_handler),
        )
        .layer(cors)
}
