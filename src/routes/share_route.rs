use axum::{routing::get, Router};

use crate::config::AppState;
use crate::handlers::share_handler::share_article_handler;

pub fn share_routes() -> Router<AppState> {
    Router::new().route("/article/{id}", get(share_article_handler))
}
