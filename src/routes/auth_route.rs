use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::config::AppState;
use crate::handlers::auth_handler::*;
use crate::middleware::{jwt_middleware::jwt_middleware, rate_limiter::rate_limit_middleware};

pub fn auth_routes(state: AppState) -> Router<AppState> {
    let guarded = Router::new()
        .route("/profile", get(profile_handler))
        .layer(middleware::from_fn_with_state(state.clone(), jwt_middleware));

    Router::new()
        .route("/login", post(login_handler))
        .merge(guarded)
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}
