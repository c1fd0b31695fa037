use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::config::AppState;
use crate::entities::admin_user;
use crate::models::auth_model::CurrentAdmin;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::jwt_utils::JwtUtils;

/// Guards admin routes. Validates the Bearer token, confirms the admin
/// account still exists, and injects it as a request extension.
pub async fn jwt_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = match req.headers().get(header::AUTHORIZATION) {
        Some(header) => header,
        None => {
            return Ok(ResponseBuilder::error::<()>(
                StatusCode::UNAUTHORIZED,
                "AUTH_MISSING",
                "Authorization header is missing",
            )
            .into_response());
        }
    };

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(_) => {
            return Ok(ResponseBuilder::error::<()>(
                StatusCode::UNAUTHORIZED,
                "AUTH_INVALID_FORMAT",
                "Invalid Authorization header format",
            )
            .into_response());
        }
    };

    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Ok(ResponseBuilder::error::<()>(
            StatusCode::UNAUTHORIZED,
            "AUTH_INVALID_SCHEME",
            "Invalid token format. Missing 'Bearer ' prefix",
        )
        .into_response());
    };

    let token_data = match JwtUtils::validate_token(&state.config, token) {
        Ok(data) => data,
        Err(e) => {
            let (code, message) = match e.kind() {
                ErrorKind::ExpiredSignature => ("TOKEN_EXPIRED", "Token has expired"),
                ErrorKind::InvalidToken => ("TOKEN_INVALID", "Token is invalid"),
                ErrorKind::InvalidSignature => ("TOKEN_BAD_SIGNATURE", "Invalid token signature"),
                _ => ("AUTH_FAILED", "Authentication failed"),
            };

            return Ok(
                ResponseBuilder::error::<()>(StatusCode::UNAUTHORIZED, code, message)
                    .into_response(),
            );
        }
    };

    let claims = token_data.claims;

    // The token may outlive the account; re-check on every request
    let admin = match admin_user::Entity::find()
        .filter(admin_user::Column::PublicId.eq(claims.sub))
        .one(&state.db)
        .await
    {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            return Ok(ResponseBuilder::error::<()>(
                StatusCode::UNAUTHORIZED,
                "ADMIN_NOT_FOUND",
                "Admin account no longer exists",
            )
            .into_response());
        }
        Err(_) => {
            return Ok(ResponseBuilder::error::<()>(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_ERR",
                "Database error",
            )
            .into_response());
        }
    };

    let current_admin = CurrentAdmin {
        id: admin.public_id,
        username: admin.username,
        email: admin.email,
    };
    req.extensions_mut().insert(current_admin);

    Ok(next.run(req).await)
}
