use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error contract shared by every service: HTTP status, stable machine code,
/// human message.
pub type ServiceError = (StatusCode, &'static str, String);

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Serialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub title: String,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    fn new(status: &str, code: &str, message: &str, data: Option<T>) -> Self {
        Self {
            status: status.to_string(),
            code: code.to_string(),
            message: message.to_string(),
            data,
        }
    }
}

// Pairs the HTTP status with the envelope body
pub struct ApiResponseResult<T>(pub StatusCode, pub ApiResponse<T>);

impl<T> IntoResponse for ApiResponseResult<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

pub struct ResponseBuilder;

impl ResponseBuilder {
    pub fn success<T: Serialize>(code: &str, message: &str, data: T) -> ApiResponseResult<T> {
        ApiResponseResult(
            StatusCode::OK,
            ApiResponse::new("success", code, message, Some(data)),
        )
    }

    pub fn created<T: Serialize>(code: &str, message: &str, data: T) -> ApiResponseResult<T> {
        ApiResponseResult(
            StatusCode::CREATED,
            ApiResponse::new("success", code, message, Some(data)),
        )
    }

    pub fn error<T: Serialize>(
        status_code: StatusCode,
        code: &str,
        message: &str,
    ) -> ApiResponseResult<T> {
        ApiResponseResult(
            status_code,
            ApiResponse::new("error", code, message, None),
        )
    }

    /// Convert a service-layer error into the envelope.
    pub fn service_error<T: Serialize>((status, code, message): ServiceError) -> ApiResponseResult<T> {
        Self::error(status, code, &message)
    }

    pub fn fail_with_data<T: Serialize>(
        status_code: StatusCode,
        code: &str,
        message: &str,
        data: T,
    ) -> ApiResponseResult<T> {
        ApiResponseResult(
            status_code,
            ApiResponse::new("error", code, message, Some(data)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_carries_data() {
        let ApiResponseResult(status, body) =
            ResponseBuilder::success("ARTICLES_FETCHED", "Success", vec![1, 2]);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "success");
        assert_eq!(body.data, Some(vec![1, 2]));
    }

    #[test]
    fn service_error_maps_status_and_code() {
        let err: ServiceError = (
            StatusCode::NOT_FOUND,
            "ARTICLE_NOT_FOUND",
            "Article not found".to_string(),
        );
        let ApiResponseResult(status, body) = ResponseBuilder::service_error::<()>(err);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "ARTICLE_NOT_FOUND");
        assert!(body.data.is_none());
    }
}
