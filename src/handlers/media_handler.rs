use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::config::AppState;
use crate::models::media_model::{MediaUploadResponse, RemoveMediaRequest};
use crate::services::media_service::MediaService;
use crate::utils::api_response::ResponseBuilder;

pub async fn upload_media_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut article_id: Option<Uuid> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name: String = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                content_type = Some(
                    field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string(),
                );
                file_name = Some(field.file_name().unwrap_or("upload").to_string());

                match field.bytes().await {
                    Ok(bytes) => file_data = Some(bytes.to_vec()),
                    Err(e) => {
                        return ResponseBuilder::error::<MediaUploadResponse>(
                            StatusCode::BAD_REQUEST,
                            "UPLOAD_ERROR",
                            &format!("Failed to read file: {}", e),
                        )
                        .into_response();
                    }
                }
            }
            "article_id" => {
                let raw = field.text().await.unwrap_or_default();
                if raw.is_empty() {
                    continue;
                }
                match Uuid::parse_str(&raw) {
                    Ok(id) => article_id = Some(id),
                    Err(_) => {
                        return ResponseBuilder::error::<MediaUploadResponse>(
                            StatusCode::BAD_REQUEST,
                            "INVALID_ARTICLE_ID",
                            "article_id is not a valid UUID",
                        )
                        .into_response();
                    }
                }
            }
            _ => {}
        }
    }

    let (Some(data), Some(name), Some(ctype)) = (file_data, file_name, content_type) else {
        return ResponseBuilder::error::<MediaUploadResponse>(
            StatusCode::BAD_REQUEST,
            "FILE_MISSING",
            "Multipart field 'file' is required",
        )
        .into_response();
    };

    match MediaService::upload(&state, article_id, name, data, ctype).await {
        Ok(res) => {
            ResponseBuilder::success("UPLOAD_SUCCESS", "File uploaded successfully", res)
                .into_response()
        }
        Err(e) => ResponseBuilder::service_error::<()>(e).into_response(),
    }
}

pub async fn remove_media_handler(
    State(state): State<AppState>,
    Json(payload): Json<RemoveMediaRequest>,
) -> impl IntoResponse {
    let res = MediaService::remove(&state, payload.paths).await;
    if res.failed.is_empty() {
        ResponseBuilder::success("MEDIA_REMOVED", "Media removed", res).into_response()
    } else {
        // Partial failure still reports what happened; nothing to retry here
        ResponseBuilder::fail_with_data(
            StatusCode::MULTI_STATUS,
            "MEDIA_REMOVE_PARTIAL",
            "Some media objects could not be removed",
            res,
        )
        .into_response()
    }
}
