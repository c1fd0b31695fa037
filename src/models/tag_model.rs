use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

#[derive(Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, message = "Tag name cannot be empty"))]
    pub name: String,

    #[validate(length(min = 4, max = 9, message = "Color must be a hex value like #3b82f6"))]
    pub color: String,
}

#[derive(Deserialize, Validate)]
pub struct UpdateTagRequest {
    #[validate(length(min = 1, message = "Tag name cannot be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 4, max = 9, message = "Color must be a hex value like #3b82f6"))]
    pub color: Option<String>,
}
