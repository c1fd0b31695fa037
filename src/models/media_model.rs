use serde::{Deserialize, Serialize};

use crate::enrichment::MediaKind;

#[derive(Serialize)]
pub struct MediaUploadResponse {
    pub url: String,
    pub storage_path: String,
    pub media_type: MediaKind,
}

#[derive(Deserialize)]
pub struct RemoveMediaRequest {
    pub paths: Vec<String>,
}

// Removal is best-effort; failed paths are reported, not fatal
#[derive(Serialize)]
pub struct RemoveMediaResponse {
    pub removed: Vec<String>,
    pub failed: Vec<String>,
}
