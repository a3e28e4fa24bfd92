use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    /// Public URL of the stored object
    pub url: String,
    /// Storage key, `{folder}/{epoch_millis}-{file_name}`
    pub path: String,
    /// Content type the object was stored with
    #[serde(rename = "type")]
    pub content_type: String,
}

/// `multipart/form-data` body accepted by `POST /api/upload`.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Target folder, `uploads` when empty or missing
    pub folder: Option<String>,
}
