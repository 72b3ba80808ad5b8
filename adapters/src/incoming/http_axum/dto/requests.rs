use serde::Deserialize;
use validator::Validate;

/// Body of `POST /upload`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadRequest {
    /// Base64-encoded object bytes.
    #[serde(default)]
    #[validate(length(min = 1, message = "Parameter \"data\" is required!"))]
    pub data: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 1024, message = "filename must be 1-1024 characters"))]
    pub filename: Option<String>,
}

/// Query-string fallback for the filename.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadQuery {
    pub filename: Option<String>,
}
