use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{info, instrument};

use domain::{format::classify, naming::validate_object_key};

use crate::{
    config::UploadSettings,
    error::{AppError, AppResult},
    ports::{incoming::upload::UploadImageUseCase, outgoing::object_store::DynObjectStorePort},
};

const JSON_MIME: &str = "application/json";
const OCTET_STREAM_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct UploadCommand {
    /// Base64 payload.
    pub data: String,
    pub filename: Option<String>,
    /// Declared `Content-Type` of the request, if any.
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub size: usize,
}

pub struct UploadService {
    settings: UploadSettings,
    object_store: DynObjectStorePort,
}

impl UploadService {
    pub fn new(settings: UploadSettings, object_store: DynObjectStorePort) -> Arc<Self> {
        Arc::new(Self {
            settings,
            object_store,
        })
    }

    /// Lowercased media type without parameters, `None` for JSON bodies.
    fn declared_mime(&self, content_type: Option<&str>) -> AppResult<Option<String>> {
        let Some(content_type) = content_type else {
            return Ok(None);
        };
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == JSON_MIME {
            return Ok(None);
        }
        if self.settings.allowed_mime_types.iter().any(|m| *m == essence) {
            return Ok(Some(essence));
        }
        Err(AppError::ValidationError {
            message: format!("Invalid Mime Type '{essence}'"),
        })
    }

    fn decode_payload(&self, data: &str) -> AppResult<Vec<u8>> {
        let data = data.trim();
        if data.is_empty() {
            return Err(AppError::ValidationError {
                message: "Parameter \"data\" is required!".to_string(),
            });
        }

        let bytes = STANDARD.decode(data).map_err(|_| AppError::ValidationError {
            message: "Parameter \"data\" must be Base64 Encoded!".to_string(),
        })?;

        if bytes.is_empty() {
            return Err(AppError::ValidationError {
                message: "Body must not be Empty".to_string(),
            });
        }
        if bytes.len() > self.settings.max_payload_bytes {
            return Err(AppError::ValidationError {
                message: format!(
                    "Payload of {} bytes exceeds the limit of {} bytes",
                    bytes.len(),
                    self.settings.max_payload_bytes
                ),
            });
        }
        Ok(bytes)
    }
}

/// Lowercase hex SHA-256 of the payload, used when no filename is given.
#[must_use]
pub fn content_address(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[async_trait::async_trait]
impl UploadImageUseCase for UploadService {
    #[instrument(skip(self, command), fields(filename = ?command.filename))]
    async fn upload(&self, command: UploadCommand) -> AppResult<UploadReceipt> {
        let declared = self.declared_mime(command.content_type.as_deref())?;
        let bytes = self.decode_payload(&command.data)?;

        let key = match command.filename {
            Some(filename) => {
                validate_object_key(&filename)?;
                filename
            }
            None => content_address(&bytes),
        };

        let content_type = classify(&key)
            .image_format()
            .map(|format| format.mime_type().to_string())
            .or(declared)
            .unwrap_or_else(|| OCTET_STREAM_MIME.to_string());

        let size = bytes.len();
        self.object_store
            .put_object(&self.settings.source_bucket, &key, bytes, &content_type)
            .await?;

        info!(
            bucket = %self.settings.source_bucket,
            key = %key,
            content_type = %content_type,
            size,
            "Stored upload"
        );

        Ok(UploadReceipt {
            bucket: self.settings.source_bucket.clone(),
            key,
            content_type,
            size,
        })
    }
}
