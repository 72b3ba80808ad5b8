use serde::Deserialize;

use domain::event::ObjectEvent;
use thumbgen_application::error::{AppError, AppResult};

use super::ProviderEventAdapter;

/// Action arguments from an object-storage trigger.
#[derive(Debug, Deserialize)]
pub struct OpenWhiskObjectEvent {
    pub bucket: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub file: Option<OpenWhiskFile>,
}

#[derive(Debug, Deserialize)]
pub struct OpenWhiskFile {
    #[serde(rename = "Key", default)]
    pub key: Option<String>,
}

pub struct OpenWhiskEventAdapter;

impl ProviderEventAdapter for OpenWhiskEventAdapter {
    type Payload = OpenWhiskObjectEvent;

    const PROVIDER: &'static str = "openwhisk";

    fn translate(payload: OpenWhiskObjectEvent) -> AppResult<ObjectEvent> {
        let bucket = payload.bucket.ok_or_else(|| AppError::ValidationError {
            message: "Parameter \"bucket\" is required!".to_string(),
        })?;

        let key = payload
            .file
            .and_then(|file| file.key)
            .or(payload.key)
            .ok_or_else(|| AppError::ValidationError {
                message: "Event carries neither \"file.Key\" nor \"key\"".to_string(),
            })?;

        Ok(ObjectEvent::new(bucket, key, payload.status)?)
    }
}
