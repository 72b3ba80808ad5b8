use serde::Deserialize;
use std::borrow::Cow;
use tracing::debug;

use domain::event::ObjectEvent;
use thumbgen_application::error::{AppError, AppResult};

use super::ProviderEventAdapter;

#[derive(Debug, Deserialize)]
pub struct S3Notification {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Deserialize)]
pub struct S3EventRecord {
    #[serde(rename = "eventName", default)]
    pub event_name: Option<String>,
    pub s3: S3Entity,
}

#[derive(Debug, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct S3Object {
    pub key: String,
}

/// AWS S3 bucket notification. Only the first record is handled.
pub struct S3EventAdapter;

impl ProviderEventAdapter for S3EventAdapter {
    type Payload = S3Notification;

    const PROVIDER: &'static str = "s3";

    fn translate(payload: S3Notification) -> AppResult<ObjectEvent> {
        let record_count = payload.records.len();
        let record = payload
            .records
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ValidationError {
                message: "S3 notification contains no records".to_string(),
            })?;

        if record_count > 1 {
            debug!(record_count, "Ignoring all but the first S3 record");
        }

        let key = decode_key(&record.s3.object.key)?;
        Ok(ObjectEvent::new(record.s3.bucket.name, key, record.event_name)?)
    }
}

/// Object keys arrive form-urlencoded: `+` is a space.
pub fn decode_key(raw: &str) -> AppResult<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .map_err(|e| AppError::ValidationError {
            message: format!("Object key '{raw}' is not valid UTF-8 after decoding: {e}"),
        })
}
