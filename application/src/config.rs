use crate::{error::AppResult, infrastructure_config::Config};
use domain::{
    dimensions::{BoundingBox, FitSpec},
    event::EventFilter,
    format::OutputFormat,
    naming::DestinationNaming,
};

/// Everything the thumbnail service needs, resolved from [`Config`] once.
#[derive(Debug, Clone)]
pub struct ThumbnailSettings {
    pub fit: FitSpec,
    pub output_format: OutputFormat,
    pub naming: DestinationNaming,
    pub event_filter: EventFilter,
    pub thumbnail_bucket: String,
}

impl ThumbnailSettings {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let thumbnail = &config.thumbnail;
        let bounding_box = BoundingBox::new(thumbnail.max_width, thumbnail.max_height)?;

        Ok(Self {
            fit: FitSpec {
                bounding_box,
                policy: thumbnail.scale_policy,
                allow_upscale: thumbnail.allow_upscale,
            },
            output_format: thumbnail.output_format,
            naming: thumbnail.destination.clone(),
            event_filter: EventFilter {
                accepted_statuses: config.events.accepted_statuses.clone(),
                ignored_key_prefixes: config.events.ignored_key_prefixes.clone(),
            },
            thumbnail_bucket: config.storage.thumbnail_bucket.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub source_bucket: String,
    pub allowed_mime_types: Vec<String>,
    pub max_payload_bytes: usize,
}

impl UploadSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            source_bucket: config.storage.source_bucket.clone(),
            allowed_mime_types: config.upload.allowed_mime_types.clone(),
            max_payload_bytes: config.upload.max_payload_bytes,
        }
    }
}
