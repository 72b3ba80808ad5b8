use serde::Deserialize;

use domain::event::ObjectEvent;
use thumbgen_application::error::AppResult;

use super::ProviderEventAdapter;

/// Blob-trigger binding: `{container}/{name}`. The binding only fires on
/// writes, so no status is carried.
#[derive(Debug, Deserialize)]
pub struct AzureBlobEvent {
    pub container: String,
    pub name: String,
}

pub struct AzureBlobEventAdapter;

impl ProviderEventAdapter for AzureBlobEventAdapter {
    type Payload = AzureBlobEvent;

    const PROVIDER: &'static str = "azure";

    fn translate(payload: AzureBlobEvent) -> AppResult<ObjectEvent> {
        Ok(ObjectEvent::new(payload.container, payload.name, None)?)
    }
}
