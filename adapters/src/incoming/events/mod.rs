use serde::de::DeserializeOwned;

use domain::event::ObjectEvent;
use thumbgen_application::error::AppResult;

pub mod azure;
pub mod openwhisk;
pub mod s3;

/// Translates one provider's invocation payload into an [`ObjectEvent`].
pub trait ProviderEventAdapter: Send + Sync + 'static {
    type Payload: DeserializeOwned + Send;

    const PROVIDER: &'static str;

    fn translate(payload: Self::Payload) -> AppResult<ObjectEvent>;

    fn translate_json(body: &[u8]) -> AppResult<ObjectEvent> {
        let payload: Self::Payload = serde_json::from_slice(body)?;
        Self::translate(payload)
    }
}
