use axum::{
    Router,
    routing::{get, post},
};

use crate::incoming::events::{
    azure::AzureBlobEventAdapter, openwhisk::OpenWhiskEventAdapter, s3::S3EventAdapter,
};
use crate::incoming::http_axum::{
    handlers::{events::handle_provider_event, health::health_check, upload::upload_image},
    router_ext::RouterExt,
};
use crate::shared::app_state::AppState;

pub fn build_application_router(state: &AppState) -> Router<AppState> {
    let event_routes = Router::new()
        .route("/events/s3", post(handle_provider_event::<S3EventAdapter>))
        .route(
            "/events/openwhisk",
            post(handle_provider_event::<OpenWhiskEventAdapter>),
        )
        .route(
            "/events/azure",
            post(handle_provider_event::<AzureBlobEventAdapter>),
        );

    let upload_routes = Router::new()
        .route("/upload", post(upload_image))
        .with_body_limit(state.config.upload.max_payload_bytes);

    Router::new()
        .route("/health", get(health_check))
        .merge(event_routes)
        .merge(upload_routes)
        .with_request_id()
}
