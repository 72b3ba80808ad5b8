use std::sync::Arc;
use tracing::{info, instrument};

use domain::{
    event::ObjectEvent,
    outcome::{SkipReason, TransformResult},
};

use crate::{
    config::ThumbnailSettings,
    ports::{
        incoming::thumbnails::GenerateThumbnailUseCase,
        outgoing::{
            blocking_task::DynBlockingTaskPort, object_store::DynObjectStorePort,
            thumbnail_renderer::DynThumbnailRendererPort,
        },
    },
};

use super::pipeline::{StoreRequest, ThumbnailPipeline};

pub struct ThumbnailServiceDeps {
    pub object_store: DynObjectStorePort,
    pub renderer: DynThumbnailRendererPort,
    pub blocking_task: DynBlockingTaskPort,
}

pub struct ThumbnailService {
    settings: Arc<ThumbnailSettings>,
    pipeline: ThumbnailPipeline,
    object_store: DynObjectStorePort,
}

impl ThumbnailService {
    pub fn new(settings: &Arc<ThumbnailSettings>, deps: ThumbnailServiceDeps) -> Arc<Self> {
        let pipeline = ThumbnailPipeline::new(deps.renderer, deps.blocking_task, settings);

        Arc::new(Self {
            settings: Arc::clone(settings),
            pipeline,
            object_store: deps.object_store,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &ThumbnailSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl GenerateThumbnailUseCase for ThumbnailService {
    #[instrument(
        skip(self, event),
        fields(
            source_bucket = %event.source_bucket,
            source_key = %event.source_key,
            status = ?event.event_status
        )
    )]
    async fn handle_event(&self, event: ObjectEvent) -> TransformResult {
        if !self.settings.event_filter.should_process(&event) {
            info!(reason = %SkipReason::EventFiltered, "Skipping event");
            return TransformResult::Skipped(SkipReason::EventFiltered);
        }

        let thumbnail_bucket = self.settings.thumbnail_bucket.as_str();
        let store = &self.object_store;

        self.pipeline
            .run(
                &event.source_key,
                || store.get_object(&event.source_bucket, &event.source_key),
                |request: StoreRequest| async move {
                    store
                        .put_object(
                            thumbnail_bucket,
                            &request.dest_key,
                            request.bytes,
                            request.mime_type,
                        )
                        .await
                },
            )
            .await
    }
}
