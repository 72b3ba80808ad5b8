use std::sync::Arc;
use tracing::info;

use thumbgen_adapters::shared::app_state::AppState as AdaptersAppState;
use thumbgen_adapters::outgoing::{
    image_rs::thumbnail_renderer_image::{ImageRendererConfig, ImageThumbnailRenderer},
    local_tokio_fs::LocalFsObjectStore,
    memory_dashmap::MemoryObjectStore,
    s3_aws::S3ObjectStore,
    tokio_spawn::TokioBlockingTaskAdapter,
};
use thumbgen_application::error::AppError;
use thumbgen_application::infrastructure_config::{Config, StorageBackend};
use thumbgen_application::ports::outgoing::{
    blocking_task::DynBlockingTaskPort, object_store::DynObjectStorePort,
    thumbnail_renderer::DynThumbnailRendererPort,
};
use thumbgen_application::{
    config::{ThumbnailSettings, UploadSettings},
    ports::incoming::{thumbnails::GenerateThumbnailUseCase, upload::UploadImageUseCase},
    thumbnails::service::{ThumbnailService, ThumbnailServiceDeps},
    upload::service::UploadService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub object_store: DynObjectStorePort,
    pub thumbnail_service: Arc<ThumbnailService>,
    pub upload_service: Arc<dyn UploadImageUseCase + Send + Sync>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let config = Arc::new(config);

        let object_store = Self::create_object_store(&config).await?;
        if config.storage.create_missing_buckets {
            Self::ensure_buckets(&config, &object_store).await?;
        }

        let thumbnail_service = Self::create_thumbnail_service(&config, &object_store)?;
        let upload_service = Self::create_upload_service(&config, &object_store);

        Ok(Self {
            config,
            object_store,
            thumbnail_service,
            upload_service,
        })
    }

    async fn create_object_store(config: &Config) -> Result<DynObjectStorePort, AppError> {
        let store: DynObjectStorePort = match config.storage.backend {
            StorageBackend::S3 => Arc::new(S3ObjectStore::connect(&config.storage.s3).await?),
            StorageBackend::Local => Arc::new(LocalFsObjectStore::new(&config.storage.local.root)),
            StorageBackend::Memory => Arc::new(MemoryObjectStore::new()),
        };
        info!(backend = store.backend_name(), "Object store ready");
        Ok(store)
    }

    async fn ensure_buckets(
        config: &Config,
        object_store: &DynObjectStorePort,
    ) -> Result<(), AppError> {
        for bucket in [
            &config.storage.source_bucket,
            &config.storage.thumbnail_bucket,
        ] {
            object_store.ensure_bucket(bucket).await?;
            info!(bucket = %bucket, "Bucket available");
        }
        Ok(())
    }

    fn create_thumbnail_service(
        config: &Config,
        object_store: &DynObjectStorePort,
    ) -> Result<Arc<ThumbnailService>, AppError> {
        let settings = Arc::new(ThumbnailSettings::from_config(config)?);

        let renderer: DynThumbnailRendererPort =
            Arc::new(ImageThumbnailRenderer::new(ImageRendererConfig {
                jpeg_quality: config.thumbnail.jpeg_quality,
            }));
        let blocking_task: DynBlockingTaskPort = Arc::new(TokioBlockingTaskAdapter::new());

        Ok(ThumbnailService::new(
            &settings,
            ThumbnailServiceDeps {
                object_store: Arc::clone(object_store),
                renderer,
                blocking_task,
            },
        ))
    }

    fn create_upload_service(
        config: &Config,
        object_store: &DynObjectStorePort,
    ) -> Arc<dyn UploadImageUseCase + Send + Sync> {
        UploadService::new(
            UploadSettings::from_config(config),
            Arc::clone(object_store),
        )
    }

    pub fn to_adapters_state(&self) -> AdaptersAppState {
        let generate_thumbnail_use_case: Arc<dyn GenerateThumbnailUseCase + Send + Sync> =
            Arc::<ThumbnailService>::clone(&self.thumbnail_service);

        AdaptersAppState::new(
            Arc::clone(&self.config),
            generate_thumbnail_use_case,
            Arc::clone(&self.upload_service),
            self.object_store.backend_name(),
        )
    }
}
