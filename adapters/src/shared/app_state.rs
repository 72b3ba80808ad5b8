use std::sync::Arc;

use thumbgen_application::{
    infrastructure_config::Config,
    ports::incoming::{thumbnails::GenerateThumbnailUseCase, upload::UploadImageUseCase},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generate_thumbnail_use_case: Arc<dyn GenerateThumbnailUseCase + Send + Sync>,
    pub upload_use_case: Arc<dyn UploadImageUseCase + Send + Sync>,
    pub storage_backend: &'static str,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        generate_thumbnail_use_case: Arc<dyn GenerateThumbnailUseCase + Send + Sync>,
        upload_use_case: Arc<dyn UploadImageUseCase + Send + Sync>,
        storage_backend: &'static str,
    ) -> Self {
        Self {
            config,
            generate_thumbnail_use_case,
            upload_use_case,
            storage_backend,
        }
    }
}
