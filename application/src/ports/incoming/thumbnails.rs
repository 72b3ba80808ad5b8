use domain::{event::ObjectEvent, outcome::TransformResult};

#[async_trait::async_trait]
pub trait GenerateThumbnailUseCase: Send + Sync {
    /// Filters, transforms and stores. Every outcome, including failures, is
    /// reported through the returned [`TransformResult`].
    async fn handle_event(&self, event: ObjectEvent) -> TransformResult;
}
