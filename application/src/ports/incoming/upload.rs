use crate::{error::AppResult, upload::service::{UploadCommand, UploadReceipt}};

#[async_trait::async_trait]
pub trait UploadImageUseCase: Send + Sync {
    async fn upload(&self, command: UploadCommand) -> AppResult<UploadReceipt>;
}
