use crate::error::AppResult;
use std::sync::Arc;

#[async_trait::async_trait]
pub trait ObjectStorePort: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> AppResult<Vec<u8>>;

    /// Writes `bytes` under `key`, replacing whatever was there.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<()>;

    async fn ensure_bucket(&self, bucket: &str) -> AppResult<()>;

    fn backend_name(&self) -> &'static str;
}

pub type DynObjectStorePort = Arc<dyn ObjectStorePort>;
