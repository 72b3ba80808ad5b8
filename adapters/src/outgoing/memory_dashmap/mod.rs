use dashmap::{DashMap, DashSet};
use tracing::debug;

use thumbgen_application::{
    error::{AppError, AppResult},
    ports::outgoing::object_store::ObjectStorePort,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Process-local object store. Buckets spring into existence on first write.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: DashMap<(String, String), StoredObject>,
    buckets: DashSet<String>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|entry| entry.value().clone())
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn has_bucket(&self, bucket: &str) -> bool {
        self.buckets.contains(bucket)
    }
}

#[async_trait::async_trait]
impl ObjectStorePort for MemoryObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> AppResult<Vec<u8>> {
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|entry| entry.bytes.clone())
            .ok_or_else(|| AppError::NotFound {
                message: format!("Object {bucket}/{key} not found"),
            })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<()> {
        debug!(bucket, key, size = bytes.len(), "Storing object in memory");
        self.buckets.insert(bucket.to_string());
        self.objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn ensure_bucket(&self, bucket: &str) -> AppResult<()> {
        self.buckets.insert(bucket.to_string());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
