use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use tokio::fs;
use tracing::debug;

use domain::naming::validate_object_key;
use thumbgen_application::{
    error::{AppError, AppResult},
    ports::outgoing::object_store::ObjectStorePort,
};

/// Stores objects as plain files under `{root}/{bucket}/{key}`.
pub struct LocalFsObjectStore {
    root: PathBuf,
}

impl LocalFsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn bucket_dir(&self, bucket: &str) -> AppResult<PathBuf> {
        if bucket.contains(['/', '\\']) {
            return Err(AppError::StorageError {
                message: format!("Invalid bucket name '{bucket}'"),
            });
        }
        validate_object_key(bucket).map_err(|e| AppError::StorageError {
            message: format!("Invalid bucket name: {e}"),
        })?;
        Ok(self.root.join(bucket))
    }

    fn object_path(&self, bucket: &str, key: &str) -> AppResult<PathBuf> {
        validate_object_key(key).map_err(|e| AppError::StorageError {
            message: e.to_string(),
        })?;
        Ok(self.bucket_dir(bucket)?.join(key))
    }
}

fn storage_error(action: &str, path: &Path, error: &io::Error) -> AppError {
    AppError::StorageError {
        message: format!("Failed to {action} {}: {error}", path.display()),
    }
}

#[async_trait::async_trait]
impl ObjectStorePort for LocalFsObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> AppResult<Vec<u8>> {
        let path = self.object_path(bucket, key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::NotFound {
                message: format!("Object {bucket}/{key} not found"),
            }),
            Err(e) => Err(storage_error("read", &path, &e)),
        }
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> AppResult<()> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error("create directory", parent, &e))?;
        }

        debug!(path = %path.display(), size = bytes.len(), "Writing object to disk");
        fs::write(&path, bytes)
            .await
            .map_err(|e| storage_error("write", &path, &e))
    }

    async fn ensure_bucket(&self, bucket: &str) -> AppResult<()> {
        let dir = self.bucket_dir(bucket)?;
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| storage_error("create directory", &dir, &e))
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
