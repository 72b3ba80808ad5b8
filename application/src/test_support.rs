use std::{
    collections::HashMap,
    future::{Future, ready},
    pin::Pin,
    str,
    sync::Mutex,
};

use domain::{dimensions::Dimensions, format::ImageFormatKind};

use crate::{
    error::{AppError, AppResult},
    ports::outgoing::{
        blocking_task::{BlockingTaskPort, RenderJob},
        object_store::ObjectStorePort,
        thumbnail_renderer::ThumbnailRendererPort,
    },
};

pub const CORRUPT: &[u8] = b"not an image";

/// Source bytes are `width:height`; the "encoded" thumbnail is
/// `format:width:height`.
pub struct FakeRenderer;

impl ThumbnailRendererPort for FakeRenderer {
    fn read_dimensions(&self, source: &[u8]) -> AppResult<Dimensions> {
        let text = str::from_utf8(source).map_err(|e| AppError::DecodeError {
            message: e.to_string(),
        })?;
        let (w, h) = text.split_once(':').ok_or_else(|| AppError::DecodeError {
            message: "unknown header".to_string(),
        })?;
        let parse = |v: &str| {
            v.parse::<u32>().map_err(|e| AppError::DecodeError {
                message: e.to_string(),
            })
        };
        Ok(Dimensions::new(parse(w)?, parse(h)?)?)
    }

    fn render(
        &self,
        _source: &[u8],
        target: Dimensions,
        format: ImageFormatKind,
    ) -> AppResult<Vec<u8>> {
        Ok(format!("{format}:{}:{}", target.width, target.height).into_bytes())
    }
}

pub struct InlineBlocking;

impl BlockingTaskPort for InlineBlocking {
    fn run_render(
        &self,
        job: RenderJob,
    ) -> Pin<Box<dyn Future<Output = AppResult<Vec<u8>>> + Send + 'static>> {
        Box::pin(ready(job()))
    }
}

type Objects = HashMap<(String, String), (Vec<u8>, String)>;

#[derive(Default)]
pub struct FakeStore {
    objects: Mutex<Objects>,
    reads: Mutex<usize>,
}

impl FakeStore {
    pub fn with(bucket: &str, key: &str, bytes: &[u8]) -> Self {
        let store = Self::default();
        store.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            (bytes.to_vec(), "application/octet-stream".to_string()),
        );
        store
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn reads(&self) -> usize {
        *self.reads.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl ObjectStorePort for FakeStore {
    async fn get_object(&self, bucket: &str, key: &str) -> AppResult<Vec<u8>> {
        *self.reads.lock().unwrap() += 1;
        self.object(bucket, key)
            .map(|(bytes, _)| bytes)
            .ok_or_else(|| AppError::NotFound {
                message: format!("{bucket}/{key}"),
            })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<()> {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            (bytes, content_type.to_string()),
        );
        Ok(())
    }

    async fn ensure_bucket(&self, _bucket: &str) -> AppResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "fake"
    }
}
