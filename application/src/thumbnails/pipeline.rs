use std::{future::Future, sync::Arc};
use tracing::{debug, error, info, instrument, warn};

use domain::{
    dimensions::FitSpec,
    format::{ImageFormatKind, OutputFormat, classify},
    naming::DestinationNaming,
    outcome::{FailureKind, SkipReason, TransformResult},
};

use crate::{
    config::ThumbnailSettings,
    error::{AppError, AppResult},
    ports::outgoing::{
        blocking_task::DynBlockingTaskPort,
        thumbnail_renderer::{DynThumbnailRendererPort, ThumbnailRendererPort},
    },
};

/// Rendered thumbnail handed to the store capability.
#[derive(Debug)]
pub struct StoreRequest {
    pub dest_key: String,
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

/// Classify, fetch, render, store. Knows nothing about buckets; the caller
/// binds those into the `fetch` and `store` closures.
pub struct ThumbnailPipeline {
    renderer: DynThumbnailRendererPort,
    blocking: DynBlockingTaskPort,
    fit: FitSpec,
    output_format: OutputFormat,
    naming: DestinationNaming,
}

impl ThumbnailPipeline {
    pub fn new(
        renderer: DynThumbnailRendererPort,
        blocking: DynBlockingTaskPort,
        settings: &ThumbnailSettings,
    ) -> Self {
        Self {
            renderer,
            blocking,
            fit: settings.fit,
            output_format: settings.output_format,
            naming: settings.naming.clone(),
        }
    }

    #[instrument(skip(self, fetch, store))]
    pub async fn run<F, FFut, S, SFut>(&self, source_key: &str, fetch: F, store: S) -> TransformResult
    where
        F: FnOnce() -> FFut + Send,
        FFut: Future<Output = AppResult<Vec<u8>>> + Send,
        S: FnOnce(StoreRequest) -> SFut + Send,
        SFut: Future<Output = AppResult<()>> + Send,
    {
        let format_info = classify(source_key);
        if !format_info.inferable {
            info!(reason = %SkipReason::TypeNotInferable, "Skipping object");
            return TransformResult::Skipped(SkipReason::TypeNotInferable);
        }
        let Some(source_format) = format_info.image_format() else {
            info!(
                reason = %SkipReason::UnsupportedType,
                extension = %format_info.extension,
                "Skipping object"
            );
            return TransformResult::Skipped(SkipReason::UnsupportedType);
        };

        let source = match fetch().await {
            Ok(bytes) => bytes,
            Err(e) => return failed("fetch", &e),
        };
        debug!(source_bytes = source.len(), "Fetched source object");

        let output_format = self.output_format.resolve(source_format);
        let rendered = match self.render(source, output_format).await {
            Ok(bytes) => bytes,
            Err(e) => return failed("render", &e),
        };

        let mime_type = output_format.mime_type();
        let dest_key = self.naming.destination_key(source_key, output_format);
        let request = StoreRequest {
            dest_key: dest_key.clone(),
            bytes: rendered.clone(),
            mime_type,
        };
        if let Err(e) = store(request).await {
            return failed("store", &e);
        }

        info!(
            dest_key = %dest_key,
            mime_type,
            thumbnail_bytes = rendered.len(),
            "Thumbnail stored"
        );
        TransformResult::Success {
            bytes: rendered,
            mime_type: mime_type.to_string(),
        }
    }

    async fn render(&self, source: Vec<u8>, output_format: ImageFormatKind) -> AppResult<Vec<u8>> {
        let renderer = Arc::clone(&self.renderer);
        let fit = self.fit;

        self.blocking
            .run_render(Box::new(move || {
                render_thumbnail(renderer.as_ref(), &fit, &source, output_format)
            }))
            .await
    }
}

/// Synchronous core of a transformation: size the thumbnail from the source
/// header, then render it.
pub fn render_thumbnail(
    renderer: &dyn ThumbnailRendererPort,
    fit: &FitSpec,
    source: &[u8],
    output_format: ImageFormatKind,
) -> AppResult<Vec<u8>> {
    let source_dimensions = renderer.read_dimensions(source)?;
    let target = fit.compute(source_dimensions);
    debug!(
        source = %source_dimensions,
        target = %target,
        format = %output_format,
        "Computed thumbnail size"
    );
    renderer.render(source, target, output_format)
}

fn failed(stage: &'static str, e: &AppError) -> TransformResult {
    let kind = e.failure_kind();
    if kind == FailureKind::InternalError {
        error!(stage, error = %e, "Transformation failed");
    } else {
        warn!(stage, kind = %kind, error = %e, "Transformation failed");
    }
    TransformResult::failed(kind, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        infrastructure_config::Config,
        test_support::{CORRUPT, FakeRenderer, InlineBlocking},
    };
    use std::{
        future::{Ready, ready},
        sync::{
            Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };

    fn pipeline_with(config: &Config) -> ThumbnailPipeline {
        let settings = ThumbnailSettings::from_config(config).unwrap();
        ThumbnailPipeline::new(Arc::new(FakeRenderer), Arc::new(InlineBlocking), &settings)
    }

    fn pipeline() -> ThumbnailPipeline {
        pipeline_with(&Config::default())
    }

    #[derive(Default)]
    struct Calls {
        fetches: AtomicUsize,
        stores: Mutex<Vec<(String, Vec<u8>, &'static str)>>,
    }

    impl Calls {
        fn fetch(&self, bytes: &[u8]) -> Ready<AppResult<Vec<u8>>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            ready(Ok(bytes.to_vec()))
        }

        fn store(&self, request: StoreRequest) -> Ready<AppResult<()>> {
            self.stores.lock().unwrap().push((
                request.dest_key,
                request.bytes,
                request.mime_type,
            ));
            ready(Ok(()))
        }

        fn store_count(&self) -> usize {
            self.stores.lock().unwrap().len()
        }
    }

    #[tokio::test]
    async fn full_hd_jpeg_becomes_a_160x90_thumbnail() {
        let calls = Calls::default();
        let result = pipeline()
            .run(
                "photos/beach.jpg",
                || calls.fetch(b"1920:1080"),
                |request| calls.store(request),
            )
            .await;

        assert_eq!(
            result,
            TransformResult::Success {
                bytes: b"jpg:160:90".to_vec(),
                mime_type: "image/jpeg".to_string(),
            }
        );
        let stores = calls.stores.lock().unwrap();
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].0, "resized-photos/beach.jpg");
        assert_eq!(stores[0].2, "image/jpeg");
    }

    #[tokio::test]
    async fn non_images_are_skipped_without_io() {
        let calls = Calls::default();
        let result = pipeline()
            .run("notes.txt", || calls.fetch(b"1:1"), |request| calls.store(request))
            .await;

        assert_eq!(result, TransformResult::Skipped(SkipReason::UnsupportedType));
        assert_eq!(calls.fetches.load(Ordering::SeqCst), 0);
        assert_eq!(calls.store_count(), 0);
    }

    #[tokio::test]
    async fn keys_without_extension_are_not_inferable() {
        let calls = Calls::default();
        let result = pipeline()
            .run("README", || calls.fetch(b"1:1"), |request| calls.store(request))
            .await;

        assert_eq!(result, TransformResult::Skipped(SkipReason::TypeNotInferable));
        assert_eq!(calls.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetch_failure_never_reaches_store() {
        let calls = Calls::default();
        let result = pipeline()
            .run(
                "cat.png",
                || async {
                    Err::<Vec<u8>, _>(AppError::StorageError {
                        message: "connection reset".to_string(),
                    })
                },
                |request| calls.store(request),
            )
            .await;

        match result {
            TransformResult::Failed { kind, message } => {
                assert_eq!(kind, FailureKind::StorageError);
                assert!(message.contains("connection reset"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(calls.store_count(), 0);
    }

    #[tokio::test]
    async fn undecodable_source_is_a_decode_failure() {
        let calls = Calls::default();
        let result = pipeline()
            .run("cat.png", || calls.fetch(CORRUPT), |request| calls.store(request))
            .await;

        assert!(matches!(
            result,
            TransformResult::Failed {
                kind: FailureKind::DecodeError,
                ..
            }
        ));
        assert_eq!(calls.store_count(), 0);
    }

    #[tokio::test]
    async fn store_failure_is_reported() {
        let calls = Calls::default();
        let result = pipeline()
            .run(
                "cat.png",
                || calls.fetch(b"640:480"),
                |_request| async {
                    Err::<(), _>(AppError::StorageError {
                        message: "bucket is read-only".to_string(),
                    })
                },
            )
            .await;

        assert!(matches!(
            result,
            TransformResult::Failed {
                kind: FailureKind::StorageError,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn output_override_changes_encoding_and_extension() {
        let mut config = Config::default();
        config.thumbnail.output_format = OutputFormat::Png;
        config.thumbnail.destination = DestinationNaming::Mirror;

        let calls = Calls::default();
        let result = pipeline_with(&config)
            .run("cat.jpg", || calls.fetch(b"320:180"), |request| calls.store(request))
            .await;

        assert_eq!(
            result,
            TransformResult::Success {
                bytes: b"png:160:90".to_vec(),
                mime_type: "image/png".to_string(),
            }
        );
        assert_eq!(calls.stores.lock().unwrap()[0].0, "cat.png");
    }

    #[test]
    fn render_thumbnail_sizes_from_the_header() {
        let fit = FitSpec::default();
        let bytes = render_thumbnail(&FakeRenderer, &fit, b"90:160", ImageFormatKind::Png).unwrap();
        assert_eq!(bytes, b"png:50:90");
    }
}
