use crate::error::AppResult;
use domain::{dimensions::Dimensions, format::ImageFormatKind};
use std::sync::Arc;

pub trait ThumbnailRendererPort: Send + Sync {
    /// Reads the raster size without decoding pixel data.
    fn read_dimensions(&self, source: &[u8]) -> AppResult<Dimensions>;

    /// Decodes `source`, draws it scaled to `target` over an opaque white
    /// canvas and encodes the canvas as `format`.
    fn render(&self, source: &[u8], target: Dimensions, format: ImageFormatKind)
    -> AppResult<Vec<u8>>;
}

pub type DynThumbnailRendererPort = Arc<dyn ThumbnailRendererPort>;
