use domain::{
    dimensions::{Dimensions, MAX_OUTPUT_PIXELS},
    format::ImageFormatKind,
};
use image::{
    DynamicImage, ImageReader, Rgba, RgbImage, RgbaImage,
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
    imageops::{self, FilterType},
};
use std::io::Cursor;
use thumbgen_application::{
    error::{AppError, AppResult},
    ports::outgoing::thumbnail_renderer::ThumbnailRendererPort,
};
use tracing::{debug, instrument};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Copy, Clone)]
pub struct ImageRendererConfig {
    pub jpeg_quality: u8,
}

#[derive(Clone)]
pub struct ImageThumbnailRenderer {
    jpeg_quality: u8,
}

impl ImageThumbnailRenderer {
    pub fn new(config: ImageRendererConfig) -> Self {
        Self {
            jpeg_quality: config.jpeg_quality,
        }
    }

    fn reader(source: &[u8]) -> AppResult<ImageReader<Cursor<&[u8]>>> {
        ImageReader::new(Cursor::new(source))
            .with_guessed_format()
            .map_err(|e| AppError::DecodeError {
                message: format!("Failed to sniff image format: {e}"),
            })
    }

    #[instrument(skip(self, source), fields(source_bytes = source.len()))]
    fn render_impl(
        &self,
        source: &[u8],
        target: Dimensions,
        format: ImageFormatKind,
    ) -> AppResult<Vec<u8>> {
        if target.pixel_count() > MAX_OUTPUT_PIXELS {
            return Err(AppError::EncodeError {
                message: format!("Target {target} exceeds {MAX_OUTPUT_PIXELS} pixels"),
            });
        }

        let decoded = Self::reader(source)?
            .decode()
            .map_err(|e| AppError::DecodeError {
                message: format!("Failed to decode image: {e}"),
            })?;

        let scaled = decoded
            .resize_exact(target.width, target.height, FilterType::Triangle)
            .to_rgba8();

        let mut canvas = RgbaImage::from_pixel(target.width, target.height, WHITE);
        imageops::overlay(&mut canvas, &scaled, 0, 0);
        let flattened = DynamicImage::ImageRgba8(canvas).to_rgb8();

        let encoded = self.encode(&flattened, format)?;
        debug!(
            width = target.width,
            height = target.height,
            format = %format,
            thumbnail_bytes = encoded.len(),
            "Rendered thumbnail"
        );
        Ok(encoded)
    }

    fn encode(&self, canvas: &RgbImage, format: ImageFormatKind) -> AppResult<Vec<u8>> {
        let mut bytes = Vec::new();
        let written = match format {
            ImageFormatKind::Jpeg => canvas.write_with_encoder(JpegEncoder::new_with_quality(
                &mut bytes,
                self.jpeg_quality,
            )),
            ImageFormatKind::Png => canvas.write_with_encoder(PngEncoder::new(&mut bytes)),
        };
        written.map_err(|e| AppError::EncodeError {
            message: format!("Failed to encode {format}: {e}"),
        })?;

        if bytes.is_empty() {
            return Err(AppError::EncodeError {
                message: format!("{format} encoding produced empty output"),
            });
        }
        Ok(bytes)
    }
}

impl ThumbnailRendererPort for ImageThumbnailRenderer {
    fn read_dimensions(&self, source: &[u8]) -> AppResult<Dimensions> {
        let (width, height) =
            Self::reader(source)?
                .into_dimensions()
                .map_err(|e| AppError::DecodeError {
                    message: format!("Failed to read image header: {e}"),
                })?;

        Dimensions::new(width, height).map_err(|e| AppError::DecodeError {
            message: e.to_string(),
        })
    }

    fn render(
        &self,
        source: &[u8],
        target: Dimensions,
        format: ImageFormatKind,
    ) -> AppResult<Vec<u8>> {
        self.render_impl(source, target, format)
    }
}
