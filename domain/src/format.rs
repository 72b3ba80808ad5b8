use serde::{Deserialize, Serialize};
use std::fmt;

pub const JPEG_MIME: &str = "image/jpeg";
pub const PNG_MIME: &str = "image/png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormatKind {
    Jpeg,
    Png,
}

impl ImageFormatKind {
    /// Maps a lowercase file extension onto a supported format.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => JPEG_MIME,
            Self::Png => PNG_MIME,
        }
    }
}

impl fmt::Display for ImageFormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Thumbnail encoding: follow the source, or force one format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Source,
    Png,
    Jpeg,
}

impl OutputFormat {
    #[must_use]
    pub fn resolve(self, source: ImageFormatKind) -> ImageFormatKind {
        match self {
            Self::Source => source,
            Self::Png => ImageFormatKind::Png,
            Self::Jpeg => ImageFormatKind::Jpeg,
        }
    }
}

/// What can be inferred about an object from its key alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatInfo {
    pub inferable: bool,
    pub extension: String,
    pub mime_type: String,
}

impl FormatInfo {
    #[must_use]
    pub fn not_inferable() -> Self {
        Self {
            inferable: false,
            extension: String::new(),
            mime_type: String::new(),
        }
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.image_format().is_some()
    }

    #[must_use]
    pub fn image_format(&self) -> Option<ImageFormatKind> {
        if !self.inferable {
            return None;
        }
        ImageFormatKind::from_extension(&self.extension)
    }
}

/// Infers the object format from the segment after the last dot in `key`.
///
/// Keys without a dot are not inferable. Any extension other than `jpg` or
/// `png` is inferable but not an image.
#[must_use]
pub fn classify(key: &str) -> FormatInfo {
    let Some((_, extension)) = key.rsplit_once('.') else {
        return FormatInfo::not_inferable();
    };

    let extension = extension.to_ascii_lowercase();
    let mime_type = ImageFormatKind::from_extension(&extension)
        .map(ImageFormatKind::mime_type)
        .unwrap_or_default()
        .to_string();

    FormatInfo {
        inferable: true,
        extension,
        mime_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_without_a_dot_are_not_inferable() {
        for key in ["", "photo", "folder/photo", "IMG_0001", "a/b/c"] {
            let info = classify(key);
            assert!(!info.inferable, "{key} should not be inferable");
            assert!(!info.is_image());
            assert!(info.extension.is_empty());
            assert!(info.mime_type.is_empty());
        }
    }

    #[test]
    fn recognizes_jpg_and_png_in_any_case() {
        let cases = [
            ("cat.jpg", JPEG_MIME),
            ("cat.JPG", JPEG_MIME),
            ("nested/dir/cat.Jpg", JPEG_MIME),
            ("cat.png", PNG_MIME),
            ("CAT.PNG", PNG_MIME),
            ("archive.tar.png", PNG_MIME),
        ];

        for (key, mime) in cases {
            let info = classify(key);
            assert!(info.inferable, "{key}");
            assert!(info.is_image(), "{key}");
            assert_eq!(info.mime_type, mime, "{key}");
        }
    }

    #[test]
    fn other_extensions_are_inferable_but_not_images() {
        for key in ["notes.txt", "photo.jpeg", "clip.gif", "image.webp", "trailing."] {
            let info = classify(key);
            assert!(info.inferable, "{key}");
            assert!(!info.is_image(), "{key}");
            assert!(info.mime_type.is_empty(), "{key}");
        }
    }

    #[test]
    fn extension_is_lowercased() {
        let info = classify("holiday.PnG");
        assert_eq!(info.extension, "png");
        assert_eq!(info.image_format(), Some(ImageFormatKind::Png));
    }

    #[test]
    fn output_format_override_wins_over_source() {
        assert_eq!(OutputFormat::Source.resolve(ImageFormatKind::Jpeg), ImageFormatKind::Jpeg);
        assert_eq!(OutputFormat::Png.resolve(ImageFormatKind::Jpeg), ImageFormatKind::Png);
        assert_eq!(OutputFormat::Jpeg.resolve(ImageFormatKind::Png), ImageFormatKind::Jpeg);
    }
}
