use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};

pub const DEFAULT_MAX_WIDTH: u32 = 160;
pub const DEFAULT_MAX_HEIGHT: u32 = 90;
/// Upper bound for any output side, whatever the policy.
pub const MAX_OUTPUT_SIDE: u32 = 4096;
/// Largest canvas a renderer is asked to allocate.
pub const MAX_OUTPUT_PIXELS: u64 = 4096 * 4096;

/// Pixel size of a raster. Both sides are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> DomainResult<Self> {
        if width == 0 || height == 0 {
            return Err(DomainError::InvalidDimensions(format!(
                "{width}x{height} has a zero side"
            )));
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub max_width: u32,
    pub max_height: u32,
}

impl BoundingBox {
    pub fn new(max_width: u32, max_height: u32) -> DomainResult<Self> {
        let bounding_box = Self {
            max_width,
            max_height,
        };
        bounding_box.validate()?;
        Ok(bounding_box)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(DomainError::InvalidBoundingBox(format!(
                "{}x{} must be positive on both sides",
                self.max_width, self.max_height
            )));
        }
        Ok(())
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.max_width, self.max_height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalePolicy {
    /// Largest size that fits inside both bounds.
    #[default]
    FitWithinBox,
    /// Width pinned to `max_width`; height follows the aspect ratio up to
    /// `MAX_OUTPUT_SIDE`.
    FitToWidth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitSpec {
    pub bounding_box: BoundingBox,
    pub policy: ScalePolicy,
    pub allow_upscale: bool,
}

impl Default for FitSpec {
    fn default() -> Self {
        Self {
            bounding_box: BoundingBox::default(),
            policy: ScalePolicy::FitWithinBox,
            allow_upscale: true,
        }
    }
}

impl FitSpec {
    #[must_use]
    pub fn compute(&self, source: Dimensions) -> Dimensions {
        let fitted = match self.policy {
            ScalePolicy::FitWithinBox => {
                compute_fit(source.width, source.height, self.bounding_box)
            }
            ScalePolicy::FitToWidth => {
                fit_to_width(source.width, source.height, self.bounding_box.max_width)
            }
        };

        if !self.allow_upscale && (fitted.width > source.width || fitted.height > source.height) {
            return source;
        }
        fitted
    }
}

/// Scales `src_w` x `src_h` by `min(max_width / src_w, max_height / src_h)`
/// and floors both sides.
///
/// The ratio comparison is done on integers, so the limiting side always lands
/// exactly on its bound. Callers pass positive source sides; a zero side is
/// treated as 1. Each output side is at least 1.
#[must_use]
pub fn compute_fit(src_w: u32, src_h: u32, bounding_box: BoundingBox) -> Dimensions {
    let src_w = u64::from(src_w.max(1));
    let src_h = u64::from(src_h.max(1));
    let max_w = u64::from(bounding_box.max_width);
    let max_h = u64::from(bounding_box.max_height);

    // max_w / src_w <= max_h / src_h
    let (out_w, out_h) = if max_w * src_h <= max_h * src_w {
        (max_w, max_w * src_h / src_w)
    } else {
        (max_h * src_w / src_h, max_h)
    };

    clamped(out_w, out_h)
}

/// Pins the width to `max_width` unless the height would pass
/// `MAX_OUTPUT_SIDE`, in which case the height limits instead.
#[must_use]
pub fn fit_to_width(src_w: u32, src_h: u32, max_width: u32) -> Dimensions {
    compute_fit(
        src_w,
        src_h,
        BoundingBox {
            max_width,
            max_height: MAX_OUTPUT_SIDE,
        },
    )
}

fn clamped(width: u64, height: u64) -> Dimensions {
    let side = |value: u64| u32::try_from(value).unwrap_or(u32::MAX).max(1);
    Dimensions {
        width: side(width),
        height: side(height),
    }
}
