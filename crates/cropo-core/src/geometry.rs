//! Displayed-space and native-space geometry for photo crops.
//!
//! A photo is shown scaled down on screen (rendered size) while the bitmap
//! keeps its true resolution (natural size). Crop selections are made in
//! displayed space and mapped to native space per axis before sampling.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner in both spaces
//! - Pixel crops are in rendered pixels
//! - Percent crops are in percent (0 to 100) of the rendered size

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Passport photo aspect ratio (width / height), 35:45.
pub const PASSPORT_ASPECT: f64 = 35.0 / 45.0;

/// Smallest selection width in displayed pixels.
pub const MIN_SELECTION_WIDTH: f64 = 140.0;

/// Smallest selection height in displayed pixels.
pub const MIN_SELECTION_HEIGHT: f64 = 180.0;

/// Box the photo is displayed in while cropping (CSS pixels).
pub const DISPLAY_MAX_WIDTH: f64 = 320.0;
pub const DISPLAY_MAX_HEIGHT: f64 = 384.0;

/// Invalid image geometry.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("Rendered size must be positive and finite, got {width}x{height}")]
    InvalidRenderedSize { width: f64, height: f64 },

    #[error("Natural size must be positive and finite, got {width}x{height}")]
    InvalidNaturalSize { width: f64, height: f64 },
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGeometry {
    rendered_width: f64,
    rendered_height: f64,
    natural_width: f64,
    natural_height: f64,
}

impl TryFrom<RawGeometry> for DisplayedImageGeometry {
    type Error = GeometryError;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        Self::new(
            raw.rendered_width,
            raw.rendered_height,
            raw.natural_width,
            raw.natural_height,
        )
    }
}

/// How an image is currently rendered versus its true pixel size.
///
/// Both size pairs are positive and finite, so the per-axis scale factors
/// are always well defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawGeometry")]
pub struct DisplayedImageGeometry {
    rendered_width: f64,
    rendered_height: f64,
    natural_width: f64,
    natural_height: f64,
}

impl DisplayedImageGeometry {
    pub fn new(
        rendered_width: f64,
        rendered_height: f64,
        natural_width: f64,
        natural_height: f64,
    ) -> Result<Self, GeometryError> {
        if !is_positive(rendered_width) || !is_positive(rendered_height) {
            return Err(GeometryError::InvalidRenderedSize {
                width: rendered_width,
                height: rendered_height,
            });
        }
        if !is_positive(natural_width) || !is_positive(natural_height) {
            return Err(GeometryError::InvalidNaturalSize {
                width: natural_width,
                height: natural_height,
            });
        }
        let geometry = Self {
            rendered_width,
            rendered_height,
            natural_width,
            natural_height,
        };
        // Tiny rendered sizes can still overflow the ratio.
        if !geometry.scale_x().is_finite() || !geometry.scale_y().is_finite() {
            return Err(GeometryError::InvalidRenderedSize {
                width: rendered_width,
                height: rendered_height,
            });
        }
        Ok(geometry)
    }

    /// Geometry for an image shown at its natural size.
    pub fn unscaled(width: f64, height: f64) -> Result<Self, GeometryError> {
        Self::new(width, height, width, height)
    }

    /// Geometry for an image shown inside a `max_width x max_height` box,
    /// keeping its aspect ratio and never enlarging it.
    pub fn fit_within(
        natural_width: f64,
        natural_height: f64,
        max_width: f64,
        max_height: f64,
    ) -> Result<Self, GeometryError> {
        if !is_positive(natural_width) || !is_positive(natural_height) {
            return Err(GeometryError::InvalidNaturalSize {
                width: natural_width,
                height: natural_height,
            });
        }
        if !is_positive(max_width) || !is_positive(max_height) {
            return Err(GeometryError::InvalidRenderedSize {
                width: max_width,
                height: max_height,
            });
        }
        let scale = (max_width / natural_width)
            .min(max_height / natural_height)
            .min(1.0);
        Self::new(
            natural_width * scale,
            natural_height * scale,
            natural_width,
            natural_height,
        )
    }

    pub fn rendered_width(&self) -> f64 {
        self.rendered_width
    }

    pub fn rendered_height(&self) -> f64 {
        self.rendered_height
    }

    pub fn natural_width(&self) -> f64 {
        self.natural_width
    }

    pub fn natural_height(&self) -> f64 {
        self.natural_height
    }

    /// Horizontal displayed-to-native factor.
    #[inline]
    pub fn scale_x(&self) -> f64 {
        self.natural_width / self.rendered_width
    }

    /// Vertical displayed-to-native factor.
    #[inline]
    pub fn scale_y(&self) -> f64 {
        self.natural_height / self.rendered_height
    }

    /// Map a crop into native pixel coordinates.
    ///
    /// Each axis is scaled by its own factor; scaling is never assumed to
    /// be uniform. Percent crops are resolved against the rendered size
    /// first.
    pub fn to_native(&self, crop: &CropRegion) -> NativeRect {
        let crop = crop.to_pixels(self);
        let (sx, sy) = (self.scale_x(), self.scale_y());
        NativeRect {
            x: crop.x * sx,
            y: crop.y * sy,
            width: crop.width * sx,
            height: crop.height * sy,
        }
    }
}

/// Unit of a [`CropRegion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropUnit {
    /// Rendered (displayed) pixels.
    #[default]
    #[serde(rename = "px")]
    Pixels,
    /// Percent of the rendered size.
    #[serde(rename = "%")]
    Percent,
}

/// A user-selected rectangle in displayed-image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    #[serde(default)]
    pub unit: CropUnit,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    /// A crop in rendered pixels.
    pub fn pixels(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            unit: CropUnit::Pixels,
            x,
            y,
            width,
            height,
        }
    }

    /// A crop in percent of the rendered size.
    pub fn percent(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            unit: CropUnit::Percent,
            x,
            y,
            width,
            height,
        }
    }

    /// Selection shown when a photo is first loaded.
    pub fn initial() -> Self {
        Self::percent(10.0, 10.0, 40.0, 51.43)
    }

    /// Resolve this crop to rendered pixels.
    pub fn to_pixels(&self, geometry: &DisplayedImageGeometry) -> CropRegion {
        match self.unit {
            CropUnit::Pixels => *self,
            CropUnit::Percent => {
                let (w, h) = (geometry.rendered_width(), geometry.rendered_height());
                Self::pixels(
                    self.x * w / 100.0,
                    self.y * h / 100.0,
                    self.width * w / 100.0,
                    self.height * h / 100.0,
                )
            }
        }
    }

    /// True when the crop has no usable area.
    pub fn is_degenerate(&self) -> bool {
        !(self.x.is_finite()
            && self.y.is_finite()
            && is_positive(self.width)
            && is_positive(self.height))
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

impl Default for CropRegion {
    fn default() -> Self {
        Self::initial()
    }
}

/// A rectangle in native (source bitmap) pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NativeRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Round a surface size to whole pixels, half up.
#[inline]
pub fn round_to_pixels(v: f64) -> u32 {
    (v + 0.5).floor() as u32
}
