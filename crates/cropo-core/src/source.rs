//! A decoded photo paired with how it is currently displayed.

use std::sync::Arc;

use crate::decode::{decode_photo, DecodeError, DecodedImage};
use crate::geometry::{DisplayedImageGeometry, GeometryError, DISPLAY_MAX_HEIGHT, DISPLAY_MAX_WIDTH};
use thiserror::Error;

/// Failure to prepare a photo for cropping.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// The bitmap the crop is sampled from, with its displayed geometry.
///
/// The natural size in the geometry always equals the bitmap's pixel size.
/// The bitmap is shared, so re-laying out a photo never copies pixels.
#[derive(Debug, Clone)]
pub struct DisplayedImage {
    image: Arc<DecodedImage>,
    geometry: DisplayedImageGeometry,
}

impl DisplayedImage {
    /// Pair a bitmap with an explicit rendered size.
    pub fn with_rendered_size(
        image: DecodedImage,
        rendered_width: f64,
        rendered_height: f64,
    ) -> Result<Self, GeometryError> {
        let geometry = DisplayedImageGeometry::new(
            rendered_width,
            rendered_height,
            image.width as f64,
            image.height as f64,
        )?;
        Ok(Self {
            image: Arc::new(image),
            geometry,
        })
    }

    /// Pair a bitmap with the size it takes inside a display box.
    pub fn fit_within(
        image: DecodedImage,
        max_width: f64,
        max_height: f64,
    ) -> Result<Self, GeometryError> {
        let geometry = DisplayedImageGeometry::fit_within(
            image.width as f64,
            image.height as f64,
            max_width,
            max_height,
        )?;
        Ok(Self {
            image: Arc::new(image),
            geometry,
        })
    }

    /// The same bitmap shown at a different size.
    pub fn relayout(&self, rendered_width: f64, rendered_height: f64) -> Result<Self, GeometryError> {
        let geometry = DisplayedImageGeometry::new(
            rendered_width,
            rendered_height,
            self.geometry.natural_width(),
            self.geometry.natural_height(),
        )?;
        Ok(Self {
            image: Arc::clone(&self.image),
            geometry,
        })
    }

    /// Decode file bytes and lay the photo out in the standard crop box.
    pub fn from_file_bytes(bytes: &[u8]) -> Result<Self, SourceError> {
        let image = decode_photo(bytes)?;
        Ok(Self::fit_within(image, DISPLAY_MAX_WIDTH, DISPLAY_MAX_HEIGHT)?)
    }

    pub fn image(&self) -> &DecodedImage {
        &self.image
    }

    pub fn geometry(&self) -> &DisplayedImageGeometry {
        &self.geometry
    }
}
