//! State for one crop-and-upload screen.

use std::sync::Arc;

use crate::geometry::{CropRegion, GeometryError};
use crate::raster::{rasterize, RasterError, RasterizedCrop};
use crate::selection::constrain_selection;
use crate::source::DisplayedImage;

/// The loaded photo (if any) and the live selection.
///
/// Rasterizing an empty session fails with `NotReady`.
#[derive(Debug, Clone)]
pub struct CropSession {
    image: Option<Arc<DisplayedImage>>,
    crop: CropRegion,
}

impl Default for CropSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CropSession {
    /// An empty session with the initial percent selection.
    pub fn new() -> Self {
        Self {
            image: None,
            crop: CropRegion::initial(),
        }
    }

    /// Show a newly selected photo. The current selection is kept.
    pub fn load(&mut self, image: DisplayedImage) {
        tracing::debug!(
            width = image.image().width,
            height = image.image().height,
            "photo loaded into crop session"
        );
        self.image = Some(Arc::new(image));
    }

    /// Drop the photo so another one can be picked.
    pub fn clear(&mut self) {
        self.image = None;
        self.crop = CropRegion::initial();
    }

    /// Record a new on-screen size for the loaded photo. Does nothing when
    /// no photo is loaded.
    pub fn set_rendered_size(&mut self, width: f64, height: f64) -> Result<(), GeometryError> {
        if let Some(image) = &self.image {
            self.image = Some(Arc::new(image.relayout(width, height)?));
        }
        Ok(())
    }

    /// Replace the selection, fitting it to the passport box when a photo
    /// is loaded.
    pub fn set_crop(&mut self, crop: CropRegion) {
        self.crop = match &self.image {
            Some(image) => constrain_selection(&crop, image.geometry()),
            None => crop,
        };
    }

    pub fn crop(&self) -> &CropRegion {
        &self.crop
    }

    pub fn image(&self) -> Option<&DisplayedImage> {
        self.image.as_deref()
    }

    pub fn is_ready(&self) -> bool {
        self.image.is_some()
    }

    /// Rasterize the current selection.
    pub fn rasterize(&self) -> Result<RasterizedCrop, RasterError> {
        rasterize(self.image(), &self.crop)
    }
}
