//! Crop rasterizer: displayed-space selection in, encoded JPEG out.
//!
//! # Pipeline
//!
//! 1. Resolve the crop to displayed pixels and reject zero-area selections
//! 2. Scale it into native pixels, independently per axis
//! 3. Allocate a surface of the displayed crop size (rounded half up)
//! 4. Bilinear-blit the native rectangle onto the surface
//! 5. Encode the surface as JPEG at a fixed quality
//!
//! Each call is stateless and owns its surface until the blob is produced.

mod rasterize;
mod surface;
#[cfg(feature = "async")]
mod task;
mod types;

pub use rasterize::{plan_crop, rasterize, RasterPlan};
pub use surface::{MAX_SURFACE_AREA, MAX_SURFACE_DIMENSION};
#[cfg(feature = "async")]
pub use task::rasterize_async;
pub use types::{RasterError, RasterizedCrop};
