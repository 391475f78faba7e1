//! Cropo Core - passport photo cropping library
//!
//! This crate turns a user-selected region of a displayed photo into a
//! 35:45 passport photo JPEG and hands it to an injected artifact store.
//!
//! # Modules
//!
//! - `decode` - Decode uploaded files into RGB bitmaps (EXIF-aware)
//! - `geometry` - Displayed vs. native geometry, crop regions, constants
//! - `selection` - Keep an interactive selection passport-shaped and in bounds
//! - `raster` - The crop rasterizer
//! - `encode` - Fixed-quality JPEG encoding
//! - `session` - Loaded photo + live selection for one screen
//! - `store` - Artifact stores (feature `async`)
//! - `upload` - Crop-and-upload orchestration (feature `async`)

pub mod decode;
pub mod encode;
pub mod geometry;
pub mod raster;
pub mod selection;
pub mod session;
pub mod source;
#[cfg(feature = "async")]
pub mod store;
#[cfg(feature = "async")]
pub mod upload;

pub use geometry::{
    CropRegion, CropUnit, DisplayedImageGeometry, GeometryError, NativeRect, MIN_SELECTION_HEIGHT,
    MIN_SELECTION_WIDTH, PASSPORT_ASPECT,
};
pub use raster::{plan_crop, rasterize, RasterError, RasterPlan, RasterizedCrop};
pub use selection::{constrain_selection, initial_selection};
pub use session::CropSession;
pub use source::{DisplayedImage, SourceError};

#[cfg(feature = "async")]
pub use raster::rasterize_async;
#[cfg(feature = "async")]
pub use store::{ArtifactStore, FsStore, MemoryStore, StoreError, StoredArtifact};
#[cfg(feature = "async")]
pub use upload::{PassportPhotoUploader, UploadError, UploadReceipt};
