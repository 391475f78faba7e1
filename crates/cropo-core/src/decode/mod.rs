//! Photo decoding for the crop workflow.
//!
//! This module turns the bytes of a user-selected file into an RGB bitmap:
//! - Any format the `image` crate recognizes (JPEG, PNG, WebP, GIF, BMP)
//! - EXIF orientation is applied so the bitmap matches what a browser shows
//!
//! # Examples
//!
//! ```ignore
//! use cropo_core::decode::decode_photo;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_photo(&bytes).unwrap();
//! println!("Decoded {}x{} photo", image.width, image.height);
//! ```

mod photo;
mod types;

pub use photo::{decode_photo, get_orientation};
pub use image::metadata::Orientation;
pub use types::{DecodeError, DecodedImage};
