//! Photo encoding.
//!
//! Cropped photos leave the core as JPEG bytes at a fixed quality.
//!
//! # Examples
//!
//! ```ignore
//! use cropo_core::encode::encode_jpeg;
//!
//! let jpeg_bytes = encode_jpeg(&cropped).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError, JPEG_CONTENT_TYPE, PHOTO_JPEG_QUALITY};
