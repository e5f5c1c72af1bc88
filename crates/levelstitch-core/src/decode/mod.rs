//! Image decoding for Levelstitch.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG files into RGBA rasters
//! - Applying EXIF orientation so rasters match what the user drew on
//! - Async raster sources that the composite pipeline joins on
//!
//! # Examples
//!
//! ```ignore
//! use levelstitch_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let raster = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", raster.width, raster.height);
//! ```

mod bitmap;
mod source;
mod types;

pub use bitmap::{decode_image, read_orientation};
pub use source::{DecodedSource, EncodedSource, RasterSource};
pub use types::{DecodeError, Orientation, Raster, CHANNELS};
