//! Lossless PNG encoding, keeping transparency.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use crate::decode::Raster;

use super::{check_raster, EncodeError};

/// Encode a raster to PNG bytes with its alpha channel intact.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, EncodeError> {
    check_raster(raster)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(
            &raster.pixels,
            raster.width,
            raster.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
