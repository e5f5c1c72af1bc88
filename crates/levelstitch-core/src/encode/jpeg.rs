//! JPEG encoding for export.
//!
//! JPEG has no alpha channel, so transparent areas (the corners a rotation
//! uncovers, the canvas margins) are flattened onto a solid background first.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use crate::decode::{Raster, CHANNELS};

use super::{check_raster, EncodeError};

/// Encode a raster to JPEG bytes.
///
/// # Arguments
///
/// * `raster` - RGBA raster to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
/// * `background` - RGB colour that transparent pixels are blended onto
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(
    raster: &Raster,
    quality: u8,
    background: [u8; 3],
) -> Result<Vec<u8>, EncodeError> {
    check_raster(raster)?;

    let rgb = flatten(&raster.pixels, background);

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(&rgb, raster.width, raster.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Blend straight-alpha RGBA pixels over an opaque background, dropping alpha.
fn flatten(rgba: &[u8], background: [u8; 3]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / CHANNELS * 3);
    for px in rgba.chunks_exact(CHANNELS) {
        let alpha = px[3] as u32;
        for c in 0..3 {
            let value = (px[c] as u32 * alpha + background[c] as u32 * (255 - alpha) + 127) / 255;
            rgb.push(value as u8);
        }
    }
    rgb
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any non-empty raster and quality produces a well-formed JPEG.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            width in 1u32..=40,
            height in 1u32..=40,
            quality in 0u8..=255,
            rgba in any::<[u8; 4]>(),
        ) {
            let raster = Raster::filled(width, height, rgba);
            let jpeg = encode_jpeg(&raster, quality, [255, 255, 255]).unwrap();

            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Opaque pixels ignore the background entirely.
        #[test]
        fn prop_opaque_pixels_ignore_background(
            rgb in any::<[u8; 3]>(),
            background in any::<[u8; 3]>(),
        ) {
            let flat = flatten(&[rgb[0], rgb[1], rgb[2], 255], background);
            prop_assert_eq!(flat, rgb.to_vec());
        }
    }
}
