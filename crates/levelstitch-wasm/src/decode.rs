//! Image decoding bindings.
//!
//! # Example
//!
//! ```typescript
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const raster = decode_image(bytes);
//! console.log(`Decoded ${raster.width}x${raster.height}`);
//! ```

use levelstitch_core::decode;
use wasm_bindgen::prelude::*;

use crate::types::{js_error, JsRaster};

/// Decode a JPEG or PNG file into an RGBA raster.
///
/// EXIF orientation is applied, so the raster matches what a browser displays.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the file is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(js_error)
}
