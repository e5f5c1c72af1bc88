//! Export bindings.
//!
//! # Example
//!
//! ```typescript
//! const png = encode_png(composite);
//! const jpeg = encode_jpeg(composite, 90, 255, 255, 255);
//! ```

use levelstitch_core::encode;
use wasm_bindgen::prelude::*;

use crate::types::{js_error, JsRaster};

/// Encode a raster to PNG, keeping transparency.
#[wasm_bindgen]
pub fn encode_png(image: &JsRaster) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(image.raster()).map_err(js_error)
}

/// Encode a raster to JPEG.
///
/// # Arguments
///
/// * `image` - Raster to encode
/// * `quality` - JPEG quality (1-100, recommended: 90)
/// * `r`, `g`, `b` - Background colour for transparent areas
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRaster, quality: u8, r: u8, g: u8, b: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(image.raster(), quality, [r, g, b]).map_err(js_error)
}
