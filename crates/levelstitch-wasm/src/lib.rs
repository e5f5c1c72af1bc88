//! Levelstitch WASM - WebAssembly bindings for Levelstitch
//!
//! This crate exposes the levelstitch-core geometry engine to JavaScript.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible raster wrapper
//! - `geometry` - Angle resolution, line rotation and guide dots
//! - `rectify` - Leveling a single image
//! - `composite` - Stacking leveled images into bands, and request generations
//! - `decode` / `encode` - Image import and export
//! - `store` - Saved lines in `localStorage`
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, rectify_image, JsComposition } from '@levelstitch/wasm';
//!
//! await init();
//!
//! const raster = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const leveled = rectify_image(raster, line, 1);
//! const composition = new JsComposition();
//! composition.add(leveled);
//! const out = composition.render();
//! ```

use log::LevelFilter;
use wasm_bindgen::prelude::*;

mod composite;
mod decode;
mod encode;
mod geometry;
mod logger;
mod rectify;
mod store;
mod types;

pub use composite::{JsComposition, JsGeneration, JsScheduler};
pub use decode::decode_image;
pub use encode::{encode_jpeg, encode_png};
pub use geometry::{guide_points, normalize_line, real_distance, resolve_angle, rotate_line};
pub use rectify::{rectify_image, JsRectifiedImage};
pub use store::{load_line, load_lines, remove_line, save_line, LocalStorage};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(LevelFilter::Info);
}

/// Change the console log level ("off", "error", "warn", "info", "debug", "trace").
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let level = logger::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    logger::install(level);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
