//! Single-image rectification bindings.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const leveled = rectify_image(raster, [{ x: 0.4, y: 0.9 }, { x: 0.5, y: 0.1 }], 1);
//! console.log(`rotated by ${leveled.angle} rad, anchor at x=${leveled.center_x}`);
//! ```

use levelstitch_core::geometry::Line;
use levelstitch_core::rectify::{rectify, RectifiedImage};
use wasm_bindgen::prelude::*;

use crate::geometry::{line_from_js, to_js};
use crate::types::{filter_from_u8, js_error, JsRaster};

/// A raster rotated so its reference line is vertical.
#[wasm_bindgen]
pub struct JsRectifiedImage {
    inner: RectifiedImage,
}

#[wasm_bindgen]
impl JsRectifiedImage {
    /// Rotation that was applied, in radians (positive = clockwise).
    #[wasm_bindgen(getter)]
    pub fn angle(&self) -> f64 {
        self.inner.angle
    }

    /// Normalized x of the leveled line.
    #[wasm_bindgen(getter)]
    pub fn center_x(&self) -> f64 {
        self.inner.center_x()
    }

    /// Normalized y of the top endpoint.
    #[wasm_bindgen(getter)]
    pub fn top(&self) -> f64 {
        self.inner.height_limits().0
    }

    /// Normalized y of the bottom endpoint.
    #[wasm_bindgen(getter)]
    pub fn bottom(&self) -> f64 {
        self.inner.height_limits().1
    }

    /// The leveled line as `[{x, y}, {x, y}]`, top endpoint first.
    pub fn line(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.line)
    }

    /// A copy of the rotated raster.
    pub fn raster(&self) -> JsRaster {
        JsRaster::from_raster(self.inner.raster.clone())
    }
}

impl JsRectifiedImage {
    pub(crate) fn inner(&self) -> &RectifiedImage {
        &self.inner
    }
}

/// Rotate `image` so that `line` becomes vertical.
///
/// # Arguments
///
/// * `image` - Source raster
/// * `line` - Reference line as `[{x, y}, {x, y}]` in normalized coordinates
/// * `filter` - 0 = nearest, 1 = bilinear, 2 = lanczos3
#[wasm_bindgen]
pub fn rectify_image(
    image: &JsRaster,
    line: JsValue,
    filter: u8,
) -> Result<JsRectifiedImage, JsValue> {
    let line = line_from_js(line)?;
    rectify_with_line(image, line, filter).map_err(js_error)
}

fn rectify_with_line(
    image: &JsRaster,
    line: Line,
    filter: u8,
) -> Result<JsRectifiedImage, levelstitch_core::GeometryError> {
    let inner = rectify(image.raster(), line, filter_from_u8(filter))?;
    Ok(JsRectifiedImage { inner })
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelstitch_core::decode::Raster;
    use levelstitch_core::geometry::Point;

    #[test]
    fn test_rectify_vertical_line() {
        let image = JsRaster::from_raster(Raster::filled(20, 40, [9, 9, 9, 255]));
        let line = Line::new(Point::new(0.25, 0.8), Point::new(0.25, 0.2));
        let leveled = rectify_with_line(&image, line, 1).unwrap();

        assert!(leveled.angle().abs() < 1e-12);
        assert!((leveled.center_x() - 0.25).abs() < 1e-12);
        assert!((leveled.top() - 0.2).abs() < 1e-12);
        assert!((leveled.bottom() - 0.8).abs() < 1e-12);
        assert_eq!(leveled.raster().width(), 20);
    }

    #[test]
    fn test_rectify_degenerate_line() {
        let image = JsRaster::from_raster(Raster::filled(20, 40, [9, 9, 9, 255]));
        let p = Point::new(0.5, 0.5);
        assert!(rectify_with_line(&image, Line::new(p, p), 1).is_err());
    }
}
