//! Line geometry bindings.
//!
//! Lines cross the boundary as plain JS arrays of two `{x, y}` objects in
//! normalized coordinates, the same shape they are stored in.

use levelstitch_core::capture::guide_points as core_guide_points;
use levelstitch_core::geometry::{self, FrameSize, Line, Point};
use levelstitch_core::LineCaptureConfig;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use crate::types::js_error;

pub(crate) fn line_from_js(value: JsValue) -> Result<Line, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid line: {}", e)))
}

pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(js_error)
}

/// Angle in radians that makes `line` vertical on a `width` x `height` image.
///
/// Positive angles rotate clockwise on screen.
#[wasm_bindgen]
pub fn resolve_angle(line: JsValue, width: f64, height: f64) -> Result<f64, JsValue> {
    let line = line_from_js(line)?;
    levelstitch_core::resolve_angle(line, FrameSize::new(width, height)).map_err(js_error)
}

/// Rotate a normalized line about the image center, accounting for aspect ratio.
///
/// Fails for a zero, negative or non-finite aspect ratio.
#[wasm_bindgen]
pub fn rotate_line(line: JsValue, aspect_ratio: f64, angle: f64) -> Result<JsValue, JsValue> {
    let line = line_from_js(line)?;
    let rotated = geometry::rotate_line(line, aspect_ratio, angle).map_err(js_error)?;
    to_js(&rotated)
}

/// Put a line in top-first order.
#[wasm_bindgen]
pub fn normalize_line(line: JsValue) -> Result<JsValue, JsValue> {
    let line = line_from_js(line)?;
    to_js(&line.normalized())
}

/// Distance in pixels between two normalized points on a `width` x `height` frame.
#[wasm_bindgen]
pub fn real_distance(x1: f64, y1: f64, x2: f64, y2: f64, width: f64, height: f64) -> f64 {
    geometry::real_distance(
        Point::new(x1, y1),
        Point::new(x2, y2),
        FrameSize::new(width, height),
    )
}

/// Guide dot positions along `line` as displayed at `width` x `height`.
///
/// `config` is an optional `{ guide_spacing_px }` object.
#[wasm_bindgen]
pub fn guide_points(
    line: JsValue,
    width: f64,
    height: f64,
    config: JsValue,
) -> Result<JsValue, JsValue> {
    let line = line_from_js(line)?;
    let config: LineCaptureConfig = if config.is_undefined() || config.is_null() {
        LineCaptureConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid capture config: {}", e)))?
    };
    config.validate().map_err(js_error)?;

    let points = core_guide_points(line, FrameSize::new(width, height), config.guide_spacing_px);
    to_js(&points)
}
