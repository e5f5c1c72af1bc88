//! Resolve the rotation that makes a reference line vertical.
//!
//! # Algorithm
//!
//! The line is put in canonical (top-first) order, so its vector always points
//! down the image. The x component is stretched by the aspect ratio to get the
//! vector in true physical proportions, and its direction is measured with
//! `atan2`. A vertical line pointing down has direction `π/2`, so the
//! correction is:
//! ```text
//! rotation = π/2 - atan2(v.y, v.x * width / height)
//! ```
//! Rotating by this angle with [`crate::geometry::rotate_point`] turns the
//! line's vector onto the positive y axis.

use std::f64::consts::FRAC_PI_2;

use crate::geometry::{FrameSize, GeometryError, Line};

/// Compute the rotation (radians) that levels `line` to vertical.
///
/// # Arguments
///
/// * `line` - Reference line in normalized coordinates, in any endpoint order
/// * `frame` - Pixel dimensions of the image the line was drawn on
///
/// # Errors
///
/// Returns `GeometryError::DegenerateGeometry` when the line has zero length,
/// when the frame has no area, or when the result is not finite.
pub fn resolve_angle(line: Line, frame: FrameSize) -> Result<f64, GeometryError> {
    let aspect_ratio = frame.aspect_ratio()?;
    resolve_angle_with_aspect(line, aspect_ratio)
}

/// Same as [`resolve_angle`], taking the aspect ratio (width / height) directly.
pub fn resolve_angle_with_aspect(line: Line, aspect_ratio: f64) -> Result<f64, GeometryError> {
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return Err(GeometryError::DegenerateGeometry(
            "aspect ratio must be positive and finite",
        ));
    }
    if !(line.start.is_finite() && line.end.is_finite()) {
        return Err(GeometryError::DegenerateGeometry(
            "line endpoints must be finite",
        ));
    }
    if line.is_zero_length() {
        return Err(GeometryError::DegenerateGeometry(
            "cannot resolve the angle of a zero-length line",
        ));
    }

    let v = line.normalized().vector();
    let angle = v.y.atan2(v.x * aspect_ratio);
    let rotation = FRAC_PI_2 - angle;

    if !rotation.is_finite() {
        return Err(GeometryError::DegenerateGeometry(
            "resolved angle is not finite",
        ));
    }

    Ok(rotation)
}
