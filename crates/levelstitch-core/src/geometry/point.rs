//! Points, vectors and frame sizes.

use serde::{Deserialize, Serialize};

use super::GeometryError;

/// A point or vector. Whether it is normalized or in pixels depends on context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check that both coordinates lie in the closed unit square.
    pub fn is_within_unit_square(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Pixel dimensions of the frame a pair of normalized points is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: f64,
    pub height: f64,
}

impl FrameSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateGeometry` for zero, negative or
    /// non-finite dimensions.
    pub fn aspect_ratio(&self) -> Result<f64, GeometryError> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(GeometryError::DegenerateGeometry(
                "frame dimensions must be positive and finite",
            ));
        }
        Ok(self.width / self.height)
    }
}

impl From<(u32, u32)> for FrameSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f64, height as f64)
    }
}

/// Vector from `p1` to `p2`.
#[inline]
pub fn vector(p1: Point, p2: Point) -> Point {
    Point::new(p2.x - p1.x, p2.y - p1.y)
}

/// Component-wise multiplication of a vector by `k`.
#[inline]
pub fn scale(v: Point, k: f64) -> Point {
    Point::new(v.x * k, v.y * k)
}

/// Euclidean distance between two normalized points, measured in pixels of `frame`.
///
/// Normalized x and y units only have the same length for square frames, so
/// each component is scaled by its own axis before taking the norm.
pub fn real_distance(p1: Point, p2: Point, frame: FrameSize) -> f64 {
    let v = vector(p1, p2);
    ((v.x * frame.width).powi(2) + (v.y * frame.height).powi(2)).sqrt()
}

/// Rotate `p` about `center` by `angle` radians (clockwise on a y-down screen).
pub fn rotate_point(p: Point, center: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;

    Point::new(
        cos * dx - sin * dy + center.x,
        sin * dx + cos * dy + center.y,
    )
}
