//! Reference lines drawn on an image.

use serde::{Deserialize, Serialize};

use super::point::{real_distance, rotate_point, vector, FrameSize, Point};
use super::GeometryError;

/// A line between two points in the same coordinate space.
///
/// Serialized as a two-element array `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[Point; 2]", into = "[Point; 2]")]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Return the line with its endpoints in canonical (top-first) order.
    pub fn normalized(&self) -> Self {
        let (start, end) = normalize_line(self.start, self.end);
        Self { start, end }
    }

    /// Vector from start to end.
    pub fn vector(&self) -> Point {
        vector(self.start, self.end)
    }

    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Length in pixels of `frame`.
    pub fn real_length(&self, frame: FrameSize) -> f64 {
        real_distance(self.start, self.end, frame)
    }

    pub fn is_zero_length(&self) -> bool {
        self.start == self.end
    }

    /// Check that this line can be used as a reference line.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidLine` if an endpoint lies outside the
    /// unit square or the endpoints coincide.
    pub fn validate(&self) -> Result<(), GeometryError> {
        for p in [self.start, self.end] {
            if !p.is_within_unit_square() {
                return Err(GeometryError::InvalidLine(format!(
                    "endpoint ({}, {}) is outside the image",
                    p.x, p.y
                )));
            }
        }
        if self.is_zero_length() {
            return Err(GeometryError::InvalidLine("endpoints coincide".to_string()));
        }
        Ok(())
    }
}

impl From<[Point; 2]> for Line {
    fn from([start, end]: [Point; 2]) -> Self {
        Self { start, end }
    }
}

impl From<Line> for [Point; 2] {
    fn from(line: Line) -> Self {
        [line.start, line.end]
    }
}

/// Order two points so the one with the smaller y comes first.
///
/// Ties keep the input order, which makes the operation idempotent.
pub fn normalize_line(p1: Point, p2: Point) -> (Point, Point) {
    if p1.y > p2.y {
        (p2, p1)
    } else {
        (p1, p2)
    }
}

/// Rotate a normalized line the same way its image is rotated about its center.
///
/// The endpoints are first stretched by `aspect_ratio` so that both axes have
/// the same physical scale, rotated about the stretched center
/// `(0.5 * aspect_ratio, 0.5)`, then compressed back into normalized space.
/// Endpoint order is preserved.
///
/// # Errors
///
/// Returns `GeometryError::DegenerateGeometry` if `aspect_ratio` is not a
/// positive finite number, or if the angle or an endpoint is not finite.
pub fn rotate_line(line: Line, aspect_ratio: f64, angle: f64) -> Result<Line, GeometryError> {
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return Err(GeometryError::DegenerateGeometry(
            "aspect ratio must be positive and finite",
        ));
    }
    if !angle.is_finite() || !(line.start.is_finite() && line.end.is_finite()) {
        return Err(GeometryError::DegenerateGeometry(
            "line and angle must be finite",
        ));
    }

    let center = Point::new(0.5 * aspect_ratio, 0.5);

    let rotate = |p: Point| {
        let stretched = Point::new(p.x * aspect_ratio, p.y);
        let rotated = rotate_point(stretched, center, angle);
        Point::new(rotated.x / aspect_ratio, rotated.y)
    };

    Ok(Line::new(rotate(line.start), rotate(line.end)))
}
