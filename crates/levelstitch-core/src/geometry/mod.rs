//! Vector and line geometry in normalized image space.
//!
//! Two coordinate spaces are used throughout the crate and must never be mixed:
//!
//! - **Normalized**: both axes in 0.0 to 1.0 relative to the image, origin at
//!   the top-left corner. One unit of x and one unit of y are only the same
//!   physical length when the image is square.
//! - **Pixel**: absolute offsets within a specific raster.
//!
//! Converting a normalized vector into a real distance or angle always needs
//! the [`FrameSize`] of the image it was measured against.
//!
//! # Rotation Convention
//!
//! Angles are in radians. Rotation uses the y-down screen convention, so a
//! positive angle turns clockwise on screen:
//! ```text
//! x' = cos(a) * (x - cx) - sin(a) * (y - cy) + cx
//! y' = sin(a) * (x - cx) + cos(a) * (y - cy) + cy
//! ```

mod line;
mod point;
mod rect;

pub use line::{normalize_line, rotate_line, Line};
pub use point::{real_distance, rotate_point, scale, vector, FrameSize, Point};
pub use rect::PixelRect;

use thiserror::Error;

/// Errors raised by geometry operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The line is zero-length or has an endpoint outside the unit square.
    #[error("Invalid line: {0}")]
    InvalidLine(String),

    /// A computation would divide by zero or produce a non-finite value.
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
}
