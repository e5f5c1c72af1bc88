//! Raster transforms: rotation about the center and resampling.
//!
//! # Coordinate System
//!
//! - Rotation angles are in radians, positive = clockwise on screen (y-down)
//! - Pixel `(i, j)` covers `[i, i+1) x [j, j+1)`; sampling happens at centers
//! - Origin is the top-left corner

mod rotation;
mod sample;

pub use rotation::rotate_about_center;
pub use sample::InterpolationFilter;

pub(crate) use sample::{sample, SampleWindow};
