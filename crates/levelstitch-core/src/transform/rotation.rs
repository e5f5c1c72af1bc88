//! Raster rotation about the image center.
//!
//! The output keeps the source's pixel bounds: corners that rotate out of the
//! frame are clipped and areas the source no longer covers become transparent.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each output pixel center we find the
//! source position that lands on it and interpolate there. A forward rotation
//! by θ (clockwise on screen, matching [`crate::geometry::rotate_point`]) has
//! the inverse:
//! ```text
//! src_x =  (dst_x - cx) * cos(θ) + (dst_y - cy) * sin(θ) + cx
//! src_y = -(dst_x - cx) * sin(θ) + (dst_y - cy) * cos(θ) + cy
//! ```
//! Pixels are square, so rotating in pixel space about `(w/2, h/2)` is the
//! same transform that [`crate::geometry::rotate_line`] applies to
//! aspect-stretched normalized coordinates.

use crate::decode::{Raster, CHANNELS};

use super::sample::{sample, InterpolationFilter, SampleWindow};

/// Rotate a raster about its center, keeping its dimensions.
///
/// # Arguments
///
/// * `raster` - Source raster; not modified
/// * `angle` - Rotation in radians (positive = clockwise on screen)
/// * `filter` - Interpolation method
///
/// # Returns
///
/// A newly allocated raster of the same size with the rotated content.
pub fn rotate_about_center(raster: &Raster, angle: f64, filter: InterpolationFilter) -> Raster {
    // Fast path: no rotation needed
    if angle.abs() < 1e-12 {
        return raster.clone();
    }

    let mut output = Raster::transparent(raster.width, raster.height);
    let Some(window) = SampleWindow::full(raster) else {
        return output;
    };

    let (sin, cos) = angle.sin_cos();
    let cx = raster.width as f64 / 2.0;
    let cy = raster.height as f64 / 2.0;

    for dst_y in 0..raster.height {
        for dst_x in 0..raster.width {
            let dx = dst_x as f64 + 0.5 - cx;
            let dy = dst_y as f64 + 0.5 - cy;

            let src_x = dx * cos + dy * sin + cx;
            let src_y = -dx * sin + dy * cos + cy;

            if let Some(pixel) = sample(raster, &window, src_x, src_y, filter) {
                let idx = output.index(dst_x, dst_y);
                output.pixels[idx..idx + CHANNELS].copy_from_slice(&pixel);
            }
        }
    }

    output
}
