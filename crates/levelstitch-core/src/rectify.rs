//! Single-image rectification: level the reference line by rotating the raster.

use log::debug;

use crate::angle::resolve_angle;
use crate::decode::{Raster, RasterSource};
use crate::geometry::{rotate_line, GeometryError, Line};
use crate::transform::{rotate_about_center, InterpolationFilter};
use crate::Error;

/// A raster rotated so its reference line is vertical, plus that line in the
/// rotated frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RectifiedImage {
    /// Rotated raster with the same dimensions as the source.
    pub raster: Raster,
    /// Reference line in normalized coordinates of `raster`, top endpoint first.
    pub line: Line,
    /// Rotation that was applied, in radians.
    pub angle: f64,
}

impl RectifiedImage {
    /// Horizontal anchor of the line (midpoint x, normalized).
    pub fn center_x(&self) -> f64 {
        self.line.midpoint().x
    }

    /// Normalized y of the top and bottom endpoints.
    pub fn height_limits(&self) -> (f64, f64) {
        (self.line.start.y, self.line.end.y)
    }
}

/// Rotate `raster` so that `line` becomes vertical.
///
/// The line is put in top-first order before rotating, so the recomputed line
/// always runs down the rectified raster regardless of how it was drawn.
///
/// # Errors
///
/// Returns `GeometryError::DegenerateGeometry` for a zero-length line, an
/// empty raster, or a raster whose pixel buffer does not match its size.
pub fn rectify(
    raster: &Raster,
    line: Line,
    filter: InterpolationFilter,
) -> Result<RectifiedImage, GeometryError> {
    if !raster.has_consistent_buffer() {
        return Err(GeometryError::DegenerateGeometry(
            "raster buffer does not match its dimensions",
        ));
    }
    let frame = raster.frame_size();
    let aspect_ratio = frame.aspect_ratio()?;
    let angle = resolve_angle(line, frame)?;

    let rotated = rotate_about_center(raster, angle, filter);
    let line = rotate_line(line.normalized(), aspect_ratio, angle)?;

    debug!(
        "rectified {}x{} raster by {:.4} rad, line now x={:.4} y={:.4}..{:.4}",
        raster.width, raster.height, angle, line.start.x, line.start.y, line.end.y
    );

    Ok(RectifiedImage {
        raster: rotated,
        line,
        angle,
    })
}

/// Load a raster from `source` and rectify it.
///
/// # Errors
///
/// Returns `Error::Decode` if the source cannot be decoded and
/// `Error::Geometry` if the line cannot be resolved.
pub async fn rectify_source<S: RasterSource>(
    source: &S,
    line: Line,
    filter: InterpolationFilter,
) -> Result<RectifiedImage, Error> {
    let raster = source.load().await?;
    Ok(rectify(&raster, line, filter)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{DecodedSource, EncodedSource};
    use crate::geometry::Point;
    use futures::executor::block_on;

    fn gradient(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 128, 255]);
            }
        }
        Raster::new(width, height, pixels)
    }

    #[test]
    fn test_vertical_line_is_untouched() {
        let img = gradient(30, 60);
        let line = Line::new(Point::new(0.4, 0.1), Point::new(0.4, 0.9));
        let result = rectify(&img, line, InterpolationFilter::Bilinear).unwrap();

        assert!(result.angle.abs() < 1e-12);
        assert_eq!(result.raster, img);
        assert!((result.center_x() - 0.4).abs() < 1e-12);
        let (top, bottom) = result.height_limits();
        assert!((top - 0.1).abs() < 1e-12 && (bottom - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_rectified_line_is_vertical() {
        let img = gradient(64, 48);
        let line = Line::new(Point::new(0.3, 0.8), Point::new(0.6, 0.2));
        let result = rectify(&img, line, InterpolationFilter::Bilinear).unwrap();

        let (top, bottom) = result.height_limits();
        assert!(top < bottom, "line must run top to bottom");
        assert!((result.line.start.x - result.line.end.x).abs() < 1e-9);
        assert_eq!((result.raster.width, result.raster.height), (64, 48));
    }

    #[test]
    fn test_rectify_preserves_line_length() {
        let img = gradient(64, 48);
        let line = Line::new(Point::new(0.2, 0.3), Point::new(0.7, 0.6));
        let result = rectify(&img, line, InterpolationFilter::Nearest).unwrap();

        let frame = img.frame_size();
        assert!((line.real_length(frame) - result.line.real_length(frame)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_length_line_fails() {
        let img = gradient(10, 10);
        let p = Point::new(0.5, 0.5);
        let result = rectify(&img, Line::new(p, p), InterpolationFilter::Bilinear);
        assert!(matches!(result, Err(GeometryError::DegenerateGeometry(_))));
    }

    #[test]
    fn test_empty_raster_fails() {
        let img = Raster::new(0, 0, vec![]);
        let line = Line::new(Point::new(0.5, 0.1), Point::new(0.5, 0.9));
        let result = rectify(&img, line, InterpolationFilter::Bilinear);
        assert!(matches!(result, Err(GeometryError::DegenerateGeometry(_))));
    }

    #[test]
    fn test_short_buffer_fails_without_panicking() {
        let img = Raster {
            width: 10,
            height: 10,
            pixels: vec![0; 40],
        };
        let line = Line::new(Point::new(0.3, 0.1), Point::new(0.6, 0.9));
        for filter in [
            InterpolationFilter::Nearest,
            InterpolationFilter::Bilinear,
            InterpolationFilter::Lanczos3,
        ] {
            let result = rectify(&img, line, filter);
            assert!(matches!(result, Err(GeometryError::DegenerateGeometry(_))));
        }
    }

    #[test]
    fn test_rectify_source() {
        let source = DecodedSource::new("a.png", gradient(20, 20));
        let line = Line::new(Point::new(0.2, 0.2), Point::new(0.8, 0.8));
        let result = block_on(rectify_source(&source, line, InterpolationFilter::Bilinear));
        assert!(result.is_ok());
    }

    #[test]
    fn test_rectify_source_decode_failure() {
        let source = EncodedSource::new("bad.jpg", vec![1, 2, 3]);
        let line = Line::new(Point::new(0.2, 0.2), Point::new(0.8, 0.8));
        let result = block_on(rectify_source(&source, line, InterpolationFilter::Bilinear));
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
