//! Stitch rectified images into equal-height bands of one canvas.
//!
//! # Band Layout
//!
//! For image `i` of `n`, with its rectified line anchored at normalized
//! `center_x` and spanning normalized `y1..y2` in a `w` x `h` raster:
//! ```text
//! segment   = (y2 - y1) * h / n
//! source    = (0, y1 * h + i * segment, 2 * center_x * w, segment)
//! dest_h    = canvas_h / n
//! dest_w    = dest_h * source_w / source_h
//! dest      = ((canvas_w - dest_w) / 2, i * dest_h, dest_w, dest_h)
//! ```
//! Each image therefore contributes the i-th slice of its own line span, and
//! the slices are stacked top to bottom in input order with no gaps.
//!
//! The source crop is `2 * center_x` wide starting at the left edge, which
//! only centers the anchor when it lies in the left half of the raster. An
//! anchor in the right half produces a crop that extends past the raster;
//! the overhang is left undrawn.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, DrawingSurface};
use crate::config::{CompositorConfig, ConfigError};
use crate::decode::Raster;
use crate::geometry::{GeometryError, PixelRect};
use crate::rectify::RectifiedImage;

/// Where one image is cut from and where it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPlacement {
    /// Position of the image in the input order.
    pub index: usize,
    /// Crop rectangle in the rectified raster's pixels.
    pub source: PixelRect,
    /// Destination rectangle on the canvas.
    pub destination: PixelRect,
}

/// Compute the placement of image `index` out of `count` on a canvas.
///
/// # Errors
///
/// Returns `GeometryError::DegenerateGeometry` if `count` is zero, `index` is
/// out of range, the canvas has no area, the raster buffer does not match its
/// size, or the rectified line has no vertical extent.
pub fn plan_band(
    image: &RectifiedImage,
    index: usize,
    count: usize,
    canvas: (u32, u32),
) -> Result<BandPlacement, GeometryError> {
    if count == 0 || index >= count {
        return Err(GeometryError::DegenerateGeometry(
            "band index must be below the band count",
        ));
    }
    let (canvas_w, canvas_h) = (canvas.0 as f64, canvas.1 as f64);
    if canvas_w <= 0.0 || canvas_h <= 0.0 {
        return Err(GeometryError::DegenerateGeometry("canvas has no area"));
    }
    if !image.raster.has_consistent_buffer() {
        return Err(GeometryError::DegenerateGeometry(
            "raster buffer does not match its dimensions",
        ));
    }

    let width = image.raster.width as f64;
    let height = image.raster.height as f64;
    let n = count as f64;

    let (y1, y2) = image.height_limits();
    let y1_px = y1 * height;
    let y2_px = y2 * height;
    let segment = (y2_px - y1_px) / n;
    if !segment.is_finite() || segment <= 0.0 {
        return Err(GeometryError::DegenerateGeometry(
            "rectified line has no vertical extent",
        ));
    }

    let source = PixelRect::new(
        0.0,
        y1_px + index as f64 * segment,
        2.0 * image.center_x() * width,
        segment,
    );

    let dest_h = canvas_h / n;
    let dest_w = dest_h * (source.width / source.height);
    let destination = PixelRect::new(
        (canvas_w - dest_w) / 2.0,
        index as f64 * dest_h,
        dest_w,
        dest_h,
    );

    if !destination.x.is_finite() || !destination.width.is_finite() {
        return Err(GeometryError::DegenerateGeometry(
            "band destination is not finite",
        ));
    }

    Ok(BandPlacement {
        index,
        source,
        destination,
    })
}

/// Compute placements for every image, in input order.
pub fn plan_bands(
    images: &[RectifiedImage],
    canvas: (u32, u32),
) -> Result<Vec<BandPlacement>, GeometryError> {
    images
        .iter()
        .enumerate()
        .map(|(i, image)| plan_band(image, i, images.len(), canvas))
        .collect()
}

/// Draws rectified images into the bands of a fixed-size canvas.
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    config: CompositorConfig,
}

impl Compositor {
    pub fn new(config: CompositorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Clear `surface` and draw every image into its band.
    ///
    /// All placements are computed before the surface is touched, so a
    /// degenerate image leaves the surface as it was.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateGeometry` if any placement cannot be
    /// computed.
    pub fn composite<S: DrawingSurface + ?Sized>(
        &self,
        images: &[RectifiedImage],
        surface: &mut S,
    ) -> Result<Vec<BandPlacement>, GeometryError> {
        let placements = plan_bands(images, surface.size())?;

        surface.clear(self.config.background);
        for (image, placement) in images.iter().zip(&placements) {
            debug!(
                "band {}/{}: source {:?} -> destination {:?}",
                placement.index + 1,
                images.len(),
                placement.source,
                placement.destination
            );
            surface.draw_image(
                &image.raster,
                placement.source,
                placement.destination,
                self.config.filter,
            );
        }

        Ok(placements)
    }

    /// Composite onto a fresh canvas of the configured size.
    pub fn render(&self, images: &[RectifiedImage]) -> Result<Raster, GeometryError> {
        let mut canvas = Canvas::new(self.config.canvas_width, self.config.canvas_height);
        self.composite(images, &mut canvas)?;
        Ok(canvas.into_raster())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Line, Point};
    use crate::transform::InterpolationFilter;

    const EPS: f64 = 1e-9;

    fn rectified(
        width: u32,
        height: u32,
        rgba: [u8; 4],
        x: f64,
        y1: f64,
        y2: f64,
    ) -> RectifiedImage {
        RectifiedImage {
            raster: Raster::filled(width, height, rgba),
            line: Line::new(Point::new(x, y1), Point::new(x, y2)),
            angle: 0.0,
        }
    }

    fn assert_rect_eq(actual: PixelRect, expected: PixelRect) {
        let close = (actual.x - expected.x).abs() < EPS
            && (actual.y - expected.y).abs() < EPS
            && (actual.width - expected.width).abs() < EPS
            && (actual.height - expected.height).abs() < EPS;
        assert!(close, "expected {:?}, got {:?}", expected, actual);
    }

    /// Records every call instead of drawing.
    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        draws: Vec<(PixelRect, PixelRect)>,
    }

    impl DrawingSurface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            (500, 800)
        }

        fn clear(&mut self, _color: [u8; 4]) {
            self.clears += 1;
        }

        fn draw_image(
            &mut self,
            _image: &Raster,
            src: PixelRect,
            dst: PixelRect,
            _filter: InterpolationFilter,
        ) {
            self.draws.push((src, dst));
        }
    }

    #[test]
    fn test_plan_single_image() {
        let image = rectified(200, 100, [0; 4], 0.25, 0.2, 0.8);
        let placement = plan_band(&image, 0, 1, (500, 800)).unwrap();

        // 100x60 crop scaled to 800 tall keeps its 5:3 aspect
        assert_rect_eq(placement.source, PixelRect::new(0.0, 20.0, 100.0, 60.0));
        let dest_w = 800.0 * 100.0 / 60.0;
        assert_rect_eq(
            placement.destination,
            PixelRect::new((500.0 - dest_w) / 2.0, 0.0, dest_w, 800.0),
        );
    }

    #[test]
    fn test_plan_middle_band_takes_middle_slice() {
        let image = rectified(200, 100, [0; 4], 0.25, 0.2, 0.8);
        let placement = plan_band(&image, 1, 3, (500, 800)).unwrap();

        assert_rect_eq(placement.source, PixelRect::new(0.0, 40.0, 100.0, 20.0));
        let dest_h = 800.0 / 3.0;
        let dest_w = dest_h * 5.0;
        assert_rect_eq(
            placement.destination,
            PixelRect::new((500.0 - dest_w) / 2.0, dest_h, dest_w, dest_h),
        );
    }

    #[test]
    fn test_bands_stack_without_gaps() {
        let images: Vec<_> = (0..4)
            .map(|i| rectified(300, 200, [0; 4], 0.3 + i as f64 * 0.05, 0.1, 0.9))
            .collect();
        let placements = plan_bands(&images, (500, 800)).unwrap();

        assert_eq!(placements.len(), 4);
        for (i, placement) in placements.iter().enumerate() {
            assert_eq!(placement.index, i);
            assert!((placement.destination.height - 200.0).abs() < EPS);
            assert!((placement.destination.y - i as f64 * 200.0).abs() < EPS);
        }
        assert!((placements[3].destination.bottom() - 800.0).abs() < EPS);
    }

    #[test]
    fn test_plan_flat_line_is_degenerate() {
        let image = rectified(100, 100, [0; 4], 0.5, 0.5, 0.5);
        let result = plan_band(&image, 0, 1, (500, 800));
        assert!(matches!(result, Err(GeometryError::DegenerateGeometry(_))));
    }

    #[test]
    fn test_plan_index_out_of_range() {
        let image = rectified(100, 100, [0; 4], 0.5, 0.1, 0.9);
        assert!(plan_band(&image, 2, 2, (500, 800)).is_err());
        assert!(plan_band(&image, 0, 0, (500, 800)).is_err());
    }

    #[test]
    fn test_composite_clears_once_and_draws_in_order() {
        let images = vec![
            rectified(100, 100, [255, 0, 0, 255], 0.5, 0.0, 1.0),
            rectified(100, 100, [0, 0, 255, 255], 0.5, 0.0, 1.0),
        ];
        let mut surface = RecordingSurface::default();
        Compositor::default().composite(&images, &mut surface).unwrap();

        assert_eq!(surface.clears, 1);
        assert_eq!(surface.draws.len(), 2);
        assert_rect_eq(surface.draws[0].0, PixelRect::new(0.0, 0.0, 100.0, 50.0));
        assert_rect_eq(surface.draws[1].0, PixelRect::new(0.0, 50.0, 100.0, 50.0));
        assert!((surface.draws[0].1.y - 0.0).abs() < EPS);
        assert!((surface.draws[1].1.y - 400.0).abs() < EPS);
    }

    #[test]
    fn test_composite_degenerate_leaves_surface_untouched() {
        let images = vec![
            rectified(100, 100, [255, 0, 0, 255], 0.5, 0.0, 1.0),
            rectified(100, 100, [0, 0, 255, 255], 0.5, 0.3, 0.3),
        ];
        let mut surface = RecordingSurface::default();
        let result = Compositor::default().composite(&images, &mut surface);

        assert!(result.is_err());
        assert_eq!(surface.clears, 0);
        assert!(surface.draws.is_empty());
    }

    #[test]
    fn test_render_two_bands() {
        let images = vec![
            rectified(100, 100, [255, 0, 0, 255], 0.5, 0.0, 1.0),
            rectified(100, 100, [0, 0, 255, 255], 0.5, 0.0, 1.0),
        ];
        let canvas = Compositor::default().render(&images).unwrap();

        assert_eq!((canvas.width, canvas.height), (500, 800));
        assert_eq!(canvas.pixel(250, 0), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(250, 399), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(250, 400), Some([0, 0, 255, 255]));
        assert_eq!(canvas.pixel(250, 799), Some([0, 0, 255, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(499, 799), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_render_is_deterministic() {
        let images = vec![
            rectified(120, 90, [10, 200, 30, 255], 0.4, 0.1, 0.7),
            rectified(80, 160, [90, 20, 230, 180], 0.35, 0.25, 0.95),
            rectified(64, 64, [250, 250, 0, 255], 0.45, 0.05, 0.5),
        ];
        let compositor = Compositor::default();
        let first = compositor.render(&images).unwrap();
        let second = compositor.render(&images).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_redraw_starts_from_blank_canvas() {
        let compositor = Compositor::default();
        let mut canvas = Canvas::new(500, 800);

        let wide = vec![rectified(100, 100, [255, 0, 0, 255], 0.5, 0.0, 1.0)];
        compositor.composite(&wide, &mut canvas).unwrap();

        // A narrow band after a full-width one must not leave red behind
        let narrow = vec![rectified(100, 100, [0, 255, 0, 255], 0.05, 0.0, 1.0)];
        compositor.composite(&narrow, &mut canvas).unwrap();

        assert_eq!(canvas.raster().pixel(0, 400), Some([0, 0, 0, 0]));
        assert_eq!(canvas.raster().pixel(250, 400), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_right_half_anchor_leaves_overhang_blank() {
        let config = CompositorConfig {
            canvas_width: 300,
            canvas_height: 100,
            filter: InterpolationFilter::Nearest,
            background: [0, 0, 0, 0],
        };
        let images = vec![rectified(100, 100, [255, 0, 0, 255], 0.75, 0.0, 1.0)];
        let canvas = Compositor::new(config).unwrap().render(&images).unwrap();

        // Crop is 150 wide but the raster ends at 100: drawn over x 75..175 only
        assert_eq!(canvas.pixel(80, 50), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(174, 50), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(200, 50), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(10, 50), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_empty_input_clears_canvas() {
        let compositor = Compositor::default();
        let canvas = compositor.render(&[]).unwrap();
        assert!(canvas.pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CompositorConfig {
            canvas_width: 0,
            ..Default::default()
        };
        assert!(Compositor::new(config).is_err());
    }

    #[test]
    fn test_short_raster_buffer_is_rejected() {
        let mut image = rectified(10, 10, [255, 0, 0, 255], 0.5, 0.0, 1.0);
        image.raster.pixels.truncate(44);

        let result = Compositor::default().render(&[image]);
        assert!(matches!(result, Err(GeometryError::DegenerateGeometry(_))));
    }
}
