//! Drawing surfaces the compositor paints into.

use crate::decode::{Raster, CHANNELS};
use crate::geometry::PixelRect;
use crate::transform::{sample, InterpolationFilter, SampleWindow};

/// A 2D surface that can be cleared and drawn onto, like a canvas context.
pub trait DrawingSurface {
    /// Surface dimensions in pixels.
    fn size(&self) -> (u32, u32);

    /// Reset every pixel to `color`.
    fn clear(&mut self, color: [u8; 4]);

    /// Draw the `src` region of `image` scaled into the `dst` region.
    ///
    /// Parts of `src` outside `image` and parts of `dst` outside the surface
    /// are skipped. Pixels are composited source-over.
    fn draw_image(
        &mut self,
        image: &Raster,
        src: PixelRect,
        dst: PixelRect,
        filter: InterpolationFilter,
    );
}

/// An in-memory RGBA drawing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    raster: Raster,
}

impl Canvas {
    /// Create a transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            raster: Raster::transparent(width, height),
        }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn into_raster(self) -> Raster {
        self.raster
    }
}

impl DrawingSurface for Canvas {
    fn size(&self) -> (u32, u32) {
        (self.raster.width, self.raster.height)
    }

    fn clear(&mut self, color: [u8; 4]) {
        for px in self.raster.pixels.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&color);
        }
    }

    fn draw_image(
        &mut self,
        image: &Raster,
        src: PixelRect,
        dst: PixelRect,
        filter: InterpolationFilter,
    ) {
        if src.is_empty() || dst.is_empty() {
            return;
        }
        let Some(window) = SampleWindow::new(image, src) else {
            return;
        };
        let bounds = PixelRect::covering(self.raster.width, self.raster.height);
        let Some(visible) = dst.intersect(&bounds) else {
            return;
        };

        let scale_x = src.width / dst.width;
        let scale_y = src.height / dst.height;

        let x_start = visible.x.floor() as u32;
        let y_start = visible.y.floor() as u32;
        let x_end = (visible.right().ceil() as u32).min(self.raster.width);
        let y_end = (visible.bottom().ceil() as u32).min(self.raster.height);

        for py in y_start..y_end {
            let cy = py as f64 + 0.5;
            for px in x_start..x_end {
                let cx = px as f64 + 0.5;
                if !dst.contains(cx, cy) {
                    continue;
                }

                let sx = src.x + (cx - dst.x) * scale_x;
                let sy = src.y + (cy - dst.y) * scale_y;
                if let Some(pixel) = sample(image, &window, sx, sy, filter) {
                    let idx = self.raster.index(px, py);
                    blend_over(&mut self.raster.pixels[idx..idx + CHANNELS], pixel);
                }
            }
        }
    }
}

/// Composite `src` over `dst` (straight alpha, source-over).
fn blend_over(dst: &mut [u8], src: [u8; 4]) {
    match src[3] {
        0 => {}
        255 => dst.copy_from_slice(&src),
        _ => {
            let sa = src[3] as f64 / 255.0;
            let da = dst[3] as f64 / 255.0;
            let out_a = sa + da * (1.0 - sa);

            for c in 0..3 {
                let v = (src[c] as f64 * sa + dst[c] as f64 * da * (1.0 - sa)) / out_a;
                dst[c] = v.clamp(0.0, 255.0).round() as u8;
            }
            dst[3] = (out_a * 255.0).round() as u8;
        }
    }
}
