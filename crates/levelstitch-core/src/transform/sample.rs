//! Pixel sampling with nearest, bilinear and Lanczos3 interpolation.
//!
//! Coordinates are continuous pixel positions: pixel `(i, j)` covers
//! `[i, i+1) x [j, j+1)` and its center sits at `(i + 0.5, j + 0.5)`.
//! Sampling is restricted to a clip rectangle; neighbours outside the clip are
//! clamped to its edge so nothing outside it bleeds into the result.

use serde::{Deserialize, Serialize};

use crate::decode::{Raster, CHANNELS};
use crate::geometry::PixelRect;

/// Interpolation filter for resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest pixel, no blending.
    Nearest,
    /// Fast bilinear interpolation - good for preview rendering.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation - good for export.
    Lanczos3,
}

/// Integer pixel bounds `[x0, x1) x [y0, y1)` that sampling may read.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SampleWindow {
    clip: PixelRect,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl SampleWindow {
    /// Restrict sampling of `raster` to `clip`. Returns None if nothing remains
    /// or the raster's buffer does not match its dimensions.
    pub(crate) fn new(raster: &Raster, clip: PixelRect) -> Option<Self> {
        if !raster.has_consistent_buffer() {
            return None;
        }
        let clip = clip.intersect(&PixelRect::covering(raster.width, raster.height))?;
        let x0 = clip.x.floor() as i64;
        let y0 = clip.y.floor() as i64;
        let x1 = (clip.right().ceil() as i64).max(x0 + 1);
        let y1 = (clip.bottom().ceil() as i64).max(y0 + 1);
        Some(Self {
            clip,
            x0,
            y0,
            x1,
            y1,
        })
    }

    /// Window covering the whole raster.
    pub(crate) fn full(raster: &Raster) -> Option<Self> {
        Self::new(raster, PixelRect::covering(raster.width, raster.height))
    }

    #[inline]
    fn clamp(&self, px: i64, py: i64) -> (u32, u32) {
        (
            px.clamp(self.x0, self.x1 - 1) as u32,
            py.clamp(self.y0, self.y1 - 1) as u32,
        )
    }
}

/// Sample `raster` at continuous position (x, y).
///
/// Returns None when the position lies outside the sampling window.
pub(crate) fn sample(
    raster: &Raster,
    window: &SampleWindow,
    x: f64,
    y: f64,
    filter: InterpolationFilter,
) -> Option<[u8; 4]> {
    if !window.clip.contains(x, y) {
        return None;
    }

    let pixel = match filter {
        InterpolationFilter::Nearest => {
            let (px, py) = window.clamp(x.floor() as i64, y.floor() as i64);
            let idx = raster.index(px, py);
            return Some([
                raster.pixels[idx],
                raster.pixels[idx + 1],
                raster.pixels[idx + 2],
                raster.pixels[idx + 3],
            ]);
        }
        InterpolationFilter::Bilinear => sample_bilinear(raster, window, x, y),
        InterpolationFilter::Lanczos3 => sample_lanczos3(raster, window, x, y),
    };

    let mut result = [0u8; 4];
    for (out, v) in result.iter_mut().zip(pixel) {
        *out = v.clamp(0.0, 255.0).round() as u8;
    }
    Some(result)
}

/// Get a pixel as [f64; 4] with indices clamped to the window.
#[inline]
fn get_pixel_f64(raster: &Raster, window: &SampleWindow, px: i64, py: i64) -> [f64; 4] {
    let (px, py) = window.clamp(px, py);
    let idx = raster.index(px, py);
    let mut out = [0.0; CHANNELS];
    for (c, v) in out.iter_mut().enumerate() {
        *v = raster.pixels[idx + c] as f64;
    }
    out
}

/// Bilinear interpolation between the 4 nearest pixel centers.
fn sample_bilinear(raster: &Raster, window: &SampleWindow, x: f64, y: f64) -> [f64; 4] {
    let fx = x - 0.5;
    let fy = y - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = get_pixel_f64(raster, window, x0, y0);
    let p10 = get_pixel_f64(raster, window, x0 + 1, y0);
    let p01 = get_pixel_f64(raster, window, x0, y0 + 1);
    let p11 = get_pixel_f64(raster, window, x0 + 1, y0 + 1);

    let mut result = [0.0; 4];
    for i in 0..CHANNELS {
        result[i] = p00[i] * (1.0 - tx) * (1.0 - ty)
            + p10[i] * tx * (1.0 - ty)
            + p01[i] * (1.0 - tx) * ty
            + p11[i] * tx * ty;
    }
    result
}

/// Lanczos3 interpolation over a 6x6 neighbourhood of pixel centers.
fn sample_lanczos3(raster: &Raster, window: &SampleWindow, x: f64, y: f64) -> [f64; 4] {
    let fx = x - 0.5;
    let fy = y - 0.5;
    let x0 = fx.floor() as i64;
    let y0 = fy.floor() as i64;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;
            let weight = lanczos_weight(fx - px as f64, 3.0) * lanczos_weight(fy - py as f64, 3.0);

            let pixel = get_pixel_f64(raster, window, px, py);
            for i in 0..CHANNELS {
                sum[i] += pixel[i] * weight;
            }
            weight_sum += weight;
        }
    }

    if weight_sum.abs() < f64::EPSILON {
        return sample_bilinear(raster, window, x, y);
    }
    sum.map(|v| v / weight_sum)
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
