//! Configuration for the compositor and line capture.
//!
//! Both structs deserialize with defaults for every missing field, so callers
//! can pass partial JSON objects.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transform::InterpolationFilter;

/// Default composite canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 500;
/// Default composite canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 800;
/// Default on-screen spacing between guide dots in pixels.
pub const DEFAULT_GUIDE_SPACING: f64 = 30.0;

/// Errors for invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Canvas width or height is zero.
    #[error("Invalid canvas size: width ({width}) and height ({height}) must be non-zero")]
    InvalidCanvas { width: u32, height: u32 },

    /// Guide spacing is not a positive finite number.
    #[error("Invalid guide spacing: {0}")]
    InvalidGuideSpacing(f64),
}

/// Settings for the composite canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Output canvas width in pixels.
    pub canvas_width: u32,
    /// Output canvas height in pixels.
    pub canvas_height: u32,
    /// Resampling filter used for both rotation and band drawing.
    pub filter: InterpolationFilter,
    /// RGBA colour the canvas is cleared to before every redraw.
    pub background: [u8; 4],
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            filter: InterpolationFilter::default(),
            background: [0, 0, 0, 0],
        }
    }
}

impl CompositorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::InvalidCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        Ok(())
    }
}

/// Settings for interactive line capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineCaptureConfig {
    /// Distance in screen pixels between guide dots along a line.
    pub guide_spacing_px: f64,
}

impl Default for LineCaptureConfig {
    fn default() -> Self {
        Self {
            guide_spacing_px: DEFAULT_GUIDE_SPACING,
        }
    }
}

impl LineCaptureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.guide_spacing_px.is_finite() || self.guide_spacing_px <= 0.0 {
            return Err(ConfigError::InvalidGuideSpacing(self.guide_spacing_px));
        }
        Ok(())
    }
}
