//! Compositor bindings.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const composition = new JsComposition({ canvas_width: 500, canvas_height: 800 });
//! for (const leveled of images) composition.add(leveled);
//! const out = composition.render();
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(out.pixels()), out.width), 0, 0);
//! ```
//!
//! Decoding happens on the JS side, so a newer request can start while an
//! older one is still awaiting its images. [`JsScheduler`] hands out
//! generations so the older request can tell it has been superseded:
//!
//! ```typescript
//! const generation = scheduler.begin();
//! const leveled = await Promise.all(files.map(loadAndRectify));
//! const out = composition.render_if_current(scheduler, generation);
//! if (out) draw(out);
//! ```

use levelstitch_core::composite::{plan_bands, Compositor};
use levelstitch_core::config::CompositorConfig;
use levelstitch_core::rectify::RectifiedImage;
use levelstitch_core::session::{CompositeScheduler, Generation};
use wasm_bindgen::prelude::*;

use crate::geometry::to_js;
use crate::rectify::JsRectifiedImage;
use crate::types::{js_error, JsRaster};

/// Id of one composite request, issued by [`JsScheduler::begin`].
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsGeneration(Generation);

/// Tracks which composite request is the latest.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct JsScheduler {
    inner: CompositeScheduler,
}

#[wasm_bindgen]
impl JsScheduler {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsScheduler {
        Self::default()
    }

    /// Start a new request, superseding every earlier one.
    pub fn begin(&self) -> JsGeneration {
        JsGeneration(self.inner.begin())
    }

    pub fn is_current(&self, generation: &JsGeneration) -> bool {
        self.inner.is_current(generation.0)
    }
}

/// Ordered set of rectified images and the canvas they are composited onto.
#[wasm_bindgen]
pub struct JsComposition {
    compositor: Compositor,
    images: Vec<RectifiedImage>,
}

#[wasm_bindgen]
impl JsComposition {
    /// Create a composition. `config` is an optional, possibly partial,
    /// `CompositorConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsComposition, JsValue> {
        let config: CompositorConfig = if config.is_undefined() || config.is_null() {
            CompositorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid compositor config: {}", e)))?
        };
        let compositor = Compositor::new(config).map_err(js_error)?;
        Ok(Self::with_compositor(compositor))
    }

    /// Append an image; it gets the next band down.
    pub fn add(&mut self, image: &JsRectifiedImage) {
        self.images.push(image.inner().clone());
    }

    /// Remove the image at `index`. Returns false if out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.images.remove(index);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.images.len()
    }

    /// Source and destination rectangles of every band.
    pub fn placements(&self) -> Result<JsValue, JsValue> {
        let config = self.compositor.config();
        let placements = plan_bands(&self.images, (config.canvas_width, config.canvas_height))
            .map_err(js_error)?;
        to_js(&placements)
    }

    /// Draw every band onto a fresh canvas.
    pub fn render(&self) -> Result<JsRaster, JsValue> {
        self.render_raster().map_err(js_error)
    }

    /// Like [`render`](Self::render), but returns `undefined` without
    /// drawing when `generation` has been superseded.
    pub fn render_if_current(
        &self,
        scheduler: &JsScheduler,
        generation: &JsGeneration,
    ) -> Result<Option<JsRaster>, JsValue> {
        self.render_for(scheduler, generation).map_err(js_error)
    }
}

impl JsComposition {
    fn with_compositor(compositor: Compositor) -> Self {
        Self {
            compositor,
            images: Vec::new(),
        }
    }

    fn render_raster(&self) -> Result<JsRaster, levelstitch_core::GeometryError> {
        self.compositor
            .render(&self.images)
            .map(JsRaster::from_raster)
    }

    fn render_for(
        &self,
        scheduler: &JsScheduler,
        generation: &JsGeneration,
    ) -> Result<Option<JsRaster>, levelstitch_core::GeometryError> {
        if !scheduler.is_current(generation) {
            log::debug!("composite request superseded, skipping render");
            return Ok(None);
        }
        self.render_raster().map(Some)
    }
}
