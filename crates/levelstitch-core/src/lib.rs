//! Levelstitch Core - geometry engine for leveling and stacking photos
//!
//! Each photo carries a user-drawn reference line. This crate rotates every
//! photo so its line becomes vertical, then stacks horizontal slices of the
//! rectified photos into a single composite, one band per photo.
//!
//! The pipeline, in order:
//! - [`decode`]: image bytes to RGBA [`Raster`]s
//! - [`capture`]: pointer events to a reference [`Line`]
//! - [`angle`] and [`rectify`]: level the line by rotating the raster
//! - [`composite`]: draw N bands onto a [`DrawingSurface`]
//! - [`session`]: the image list and the stale-request-aware composite run
//! - [`store`] and [`encode`]: persistence of lines and export

pub mod angle;
pub mod canvas;
pub mod capture;
pub mod composite;
pub mod config;
pub mod decode;
pub mod encode;
mod error;
pub mod geometry;
pub mod rectify;
pub mod session;
pub mod store;
pub mod transform;

pub use angle::resolve_angle;
pub use canvas::{Canvas, DrawingSurface};
pub use capture::{guide_points, CaptureOutcome, LineCapture};
pub use composite::{plan_band, plan_bands, BandPlacement, Compositor};
pub use config::{CompositorConfig, ConfigError, LineCaptureConfig};
pub use decode::{decode_image, DecodeError, Raster};
pub use encode::{encode_jpeg, encode_png, EncodeError};
pub use error::Error;
pub use geometry::{
    normalize_line, real_distance, rotate_line, rotate_point, scale, vector, FrameSize,
    GeometryError, Line, PixelRect, Point,
};
pub use rectify::{rectify, rectify_source, RectifiedImage};
pub use session::{CompositeOutcome, CompositeScheduler, Generation, ImageEntry, ImageList};
pub use store::{KeyValueStore, LineBook, MemoryStore, StoreError};
pub use transform::{rotate_about_center, InterpolationFilter};
