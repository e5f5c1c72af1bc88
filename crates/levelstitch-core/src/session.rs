//! The working set of images and the composite pipeline that redraws it.
//!
//! # Image List
//!
//! [`ImageList`] is a value: every update returns a new list and leaves the
//! original untouched, so a caller can hand a snapshot to the pipeline while
//! the user keeps editing.
//!
//! # Pipeline
//!
//! [`CompositeScheduler::run`] loads and rectifies every image concurrently,
//! waits for all of them, then draws the bands in input order. Each run is
//! tagged with a [`Generation`]; if a newer generation was started while the
//! images were loading, the run is dropped without drawing.

use std::cell::Cell;

use futures::future::join_all;
use log::{debug, warn};

use crate::canvas::DrawingSurface;
use crate::composite::{BandPlacement, Compositor};
use crate::decode::RasterSource;
use crate::geometry::Line;
use crate::rectify::{rectify_source, RectifiedImage};
use crate::store::{KeyValueStore, LineBook};
use crate::Error;

/// One image in the working set.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    pub file_name: String,
    pub line: Option<Line>,
}

impl ImageEntry {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            line: None,
        }
    }

    /// Create an entry, picking up a previously saved line for its file name.
    pub fn restored<S: KeyValueStore>(file_name: impl Into<String>, book: &LineBook<S>) -> Self {
        let file_name = file_name.into();
        let line = book.line_for(&file_name);
        Self { file_name, line }
    }
}

/// Ordered, immutable list of images.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageList {
    entries: Vec<ImageEntry>,
}

impl ImageList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }

    /// New list with `entries` appended.
    pub fn with_added(&self, entries: impl IntoIterator<Item = ImageEntry>) -> Self {
        let mut next = self.entries.clone();
        next.extend(entries);
        Self { entries: next }
    }

    /// New list with the line of image `index` replaced. Out-of-range indices
    /// return an unchanged copy.
    pub fn with_line(&self, index: usize, line: Line) -> Self {
        let entries = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                if i == index {
                    ImageEntry {
                        line: Some(line),
                        ..entry.clone()
                    }
                } else {
                    entry.clone()
                }
            })
            .collect();
        Self { entries }
    }

    /// New list without image `index`.
    pub fn without(&self, index: usize) -> Self {
        let entries = self
            .entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, entry)| entry.clone())
            .collect();
        Self { entries }
    }

    /// Entries that have a line, with their position in the list.
    pub fn ready(&self) -> impl Iterator<Item = (usize, &ImageEntry, Line)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| entry.line.map(|line| (i, entry, line)))
    }

    /// True when every image has a line.
    pub fn is_complete(&self) -> bool {
        !self.is_empty() && self.entries.iter().all(|e| e.line.is_some())
    }
}

/// Monotonic id of a composite request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// One image to rectify: where its pixels come from and its reference line.
#[derive(Debug, Clone)]
pub struct RectifyJob<S> {
    pub source: S,
    pub line: Line,
}

impl<S> RectifyJob<S> {
    pub fn new(source: S, line: Line) -> Self {
        Self { source, line }
    }
}

/// An image left out of the composite because it could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedImage {
    pub name: String,
    pub reason: String,
}

/// Result of a composite run.
#[derive(Debug, Clone, PartialEq)]
pub enum CompositeOutcome {
    /// The surface was redrawn.
    Drawn {
        placements: Vec<BandPlacement>,
        dropped: Vec<DroppedImage>,
    },
    /// A newer request started before this one finished; nothing was drawn.
    Superseded,
}

/// Runs composite requests so that only the latest one reaches the surface.
#[derive(Debug, Default)]
pub struct CompositeScheduler {
    compositor: Compositor,
    latest: Cell<u64>,
}

impl CompositeScheduler {
    pub fn new(compositor: Compositor) -> Self {
        Self {
            compositor,
            latest: Cell::new(0),
        }
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Start a new request, superseding every earlier one.
    pub fn begin(&self) -> Generation {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        Generation(next)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.latest.get()
    }

    /// Rectify every job concurrently, then draw them into `surface` in order.
    ///
    /// Images that fail to decode are left out and reported in
    /// `CompositeOutcome::Drawn::dropped`; the remaining images fill the bands.
    ///
    /// # Errors
    ///
    /// Returns `Error::Geometry` if a line cannot be resolved or a band cannot
    /// be placed. Superseded runs never error.
    pub async fn run<S, D>(
        &self,
        generation: Generation,
        jobs: &[RectifyJob<S>],
        surface: &mut D,
    ) -> Result<CompositeOutcome, Error>
    where
        S: RasterSource,
        D: DrawingSurface + ?Sized,
    {
        let filter = self.compositor.config().filter;
        let results = join_all(
            jobs.iter()
                .map(|job| rectify_source(&job.source, job.line, filter)),
        )
        .await;

        if !self.is_current(generation) {
            warn!("composite {:?} superseded, discarding results", generation);
            return Ok(CompositeOutcome::Superseded);
        }

        let mut images: Vec<RectifiedImage> = Vec::with_capacity(jobs.len());
        let mut dropped = Vec::new();
        for (job, result) in jobs.iter().zip(results) {
            match result {
                Ok(image) => images.push(image),
                Err(Error::Decode(e)) => {
                    warn!("dropping {} from composite: {}", job.source.name(), e);
                    dropped.push(DroppedImage {
                        name: job.source.name().to_string(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let placements = self.compositor.composite(&images, surface)?;
        debug!(
            "composite {:?} drew {} bands, dropped {}",
            generation,
            placements.len(),
            dropped.len()
        );

        Ok(CompositeOutcome::Drawn {
            placements,
            dropped,
        })
    }
}
