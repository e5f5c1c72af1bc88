//! Interactive capture of a reference line from pointer events.
//!
//! A line is drawn with a single drag: press on the first endpoint, move, and
//! release on the second. Releasing outside the image (or on the starting
//! point) cancels the line instead of storing an invalid one.

use crate::geometry::{real_distance, scale, vector, FrameSize, Line, Point};

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureOutcome {
    /// A valid line was drawn.
    Completed(Line),
    /// The drag ended outside the image or had no length; nothing is kept.
    Cancelled,
    /// Release without a preceding press.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum CaptureState {
    #[default]
    Idle,
    Dragging {
        start: Point,
        hover: Option<Point>,
    },
    Done(Line),
}

/// Pointer-driven line capture for one image.
#[derive(Debug, Clone, Default)]
pub struct LineCapture {
    state: CaptureState,
}

impl LineCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new line at `point`, discarding any previous one.
    pub fn press(&mut self, point: Point) {
        self.state = CaptureState::Dragging {
            start: point,
            hover: None,
        };
    }

    /// Track the pointer while a line is being dragged.
    pub fn hover(&mut self, point: Point) {
        if let CaptureState::Dragging { start, .. } = self.state {
            self.state = CaptureState::Dragging {
                start,
                hover: Some(point),
            };
        }
    }

    /// Finish the drag at `point`.
    pub fn release(&mut self, point: Point) -> CaptureOutcome {
        let CaptureState::Dragging { start, .. } = self.state else {
            return CaptureOutcome::Ignored;
        };

        let line = Line::new(start, point);
        match line.validate() {
            Ok(()) => {
                self.state = CaptureState::Done(line);
                CaptureOutcome::Completed(line)
            }
            Err(_) => {
                self.state = CaptureState::Idle;
                CaptureOutcome::Cancelled
            }
        }
    }

    /// Drop the in-progress or completed line.
    pub fn reset(&mut self) {
        self.state = CaptureState::Idle;
    }

    /// The completed line, if any.
    pub fn line(&self) -> Option<Line> {
        match self.state {
            CaptureState::Done(line) => Some(line),
            _ => None,
        }
    }

    /// The line to preview: the completed line, or the start joined to the
    /// current hover point while dragging.
    pub fn preview(&self) -> Option<Line> {
        match self.state {
            CaptureState::Idle => None,
            CaptureState::Dragging { start, hover } => hover.map(|h| Line::new(start, h)),
            CaptureState::Done(line) => Some(line),
        }
    }

    /// Points to draw as markers: the endpoints plus guide dots along the preview.
    pub fn markers(&self, frame: FrameSize, spacing: f64) -> Vec<Point> {
        match self.state {
            CaptureState::Idle => Vec::new(),
            CaptureState::Dragging { start, hover: None } => vec![start],
            CaptureState::Dragging {
                start,
                hover: Some(hover),
            } => {
                let line = Line::new(start, hover);
                let mut points = vec![start];
                points.extend(guide_points(line, frame, spacing));
                points.push(hover);
                points
            }
            CaptureState::Done(line) => {
                let mut points = vec![line.start, line.end];
                points.extend(guide_points(line, frame, spacing));
                points
            }
        }
    }
}

/// Evenly spaced interior points along `line`, roughly `spacing` pixels apart
/// on a display of size `frame`.
///
/// With `count = floor(length / spacing)` the line is split into `count`
/// equal steps and the `count - 1` interior points are returned. Lines shorter
/// than one step produce no points.
pub fn guide_points(line: Line, frame: FrameSize, spacing: f64) -> Vec<Point> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Vec::new();
    }

    let distance = real_distance(line.start, line.end, frame);
    let count = (distance / spacing).floor();
    if !count.is_finite() || count < 2.0 {
        return Vec::new();
    }

    let count = count as usize;
    let v = vector(line.start, line.end);
    (1..count)
        .map(|i| {
            let step = scale(v, i as f64 / count as f64);
            Point::new(line.start.x + step.x, line.start.y + step.y)
        })
        .collect()
}
