// Turtle — in-memory drawing backend
//
// Keeps the current frame (origin + heading) and a stack of saved frames, and
// records every line in world coordinates. Useful on its own for computing
// extents, and as the backend behind the CLI's segment output.

use tracing::warn;

use crate::render::DrawingBackend;

/// A drawn line in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Frame {
    x: f64,
    y: f64,
    /// Degrees, clockwise in screen coordinates (y grows downward).
    heading: f64,
}

impl Frame {
    /// Map a point of this frame to world coordinates.
    fn to_world(&self, x: f64, y: f64) -> (f64, f64) {
        let (sin, cos) = self.heading.to_radians().sin_cos();
        (self.x + x * cos - y * sin, self.y + x * sin + y * cos)
    }
}

/// Axis-aligned extent of the recorded drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, Default)]
pub struct Turtle {
    frame: Frame,
    stack: Vec<Frame>,
    segments: Vec<Segment>,
}

impl Turtle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn position(&self) -> (f64, f64) {
        (self.frame.x, self.frame.y)
    }

    pub fn heading(&self) -> f64 {
        self.frame.heading
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Extent of all recorded segments, `None` if nothing was drawn.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.segments.iter().flat_map(|s| [s.from, s.to]);
        let (x, y) = points.next()?;
        let init = Bounds {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        };
        Some(points.fold(init, |b, (x, y)| Bounds {
            min_x: b.min_x.min(x),
            min_y: b.min_y.min(y),
            max_x: b.max_x.max(x),
            max_y: b.max_y.max(y),
        }))
    }
}

impl DrawingBackend for Turtle {
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.segments.push(Segment {
            from: self.frame.to_world(x1, y1),
            to: self.frame.to_world(x2, y2),
        });
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let (x, y) = self.frame.to_world(dx, dy);
        self.frame.x = x;
        self.frame.y = y;
    }

    fn rotate(&mut self, degrees: f64) {
        self.frame.heading += degrees;
    }

    fn push(&mut self) {
        self.stack.push(self.frame);
    }

    fn pop(&mut self) {
        match self.stack.pop() {
            Some(frame) => self.frame = frame,
            None => warn!("pop on an empty turtle stack ignored"),
        }
    }
}
