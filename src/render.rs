// Renderer — drives a drawing backend from an expanded symbol string
//
// Each symbol's compiled operations run against the backend in declared
// order. Symbols without a graphics definition are skipped silently; they are
// usually bookkeeping symbols of the grammar.
//
// The turtle works in its own frame: forward draws along +y and then moves
// the frame's origin to the end of the line.

use tracing::warn;

use crate::graphics::{GraphicsOp, GraphicsProgram};

/// Turtle-graphics primitives supplied by the host. Coordinates are in the
/// turtle's current frame; `push`/`pop` save and restore that frame.
pub trait DrawingBackend {
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, degrees: f64);
    fn push(&mut self);
    fn pop(&mut self);
}

impl<B: DrawingBackend + ?Sized> DrawingBackend for &mut B {
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        (**self).line(x1, y1, x2, y2)
    }
    fn translate(&mut self, dx: f64, dy: f64) {
        (**self).translate(dx, dy)
    }
    fn rotate(&mut self, degrees: f64) {
        (**self).rotate(degrees)
    }
    fn push(&mut self) {
        (**self).push()
    }
    fn pop(&mut self) {
        (**self).pop()
    }
}

/// What a render pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    /// Symbols read from the input string.
    pub symbols: usize,
    /// Operations dispatched to the backend.
    pub ops: usize,
    /// Symbols with no graphics definition.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    step_length: f64,
}

impl Renderer {
    pub fn new(step_length: f64) -> Self {
        Self { step_length }
    }

    pub fn step_length(&self) -> f64 {
        self.step_length
    }

    /// Run one operation against the backend.
    pub fn dispatch<B: DrawingBackend + ?Sized>(&self, op: &GraphicsOp, backend: &mut B) {
        match *op {
            GraphicsOp::Forward { scale } => {
                let length = self.step_length * scale;
                backend.line(0.0, length, 0.0, 0.0);
                backend.translate(0.0, length);
            }
            GraphicsOp::Leap { scale } => backend.translate(0.0, self.step_length * scale),
            GraphicsOp::Turn { angle } => backend.rotate(angle),
            GraphicsOp::Push => backend.push(),
            GraphicsOp::Pop => backend.pop(),
        }
    }

    /// Draw `symbols` using the operations `program` assigns to each.
    pub fn render<B: DrawingBackend + ?Sized>(
        &self,
        program: &GraphicsProgram,
        symbols: &str,
        backend: &mut B,
    ) -> RenderSummary {
        let profile = program.stack_profile(symbols);
        if !profile.is_balanced() {
            warn!(
                net = profile.net,
                lowest = profile.lowest,
                "push/pop operations are unbalanced"
            );
        }

        let mut summary = RenderSummary::default();
        for symbol in symbols.chars() {
            summary.symbols += 1;
            let Some(compiled) = program.lookup(symbol) else {
                summary.skipped += 1;
                continue;
            };
            for op in &compiled.ops {
                self.dispatch(op, backend);
                summary.ops += 1;
            }
        }
        summary
    }
}
