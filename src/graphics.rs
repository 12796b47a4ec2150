// Graphics program — compiled turtle operations per symbol
//
// Each graphics statement compiles a symbol to an ordered list of primitive
// operations plus the net effect those operations have on the turtle's state
// stack. A symbol may be defined once; the parser rejects redefinitions
// before they reach `define`.

use std::collections::HashMap;
use std::fmt;

use crate::rules::Symbol;

/// A primitive turtle operation with its operands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphicsOp {
    /// Draw a line of `step * scale` and move to its end.
    Forward { scale: f64 },
    /// Move `step * scale` without drawing.
    Leap { scale: f64 },
    /// Rotate the heading by `angle` degrees.
    Turn { angle: f64 },
    Push,
    Pop,
}

impl GraphicsOp {
    pub fn stack_delta(&self) -> i32 {
        match self {
            GraphicsOp::Push => 1,
            GraphicsOp::Pop => -1,
            GraphicsOp::Forward { .. } | GraphicsOp::Leap { .. } | GraphicsOp::Turn { .. } => 0,
        }
    }
}

impl fmt::Display for GraphicsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsOp::Forward { scale } => write!(f, "forward {scale}"),
            GraphicsOp::Leap { scale } => write!(f, "leap {scale}"),
            GraphicsOp::Turn { angle } => write!(f, "turn {angle}"),
            GraphicsOp::Push => write!(f, "push"),
            GraphicsOp::Pop => write!(f, "pop"),
        }
    }
}

/// The compiled meaning of one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSymbol {
    pub ops: Vec<GraphicsOp>,
    pub stack_delta: i32,
}

impl CompiledSymbol {
    pub fn new(ops: Vec<GraphicsOp>) -> Self {
        let stack_delta = ops.iter().map(GraphicsOp::stack_delta).sum();
        Self { ops, stack_delta }
    }
}

/// Push/pop balance of a symbol string under a graphics program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackProfile {
    /// Depth after the last symbol, relative to the start.
    pub net: i64,
    /// Lowest depth reached at any point; negative means a pop ran ahead of
    /// its push.
    pub lowest: i64,
}

impl StackProfile {
    pub fn is_balanced(&self) -> bool {
        self.net == 0 && self.lowest >= 0
    }
}

/// Read-only symbol → operations table produced by the graphics parser.
#[derive(Debug, Clone, Default)]
pub struct GraphicsProgram {
    symbols: HashMap<Symbol, CompiledSymbol>,
}

impl GraphicsProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `symbol`. Returns `false` and leaves the existing definition
    /// untouched if the symbol is already defined.
    pub fn define(&mut self, symbol: Symbol, compiled: CompiledSymbol) -> bool {
        if self.symbols.contains_key(&symbol) {
            return false;
        }
        self.symbols.insert(symbol, compiled);
        true
    }

    pub fn lookup(&self, symbol: Symbol) -> Option<&CompiledSymbol> {
        self.symbols.get(&symbol)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.symbols.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Walk `symbols` and track the state-stack depth op by op.
    pub fn stack_profile(&self, symbols: &str) -> StackProfile {
        let mut profile = StackProfile::default();
        let mut depth: i64 = 0;
        for compiled in symbols.chars().filter_map(|c| self.lookup(c)) {
            for op in &compiled.ops {
                depth += i64::from(op.stack_delta());
                profile.lowest = profile.lowest.min(depth);
            }
        }
        profile.net = depth;
        profile
    }
}
