//! # lsys-engine
//!
//! Context-sensitive L-system grammars: parsing, rewriting and turtle drawing.
//
//   rule text     ──► Lexer ──► Tokens ──► RuleParser     ──► ProductionRuleSet
//   graphics text ──► Lexer ──► Tokens ──► GraphicsParser ──► GraphicsProgram
//
//   axiom ──► RewriteEngine (n generations) ──► symbol string ──► Renderer ──► DrawingBackend
//
// Rules are written `[left <] symbol [> right] ==> rhs | rhs ...` where a
// context is a symbol, `^` (start of string) or `$` (end of string), and
// `\empty` stands for the empty replacement. Graphics statements assign each
// symbol a primitive turtle operation or a `{ ... }` block of them.
//
// USAGE:
//   let rules = lsys_engine::parse_rules("F ==> F+F")?;
//   let engine = RewriteEngine::new(&rules, IgnoreSet::from_symbols("+"));
//   let expanded = engine.expand("F", 3, &mut RngSource::seeded(7))?;
//
//   let graphics = lsys_engine::parse_graphics("F = forward\n+ = turn 90")?;
//   let mut turtle = Turtle::new();
//   Renderer::new(10.0).render(&graphics, &expanded, &mut turtle);

pub mod config;
pub mod error;
pub mod graphics;
pub mod graphics_parser;
pub mod lexer;
pub mod random;
pub mod render;
pub mod rewrite;
pub mod rule_parser;
pub mod rules;
pub mod system;
pub mod token;
pub mod turtle;

pub use config::{ConfigError, LSystemConfig};
pub use error::{Error, ErrorKind, Result};
pub use graphics::{CompiledSymbol, GraphicsOp, GraphicsProgram, StackProfile};
pub use graphics_parser::parse_graphics;
pub use random::{FixedChoice, RandomSource, RngSource};
pub use render::{DrawingBackend, RenderSummary, Renderer};
pub use rewrite::{ExpansionError, IgnoreSet, RewriteEngine};
pub use rule_parser::parse_rules;
pub use rules::{ContextRule, ContextValue, ProductionRuleSet, Symbol};
pub use system::{LSystem, LSystemError};
pub use turtle::{Bounds, Segment, Turtle};
