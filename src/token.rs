// Token — Lexical tokens of the two grammar languages
//
// Both the production-rule language and the graphics-instruction language are
// tokenized by the same generic Lexer (see lexer.rs). A token is an immutable
// (kind, lexeme) pair; the kind type is a per-language enum:
//
//   1. RuleTokenKind      — arrow, pipe, left/right context, \empty, strings
//   2. GraphicsTokenKind  — =, { }, forward/leap/turn/push/pop, symbol chars
//
// Each token carries a Span (byte offset + length) for error reporting.

use std::fmt;

/// Byte-level location in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset from the start of the source.
    pub offset: usize,
    /// Length in bytes.
    pub len: usize,
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based, in characters).
    pub col: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize, line: usize, col: usize) -> Self {
        Self {
            offset,
            len,
            line,
            col,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Marker for enums usable as token kinds by the generic lexer.
///
/// `is_whitespace` tells the lexer which matches to drop instead of emit.
pub trait TokenKind: Copy + Eq + fmt::Debug + fmt::Display {
    fn is_whitespace(&self) -> bool;
}

/// A token with its kind, optional lexeme and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<K> {
    pub kind: K,
    pub lexeme: Option<String>,
    pub span: Span,
}

impl<K: TokenKind> Token<K> {
    pub fn new(kind: K, lexeme: Option<String>, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    /// Human-readable description used in diagnostics: `string 'F+F'`.
    pub fn describe(&self) -> String {
        match &self.lexeme {
            Some(lexeme) if !lexeme.is_empty() => format!("{} '{}'", self.kind, lexeme),
            _ => self.kind.to_string(),
        }
    }
}

// Production-rule tokens

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTokenKind {
    Arrow,        // ==>
    Pipe,         // |
    LeftContext,  // c <
    RightContext, // > c
    Empty,        // \empty
    Str,          // replacement string or rule symbol
    Whitespace,
}

impl fmt::Display for RuleTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleTokenKind::Arrow => "arrow",
            RuleTokenKind::Pipe => "pipe",
            RuleTokenKind::LeftContext => "left-context",
            RuleTokenKind::RightContext => "right-context",
            RuleTokenKind::Empty => "empty",
            RuleTokenKind::Str => "string",
            RuleTokenKind::Whitespace => "whitespace",
        };
        f.write_str(name)
    }
}

impl TokenKind for RuleTokenKind {
    fn is_whitespace(&self) -> bool {
        matches!(self, RuleTokenKind::Whitespace)
    }
}

// Graphics-instruction tokens

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsTokenKind {
    Equals,     // =
    BlockStart, // {
    BlockEnd,   // }
    Forward,    // forward [scale]
    Leap,       // leap [scale]
    Turn,       // turn [angle]
    Push,
    Pop,
    Char,
    Whitespace,
}

impl fmt::Display for GraphicsTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphicsTokenKind::Equals => "equals",
            GraphicsTokenKind::BlockStart => "block-start",
            GraphicsTokenKind::BlockEnd => "block-end",
            GraphicsTokenKind::Forward => "forward",
            GraphicsTokenKind::Leap => "leap",
            GraphicsTokenKind::Turn => "turn",
            GraphicsTokenKind::Push => "push",
            GraphicsTokenKind::Pop => "pop",
            GraphicsTokenKind::Char => "char",
            GraphicsTokenKind::Whitespace => "whitespace",
        };
        f.write_str(name)
    }
}

impl TokenKind for GraphicsTokenKind {
    fn is_whitespace(&self) -> bool {
        matches!(self, GraphicsTokenKind::Whitespace)
    }
}
