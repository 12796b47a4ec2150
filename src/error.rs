// Error types for lsys-engine parsing
//
// Lexing and both grammar parsers share one error type. Every error is fatal
// to the parse call that raised it: the caller never sees a partial rule set
// or graphics program.

use crate::token::Span;
use std::fmt;

/// Result type for lexing and parsing.
pub type Result<T> = std::result::Result<T, Error>;

/// The unit a grammar counts errors in: rules for production text,
/// statements for graphics text. Indices are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Rule,
    Statement,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Rule => f.write_str("rule"),
            Unit::Statement => f.write_str("statement"),
        }
    }
}

/// All errors that can occur while lexing or parsing grammar text.
#[derive(Debug, Clone)]
pub struct Error {
    pub kind: ErrorKind,
    pub span: Option<Span>,
    pub source_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    // Lexer errors
    #[error("invalid token near '{remainder}'")]
    InvalidToken { remainder: String },
    #[error("invalid token pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    // Syntax errors
    #[error("expected {expected}, got {found} at {unit} {index}")]
    UnexpectedToken {
        unit: Unit,
        index: usize,
        expected: String,
        found: String,
    },
    #[error("expected {expected}, got end of input at {unit} {index}")]
    UnexpectedEnd {
        unit: Unit,
        index: usize,
        expected: String,
    },
    #[error("expected a single character lefthand side, got {found} at {unit} {index}")]
    InvalidSymbol {
        unit: Unit,
        index: usize,
        found: String,
    },

    // Semantic errors
    #[error("unexpected empty block at statement {index}")]
    EmptyBlock { index: usize },
    #[error("graphical meaning of '{symbol}' defined multiple times at statement {index}")]
    DuplicateDefinition { symbol: char, index: usize },
    #[error("{op} requires a numeric argument at statement {index}")]
    MissingArgument { op: &'static str, index: usize },
    #[error("invalid numeric literal '{literal}' at statement {index}")]
    InvalidNumber { literal: String, index: usize },
}

impl ErrorKind {
    /// The 1-based rule/statement index, for errors raised by a parser.
    pub fn index(&self) -> Option<usize> {
        match self {
            ErrorKind::InvalidToken { .. } | ErrorKind::InvalidPattern { .. } => None,
            ErrorKind::UnexpectedToken { index, .. }
            | ErrorKind::UnexpectedEnd { index, .. }
            | ErrorKind::InvalidSymbol { index, .. }
            | ErrorKind::EmptyBlock { index }
            | ErrorKind::DuplicateDefinition { index, .. }
            | ErrorKind::MissingArgument { index, .. }
            | ErrorKind::InvalidNumber { index, .. } => Some(*index),
        }
    }
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span: Some(span),
            source_line: None,
        }
    }

    /// An error with no location, e.g. running out of tokens.
    pub fn at_end(kind: ErrorKind) -> Self {
        Self {
            kind,
            span: None,
            source_line: None,
        }
    }

    pub fn with_source_line(mut self, line: String) -> Self {
        self.source_line = Some(line);
        self
    }

    /// Attach the source line the span points into, if any.
    pub fn with_source(self, source: &str) -> Self {
        let line = self
            .span
            .and_then(|span| source.lines().nth(span.line.saturating_sub(1)))
            .map(str::to_string);
        match line {
            Some(line) => self.with_source_line(line),
            None => self,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = &self.span {
            write!(f, "[{}:{}] ", span.line, span.col)?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(line) = &self.source_line {
            write!(f, "\n  | {line}")?;
            if let Some(span) = &self.span {
                write!(f, "\n  | {}^", " ".repeat(span.col.saturating_sub(1)))?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for Error {}
