// Graphics parser — Recursive descent over graphics-instruction tokens
//
// Grammar:
//
//   stmt-list := stmt*
//   stmt      := symbol '=' op
//   op        := prim-op | '{' prim-op+ '}'
//   prim-op   := 'forward' [scale] | 'leap' [scale] | 'turn' angle
//              | 'push' | 'pop'
//
// Parsing and compilation happen in one pass: each statement is turned into
// a CompiledSymbol as soon as it is read. Semantic checks (empty block,
// duplicate symbol, missing or malformed number) are reported with the same
// 1-based statement index as syntax errors.

use tracing::debug;

use crate::error::{Error, ErrorKind, Result, Unit};
use crate::graphics::{CompiledSymbol, GraphicsOp, GraphicsProgram};
use crate::lexer::graphics_lexer;
use crate::rules::Symbol;
use crate::token::{GraphicsTokenKind, Token};

/// Scale used by `forward` and `leap` when none is written.
pub const DEFAULT_SCALE: f64 = 1.0;

pub struct GraphicsParser {
    tokens: Vec<Token<GraphicsTokenKind>>,
    pos: usize,
    stmt_num: usize,
}

impl GraphicsParser {
    pub fn new(tokens: Vec<Token<GraphicsTokenKind>>) -> Self {
        Self {
            tokens,
            pos: 0,
            stmt_num: 1,
        }
    }

    /// Parse and compile every statement.
    pub fn parse_program(&mut self) -> Result<GraphicsProgram> {
        let mut program = GraphicsProgram::new();
        self.stmt_num = 1;

        while !self.at_eof() {
            let symbol_tok = self.peek().cloned();
            let (symbol, ops) = self.parse_stmt()?;
            if !program.define(symbol, CompiledSymbol::new(ops)) {
                let kind = ErrorKind::DuplicateDefinition {
                    symbol,
                    index: self.stmt_num,
                };
                return Err(match symbol_tok {
                    Some(tok) => Error::new(kind, tok.span),
                    None => Error::at_end(kind),
                });
            }
            self.stmt_num += 1;
        }

        debug!(symbols = program.len(), "compiled graphics instructions");
        Ok(program)
    }

    fn parse_stmt(&mut self) -> Result<(Symbol, Vec<GraphicsOp>)> {
        let symbol = self.parse_symbol()?;
        self.expect(GraphicsTokenKind::Equals, "'='")?;
        let ops = self.parse_operator()?;
        Ok((symbol, ops))
    }

    fn parse_symbol(&mut self) -> Result<Symbol> {
        let Some(tok) = self.peek().cloned() else {
            return Err(self.error_at_end("a single character lefthand side"));
        };
        let symbol = match (tok.kind, tok.lexeme.as_deref()) {
            (GraphicsTokenKind::Char, Some(lexeme)) => lexeme.chars().next(),
            _ => None,
        };
        match symbol {
            Some(symbol) => {
                self.pos += 1;
                Ok(symbol)
            }
            None => Err(Error::new(
                ErrorKind::InvalidSymbol {
                    unit: Unit::Statement,
                    index: self.stmt_num,
                    found: tok.describe(),
                },
                tok.span,
            )),
        }
    }

    // Operators

    fn parse_operator(&mut self) -> Result<Vec<GraphicsOp>> {
        if self.check(GraphicsTokenKind::BlockStart) {
            self.parse_block()
        } else {
            Ok(vec![self.parse_prim_op()?])
        }
    }

    fn parse_block(&mut self) -> Result<Vec<GraphicsOp>> {
        let start = self.expect(GraphicsTokenKind::BlockStart, "'{'")?;
        let mut ops = Vec::new();

        while !self.check(GraphicsTokenKind::BlockEnd) {
            if self.at_eof() {
                return Err(self.error_at_end("'}'"));
            }
            ops.push(self.parse_prim_op()?);
        }
        self.expect(GraphicsTokenKind::BlockEnd, "'}'")?;

        if ops.is_empty() {
            return Err(Error::new(
                ErrorKind::EmptyBlock {
                    index: self.stmt_num,
                },
                start.span,
            ));
        }
        Ok(ops)
    }

    fn parse_prim_op(&mut self) -> Result<GraphicsOp> {
        const EXPECTED: &str = "a primitive graphics operation";
        let Some(tok) = self.peek().cloned() else {
            return Err(self.error_at_end(EXPECTED));
        };

        let op = match tok.kind {
            GraphicsTokenKind::Forward => GraphicsOp::Forward {
                scale: self.number(&tok)?.unwrap_or(DEFAULT_SCALE),
            },
            GraphicsTokenKind::Leap => GraphicsOp::Leap {
                scale: self.number(&tok)?.unwrap_or(DEFAULT_SCALE),
            },
            GraphicsTokenKind::Turn => {
                let angle = self.number(&tok)?.ok_or_else(|| {
                    Error::new(
                        ErrorKind::MissingArgument {
                            op: "turn",
                            index: self.stmt_num,
                        },
                        tok.span,
                    )
                })?;
                GraphicsOp::Turn { angle }
            }
            GraphicsTokenKind::Push => GraphicsOp::Push,
            GraphicsTokenKind::Pop => GraphicsOp::Pop,
            _ => return Err(self.error_unexpected(EXPECTED)),
        };

        self.pos += 1;
        Ok(op)
    }

    /// The numeric argument carried by `tok`, `None` when absent.
    fn number(&self, tok: &Token<GraphicsTokenKind>) -> Result<Option<f64>> {
        let literal = tok.lexeme.as_deref().unwrap_or_default();
        if literal.is_empty() {
            return Ok(None);
        }
        literal.parse::<f64>().map(Some).map_err(|_| {
            Error::new(
                ErrorKind::InvalidNumber {
                    literal: literal.to_string(),
                    index: self.stmt_num,
                },
                tok.span,
            )
        })
    }

    // Token stream helpers

    fn peek(&self) -> Option<&Token<GraphicsTokenKind>> {
        self.tokens.get(self.pos)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check(&self, kind: GraphicsTokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn expect(&mut self, kind: GraphicsTokenKind, expected: &str) -> Result<Token<GraphicsTokenKind>> {
        match self.peek() {
            Some(tok) if tok.kind == kind => {
                let tok = tok.clone();
                self.pos += 1;
                Ok(tok)
            }
            Some(_) => Err(self.error_unexpected(expected)),
            None => Err(self.error_at_end(expected)),
        }
    }

    fn error_unexpected(&self, expected: &str) -> Error {
        match self.peek() {
            Some(tok) => Error::new(
                ErrorKind::UnexpectedToken {
                    unit: Unit::Statement,
                    index: self.stmt_num,
                    expected: expected.to_string(),
                    found: tok.describe(),
                },
                tok.span,
            ),
            None => self.error_at_end(expected),
        }
    }

    fn error_at_end(&self, expected: &str) -> Error {
        Error::at_end(ErrorKind::UnexpectedEnd {
            unit: Unit::Statement,
            index: self.stmt_num,
            expected: expected.to_string(),
        })
    }
}

// Public convenience function

/// Parse graphics-instruction text into a compiled program.
pub fn parse_graphics(source: &str) -> Result<GraphicsProgram> {
    let tokens = graphics_lexer()?
        .lex(source)
        .map_err(|e| e.with_source(source))?;
    GraphicsParser::new(tokens)
        .parse_program()
        .map_err(|e| e.with_source(source))
}
