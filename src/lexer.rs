// Lexer — Generic maximal-munch tokenizer
//
// A Lexer is a table of named regex patterns plus a token-builder callback.
// At each position every pattern is tried against the remaining input and the
// LONGEST match wins. Ties between equally long matches go to the pattern
// declared FIRST, never to the content of the match; reordering a table
// therefore changes which ambiguous inputs are accepted.
//
//   "\empty"  →  empty (len 6) vs string (len 6)  →  empty, declared first
//   "A<"      →  string "A" (len 1) vs left-context "A<" (len 2)  →  left-context
//
// Zero-length matches never count. If nothing matches, lexing fails with the
// unconsumed remainder. Matches of whitespace kinds are consumed, not emitted.
//
// The two language tables live here as well. Each is compiled once, on first
// use, and shared: `rule_lexer()` and `graphics_lexer()`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Error, ErrorKind, Result};
use crate::token::{GraphicsTokenKind, RuleTokenKind, Span, Token, TokenKind};

/// A named pattern in a lexer table. The regex is anchored at construction.
#[derive(Debug, Clone)]
pub struct Pattern<K> {
    pub kind: K,
    regex: Regex,
}

impl<K: TokenKind> Pattern<K> {
    pub fn new(kind: K, pattern: &str) -> Result<Self> {
        let anchored = format!("^(?:{pattern})");
        let regex = Regex::new(&anchored).map_err(|e| {
            Error::at_end(ErrorKind::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
        })?;
        Ok(Self { kind, regex })
    }
}

/// Builds the emitted token from the winning pattern and its captures.
pub type TokenBuilder<K> =
    Box<dyn Fn(&Pattern<K>, &Captures<'_>, Span) -> Result<Token<K>> + Send + Sync>;

pub struct Lexer<K> {
    patterns: Vec<Pattern<K>>,
    build: TokenBuilder<K>,
}

impl<K: TokenKind> Lexer<K> {
    pub fn new(patterns: Vec<Pattern<K>>, build: TokenBuilder<K>) -> Self {
        Self { patterns, build }
    }

    /// Tokenize the entire text, dropping whitespace tokens.
    pub fn lex(&self, text: &str) -> Result<Vec<Token<K>>> {
        let mut tokens = Vec::new();
        let mut pos = 0;
        let mut line = 1;
        let mut col = 1;

        while pos < text.len() {
            let rest = &text[pos..];
            let mut best: Option<(&Pattern<K>, Captures<'_>)> = None;
            let mut best_len = 0;

            for pattern in &self.patterns {
                let Some(caps) = pattern.regex.captures(rest) else {
                    continue;
                };
                let len = caps.get(0).map_or(0, |m| m.len());
                // strictly longer only: the first of equally long matches stays
                if len > best_len {
                    best_len = len;
                    best = Some((pattern, caps));
                }
            }

            let Some((pattern, caps)) = best else {
                return Err(Error::new(
                    ErrorKind::InvalidToken {
                        remainder: rest.to_string(),
                    },
                    Span::new(pos, rest.len(), line, col),
                ));
            };

            if !pattern.kind.is_whitespace() {
                let span = Span::new(pos, best_len, line, col);
                tokens.push((self.build)(pattern, &caps, span)?);
            }

            for ch in rest[..best_len].chars() {
                if ch == '\n' {
                    line += 1;
                    col = 1;
                } else {
                    col += 1;
                }
            }
            pos += best_len;
        }

        Ok(tokens)
    }
}

// Language tables

/// Lexeme from the first capture group, falling back to the whole match.
fn first_group(caps: &Captures<'_>) -> Option<String> {
    caps.get(1)
        .or_else(|| caps.get(0))
        .map(|m| m.as_str().to_string())
}

static RULE_LEXER: LazyLock<Result<Lexer<RuleTokenKind>>> = LazyLock::new(build_rule_lexer);
static GRAPHICS_LEXER: LazyLock<Result<Lexer<GraphicsTokenKind>>> =
    LazyLock::new(build_graphics_lexer);

/// Shared lexer for production-rule text.
pub fn rule_lexer() -> Result<&'static Lexer<RuleTokenKind>> {
    RULE_LEXER.as_ref().map_err(Clone::clone)
}

/// Shared lexer for graphics-instruction text.
pub fn graphics_lexer() -> Result<&'static Lexer<GraphicsTokenKind>> {
    GRAPHICS_LEXER.as_ref().map_err(Clone::clone)
}

fn build_rule_lexer() -> Result<Lexer<RuleTokenKind>> {
    use RuleTokenKind::*;

    let patterns = vec![
        Pattern::new(Arrow, r"==>")?,
        Pattern::new(Pipe, r"\|")?,
        Pattern::new(LeftContext, r"([^<>\s])\s*<")?,
        Pattern::new(RightContext, r">\s*([^<>\s])")?,
        Pattern::new(Empty, r"\\empty")?,
        Pattern::new(Str, r"([^<>\s$^=|]+)")?,
        Pattern::new(Whitespace, r"\s+")?,
    ];

    Ok(Lexer::new(
        patterns,
        Box::new(|pattern: &Pattern<RuleTokenKind>, caps: &Captures<'_>, span: Span| {
            let lexeme = match pattern.kind {
                LeftContext | RightContext | Str => first_group(caps),
                _ => None,
            };
            Ok(Token::new(pattern.kind, lexeme, span))
        }),
    ))
}

/// `forward`, `leap` and `turn` carry their (possibly empty) numeric argument
/// as the lexeme; the parser decides whether a missing argument is allowed.
fn build_graphics_lexer() -> Result<Lexer<GraphicsTokenKind>> {
    use GraphicsTokenKind::*;

    // a space or tab run, then an optional number; newlines end the argument
    const ARG: &str = r"(?:[ \t]+(-?\d*(?:\.\d*)?))?";

    let patterns = vec![
        Pattern::new(Equals, r"=")?,
        Pattern::new(BlockStart, r"\{")?,
        Pattern::new(BlockEnd, r"\}")?,
        Pattern::new(Forward, &format!("forward{ARG}"))?,
        Pattern::new(Leap, &format!("leap{ARG}"))?,
        Pattern::new(Turn, &format!("turn{ARG}"))?,
        Pattern::new(Push, r"push")?,
        Pattern::new(Pop, r"pop")?,
        Pattern::new(Char, r"([^\s{}])")?,
        Pattern::new(Whitespace, r"\s+")?,
    ];

    Ok(Lexer::new(
        patterns,
        Box::new(|pattern: &Pattern<GraphicsTokenKind>, caps: &Captures<'_>, span: Span| {
            let lexeme = match pattern.kind {
                Forward | Leap | Turn => Some(
                    caps.get(1)
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default(),
                ),
                Char => first_group(caps),
                _ => None,
            };
            Ok(Token::new(pattern.kind, lexeme, span))
        }),
    ))
}
