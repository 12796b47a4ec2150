// Rule parser — Recursive descent over production-rule tokens
//
// Grammar:
//
//   rule-list := rule*
//   rule      := lhs '==>' rhs-list
//   lhs       := [left-context] symbol [right-context]
//   rhs-list  := rhs ('|' rhs)*
//   rhs       := '\empty' | string
//
// Context brackets arrive from the lexer already fused with their character
// ("B <" is one left-context token), so the LHS needs no lookahead beyond one
// token. Rules are counted from 1 for diagnostics. The first error aborts the
// whole parse.

use tracing::debug;

use crate::error::{Error, ErrorKind, Result, Unit};
use crate::lexer::rule_lexer;
use crate::rules::{ContextRule, ContextValue, ProductionRuleSet, Symbol};
use crate::token::{RuleTokenKind, Token};

pub struct RuleParser {
    tokens: Vec<Token<RuleTokenKind>>,
    pos: usize,
    rule_num: usize,
}

impl RuleParser {
    pub fn new(tokens: Vec<Token<RuleTokenKind>>) -> Self {
        Self {
            tokens,
            pos: 0,
            rule_num: 1,
        }
    }

    /// Parse every rule into a rule set, preserving registration order.
    pub fn parse_rules(&mut self) -> Result<ProductionRuleSet> {
        let mut set = ProductionRuleSet::new();
        self.rule_num = 1;

        while !self.at_eof() {
            let rule = self.parse_rule()?;
            set.add_rule(rule);
            self.rule_num += 1;
        }

        debug!(rules = set.len(), "parsed production rules");
        Ok(set)
    }

    fn parse_rule(&mut self) -> Result<ContextRule> {
        let (symbol, left, right) = self.parse_lhs()?;
        self.expect(RuleTokenKind::Arrow, "'==>'")?;
        let replacements = self.parse_rhs_list()?;
        Ok(ContextRule::new(symbol, left, right, replacements))
    }

    // LHS

    fn parse_lhs(&mut self) -> Result<(Symbol, ContextValue, ContextValue)> {
        let left = if self.check(RuleTokenKind::LeftContext) {
            let tok = self.advance_token();
            self.context_of(&tok)?
        } else {
            ContextValue::Wildcard
        };

        let symbol = self.parse_symbol()?;

        let right = if self.check(RuleTokenKind::RightContext) {
            let tok = self.advance_token();
            self.context_of(&tok)?
        } else {
            ContextValue::Wildcard
        };

        Ok((symbol, left, right))
    }

    fn parse_symbol(&mut self) -> Result<Symbol> {
        let Some(tok) = self.peek().cloned() else {
            return Err(self.error_at_end("a lefthand side symbol"));
        };
        if tok.kind == RuleTokenKind::Str {
            if let Some(symbol) = single_char(tok.lexeme.as_deref()) {
                self.pos += 1;
                return Ok(symbol);
            }
        }
        Err(Error::new(
            ErrorKind::InvalidSymbol {
                unit: Unit::Rule,
                index: self.rule_num,
                found: tok.describe(),
            },
            tok.span,
        ))
    }

    fn context_of(&self, tok: &Token<RuleTokenKind>) -> Result<ContextValue> {
        single_char(tok.lexeme.as_deref())
            .map(ContextValue::from_context_char)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidSymbol {
                        unit: Unit::Rule,
                        index: self.rule_num,
                        found: tok.describe(),
                    },
                    tok.span,
                )
            })
    }

    // RHS

    fn parse_rhs_list(&mut self) -> Result<Vec<String>> {
        let mut replacements = vec![self.parse_rhs()?];
        while self.check(RuleTokenKind::Pipe) {
            self.pos += 1;
            replacements.push(self.parse_rhs()?);
        }
        Ok(replacements)
    }

    fn parse_rhs(&mut self) -> Result<String> {
        const EXPECTED: &str = "a replacement string or \\empty";
        match self.peek().map(|t| t.kind) {
            Some(RuleTokenKind::Empty) => {
                self.pos += 1;
                Ok(String::new())
            }
            Some(RuleTokenKind::Str) => Ok(self.advance_token().lexeme.unwrap_or_default()),
            Some(_) => Err(self.error_unexpected(EXPECTED)),
            None => Err(self.error_at_end(EXPECTED)),
        }
    }

    // Token stream helpers

    fn peek(&self) -> Option<&Token<RuleTokenKind>> {
        self.tokens.get(self.pos)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check(&self, kind: RuleTokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    /// Only call after `check`/`peek` confirmed a token is present.
    fn advance_token(&mut self) -> Token<RuleTokenKind> {
        let tok = self.tokens[self.pos].clone();
        self.pos += 1;
        tok
    }

    fn expect(&mut self, kind: RuleTokenKind, expected: &str) -> Result<Token<RuleTokenKind>> {
        if self.check(kind) {
            Ok(self.advance_token())
        } else if self.at_eof() {
            Err(self.error_at_end(expected))
        } else {
            Err(self.error_unexpected(expected))
        }
    }

    fn error_unexpected(&self, expected: &str) -> Error {
        match self.peek() {
            Some(tok) => Error::new(
                ErrorKind::UnexpectedToken {
                    unit: Unit::Rule,
                    index: self.rule_num,
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
            unit: Unit::Rule,
            index: self.rule_num,
            expected: expected.to_string(),
        })
    }
}

fn single_char(lexeme: Option<&str>) -> Option<char> {
    let mut chars = lexeme?.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

// Public convenience function

/// Parse production-rule text into a rule set.
pub fn parse_rules(source: &str) -> Result<ProductionRuleSet> {
    let tokens = rule_lexer()?
        .lex(source)
        .map_err(|e| e.with_source(source))?;
    RuleParser::new(tokens)
        .parse_rules()
        .map_err(|e| e.with_source(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Span;

    fn tok(kind: RuleTokenKind, lexeme: Option<&str>, col: usize) -> Token<RuleTokenKind> {
        Token::new(kind, lexeme.map(str::to_string), Span::new(col - 1, 1, 1, col))
    }

    #[test]
    fn test_context_token_must_carry_one_char() {
        // the rule lexer always captures exactly one character; a hand-built
        // token stream can still carry more
        let tokens = vec![
            tok(RuleTokenKind::LeftContext, Some("BC"), 1),
            tok(RuleTokenKind::Str, Some("A"), 5),
            tok(RuleTokenKind::Arrow, None, 7),
            tok(RuleTokenKind::Str, Some("X"), 11),
        ];
        let err = RuleParser::new(tokens).parse_rules().unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::InvalidSymbol {
                unit: Unit::Rule,
                index: 1,
                found: "left-context 'BC'".into(),
            }
        );
        assert_eq!(err.span.map(|s| s.col), Some(1));
    }

    #[test]
    fn test_context_token_without_lexeme() {
        let tokens = vec![
            tok(RuleTokenKind::Str, Some("A"), 1),
            tok(RuleTokenKind::RightContext, None, 3),
            tok(RuleTokenKind::Arrow, None, 5),
            tok(RuleTokenKind::Str, Some("X"), 9),
        ];
        let err = RuleParser::new(tokens).parse_rules().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidSymbol { index: 1, .. }));
    }

    #[test]
    fn test_parser_from_tokens() {
        let tokens = vec![
            tok(RuleTokenKind::LeftContext, Some("^"), 1),
            tok(RuleTokenKind::Str, Some("A"), 5),
            tok(RuleTokenKind::Arrow, None, 7),
            tok(RuleTokenKind::Empty, None, 11),
        ];
        let rules = RuleParser::new(tokens).parse_rules().unwrap();
        let rule = &rules.rules_for('A')[0];
        assert_eq!(rule.left, ContextValue::Initial);
        assert_eq!(rule.replacements, vec![String::new()]);
    }
}
