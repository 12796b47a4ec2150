// Production rules — context-sensitive rewrite table
//
// A ProductionRuleSet maps each symbol to the ordered list of rules written
// for it. Lookup picks, among the rules whose contexts accept the observed
// neighbours, the one with the highest specificity; ties go to the rule that
// was registered first.
//
//   A ==> X          specificity 0
//   B < A ==> Y      specificity 1
//   B < A > C ==> Z  specificity 2

use std::collections::HashMap;
use std::fmt;

use crate::random::RandomSource;

/// A grammar symbol. Every symbol is a single character.
pub type Symbol = char;

/// One side of a rule's context, or an observed neighbour during rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextValue {
    /// No constraint; only ever appears in rules.
    Wildcard,
    /// Before the first symbol of the string (`^`).
    Initial,
    /// After the last symbol of the string (`$`).
    Final,
    Symbol(Symbol),
}

impl ContextValue {
    /// Interpret a context character from rule text.
    pub fn from_context_char(c: char) -> Self {
        match c {
            '^' => ContextValue::Initial,
            '$' => ContextValue::Final,
            other => ContextValue::Symbol(other),
        }
    }

    /// Does this rule-side constraint accept the observed neighbour?
    pub fn accepts(self, observed: ContextValue) -> bool {
        self == ContextValue::Wildcard || self == observed
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Wildcard => write!(f, "*"),
            ContextValue::Initial => write!(f, "^"),
            ContextValue::Final => write!(f, "$"),
            ContextValue::Symbol(c) => write!(f, "{c}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextRule {
    pub symbol: Symbol,
    pub left: ContextValue,
    pub right: ContextValue,
    /// Candidate replacements; `""` deletes the symbol.
    pub replacements: Vec<String>,
    pub specificity: u8,
}

impl ContextRule {
    pub fn new(
        symbol: Symbol,
        left: ContextValue,
        right: ContextValue,
        replacements: Vec<String>,
    ) -> Self {
        let specificity =
            u8::from(left != ContextValue::Wildcard) + u8::from(right != ContextValue::Wildcard);
        Self {
            symbol,
            left,
            right,
            replacements,
            specificity,
        }
    }

    pub fn matches(&self, left: ContextValue, right: ContextValue) -> bool {
        self.left.accepts(left) && self.right.accepts(right)
    }
}

impl fmt::Display for ContextRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.left != ContextValue::Wildcard {
            write!(f, "{} < ", self.left)?;
        }
        write!(f, "{}", self.symbol)?;
        if self.right != ContextValue::Wildcard {
            write!(f, " > {}", self.right)?;
        }
        write!(f, " ==>")?;
        for (i, r) in self.replacements.iter().enumerate() {
            if i > 0 {
                write!(f, " |")?;
            }
            if r.is_empty() {
                write!(f, " \\empty")?;
            } else {
                write!(f, " {r}")?;
            }
        }
        Ok(())
    }
}

/// Read-only rule table produced by the rule parser.
#[derive(Debug, Clone, Default)]
pub struct ProductionRuleSet {
    rules: HashMap<Symbol, Vec<ContextRule>>,
}

impl ProductionRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule under its symbol, after any rules already registered.
    pub fn add_rule(&mut self, rule: ContextRule) {
        self.rules.entry(rule.symbol).or_default().push(rule);
    }

    /// Rules registered for `symbol`, in registration order.
    pub fn rules_for(&self, symbol: Symbol) -> &[ContextRule] {
        self.rules.get(&symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The best matching rule for `symbol` in the observed context.
    pub fn best_rule(
        &self,
        symbol: Symbol,
        left: ContextValue,
        right: ContextValue,
    ) -> Option<&ContextRule> {
        let mut best: Option<&ContextRule> = None;
        for rule in self.rules_for(symbol) {
            if !rule.matches(left, right) {
                continue;
            }
            // strictly greater: an earlier rule keeps a tie
            if best.map_or(true, |b| rule.specificity > b.specificity) {
                best = Some(rule);
            }
        }
        best
    }

    /// Replacement list of the best matching rule, or `None` if no rule matches.
    pub fn lookup(
        &self,
        symbol: Symbol,
        left: ContextValue,
        right: ContextValue,
    ) -> Option<&[String]> {
        self.best_rule(symbol, left, right)
            .map(|rule| rule.replacements.as_slice())
    }

    /// Resolve one replacement. A single candidate is returned without
    /// drawing from `rng`.
    pub fn choose<R: RandomSource + ?Sized>(
        &self,
        symbol: Symbol,
        left: ContextValue,
        right: ContextValue,
        rng: &mut R,
    ) -> Option<&str> {
        let replacements = self.lookup(symbol, left, right)?;
        match replacements {
            [] => None,
            [only] => Some(only.as_str()),
            many => Some(many[rng.pick(many.len())].as_str()),
        }
    }
}
