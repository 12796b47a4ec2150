// Rewrite engine — generation-by-generation string expansion
//
// Every generation is one synchronous pass over the previous generation:
//
//   for each position i of `current`:
//       left  = first non-ignored symbol before i, or Initial
//       right = first non-ignored symbol after i,  or Final
//       next += chosen replacement, or current[i] when no rule matches
//
// Contexts are always read from `current`, never from the half-built `next`,
// so the order in which positions are rewritten cannot change the result.
// Symbols without a matching rule are copied through; that is not an error.
//
// Strings can double (or worse) every generation. `max_length` bounds the
// size of a generation, and `generations()` hands out one generation at a
// time for callers that want to stop early.

use std::collections::HashSet;

use tracing::trace;

use crate::random::RandomSource;
use crate::rules::{ContextValue, ProductionRuleSet, Symbol};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpansionError {
    #[error("generation {generation} grew to {length} symbols, above the limit of {limit}")]
    LengthLimitExceeded {
        generation: usize,
        length: usize,
        limit: usize,
    },
}

/// Symbols skipped when scanning outward for context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    symbols: HashSet<Symbol>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every character of `symbols` is ignored.
    pub fn from_symbols(symbols: &str) -> Self {
        symbols.chars().collect()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl FromIterator<Symbol> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}

// Context scan

/// Observed neighbours of every position of `symbols`: the nearest
/// non-ignored symbol on each side, or `Initial`/`Final` at the boundaries.
/// Two linear passes, one from each end.
pub fn contexts(symbols: &[Symbol], ignore: &IgnoreSet) -> Vec<(ContextValue, ContextValue)> {
    let mut out = Vec::with_capacity(symbols.len());

    let mut last = ContextValue::Initial;
    for &c in symbols {
        out.push((last, ContextValue::Final));
        if !ignore.contains(c) {
            last = ContextValue::Symbol(c);
        }
    }

    let mut next = ContextValue::Final;
    for (slot, &c) in out.iter_mut().zip(symbols).rev() {
        slot.1 = next;
        if !ignore.contains(c) {
            next = ContextValue::Symbol(c);
        }
    }

    out
}

// Engine

pub struct RewriteEngine<'r> {
    rules: &'r ProductionRuleSet,
    ignore: IgnoreSet,
    max_length: Option<usize>,
}

impl<'r> RewriteEngine<'r> {
    pub fn new(rules: &'r ProductionRuleSet, ignore: IgnoreSet) -> Self {
        Self {
            rules,
            ignore,
            max_length: None,
        }
    }

    /// Fail expansion once a generation exceeds `limit` symbols.
    pub fn with_max_length(mut self, limit: Option<usize>) -> Self {
        self.max_length = limit;
        self
    }

    /// Expand `axiom` `iterations` times and return the final generation.
    /// Zero iterations returns the axiom unchanged.
    pub fn expand<R: RandomSource + ?Sized>(
        &self,
        axiom: &str,
        iterations: usize,
        rng: &mut R,
    ) -> Result<String, ExpansionError> {
        let mut last = axiom.to_string();
        for generation in self.generations(axiom, iterations, rng) {
            last = generation?;
        }
        Ok(last)
    }

    /// Lazily produce generations 1 through `iterations`.
    pub fn generations<'a, R: RandomSource + ?Sized>(
        &'a self,
        axiom: &str,
        iterations: usize,
        rng: &'a mut R,
    ) -> Generations<'a, 'r, R> {
        Generations {
            engine: self,
            rng,
            state: RewriteState {
                current: axiom.chars().collect(),
                target: iterations,
                elapsed: 0,
            },
        }
    }

    /// One generation: rewrite every position of `current` against `current`.
    pub fn rewrite_generation<R: RandomSource + ?Sized>(
        &self,
        current: &[Symbol],
        generation: usize,
        rng: &mut R,
    ) -> Result<Vec<Symbol>, ExpansionError> {
        let mut next = Vec::with_capacity(current.len());
        let observed = contexts(current, &self.ignore);

        for (&symbol, &(left, right)) in current.iter().zip(&observed) {
            match self.rules.choose(symbol, left, right, rng) {
                Some(replacement) => next.extend(replacement.chars()),
                None => next.push(symbol),
            }

            if let Some(limit) = self.max_length {
                if next.len() > limit {
                    return Err(ExpansionError::LengthLimitExceeded {
                        generation,
                        length: next.len(),
                        limit,
                    });
                }
            }
        }

        Ok(next)
    }
}

/// Per-run state: the generation being read and how far the run has come.
#[derive(Debug, Clone)]
struct RewriteState {
    current: Vec<Symbol>,
    target: usize,
    elapsed: usize,
}

/// Iterator over successive generations; stops after the first error.
pub struct Generations<'a, 'r, R: ?Sized> {
    engine: &'a RewriteEngine<'r>,
    rng: &'a mut R,
    state: RewriteState,
}

impl<R: RandomSource + ?Sized> Iterator for Generations<'_, '_, R> {
    type Item = Result<String, ExpansionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state.elapsed >= self.state.target {
            return None;
        }
        let generation = self.state.elapsed + 1;

        match self
            .engine
            .rewrite_generation(&self.state.current, generation, &mut *self.rng)
        {
            Ok(next) => {
                trace!(generation, length = next.len(), "expanded generation");
                self.state.current = next;
                self.state.elapsed = generation;
                Some(Ok(self.state.current.iter().collect()))
            }
            Err(err) => {
                self.state.elapsed = self.state.target;
                Some(Err(err))
            }
        }
    }
}
