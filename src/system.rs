// LSystem — a parsed grammar ready to expand and draw
//
//   LSystemConfig ──► validate ──► parse_rules ──► parse_graphics ──► LSystem
//
// Construction fails on the first error: an invalid config is never parsed,
// and graphics are not parsed if the rules fail.

use tracing::debug;

use crate::config::{ConfigError, LSystemConfig};
use crate::error::Error;
use crate::graphics::GraphicsProgram;
use crate::graphics_parser::parse_graphics;
use crate::random::RandomSource;
use crate::render::{DrawingBackend, RenderSummary, Renderer};
use crate::rewrite::{ExpansionError, IgnoreSet, RewriteEngine};
use crate::rule_parser::parse_rules;
use crate::rules::ProductionRuleSet;

#[derive(Debug, thiserror::Error)]
pub enum LSystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("in rules: {0}")]
    Rules(#[source] Error),

    #[error("in graphics: {0}")]
    Graphics(#[source] Error),

    #[error(transparent)]
    Expansion(#[from] ExpansionError),
}

#[derive(Debug, Clone)]
pub struct LSystem {
    axiom: String,
    rules: ProductionRuleSet,
    graphics: GraphicsProgram,
    ignore: IgnoreSet,
    iterations: usize,
    max_length: Option<usize>,
    renderer: Renderer,
}

impl LSystem {
    pub fn from_config(config: &LSystemConfig) -> Result<Self, LSystemError> {
        config.validate()?;
        let rules = parse_rules(&config.rules).map_err(LSystemError::Rules)?;
        let graphics = parse_graphics(&config.graphics).map_err(LSystemError::Graphics)?;
        debug!(
            rules = rules.len(),
            graphics = graphics.len(),
            iterations = config.iterations,
            "built l-system"
        );

        Ok(Self {
            axiom: config.axiom.clone(),
            rules,
            graphics,
            ignore: IgnoreSet::from_symbols(&config.ignore),
            iterations: config.iterations,
            max_length: config.max_length,
            renderer: Renderer::new(config.step_length),
        })
    }

    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    pub fn rules(&self) -> &ProductionRuleSet {
        &self.rules
    }

    pub fn graphics(&self) -> &GraphicsProgram {
        &self.graphics
    }

    pub fn ignore(&self) -> &IgnoreSet {
        &self.ignore
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn engine(&self) -> RewriteEngine<'_> {
        RewriteEngine::new(&self.rules, self.ignore.clone()).with_max_length(self.max_length)
    }

    /// Expand the axiom the configured number of times.
    pub fn expand<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<String, ExpansionError> {
        self.engine().expand(&self.axiom, self.iterations, rng)
    }

    /// Draw an expanded string with the configured step length.
    pub fn render<B: DrawingBackend + ?Sized>(&self, symbols: &str, backend: &mut B) -> RenderSummary {
        self.renderer.render(&self.graphics, symbols, backend)
    }

    /// Every generation from the axiom (generation 0) to the last.
    pub fn history<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Vec<String>, ExpansionError> {
        let engine = self.engine();
        let history = std::iter::once(Ok(self.axiom.clone()))
            .chain(engine.generations(&self.axiom, self.iterations, rng))
            .collect();
        history
    }
}
