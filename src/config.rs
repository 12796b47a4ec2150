// Configuration — everything needed to build and expand one L-system
//
// Deserialized from JSON. Only `axiom`, `rules` and `graphics` are required:
//
//   {
//     "axiom": "F",
//     "rules": "F ==> F[+F]F[-F]F",
//     "graphics": "F = forward\n+ = turn 25\n- = turn -25\n[ = push\n] = pop",
//     "iterations": 4,
//     "ignore": "+-[]",
//     "seed": 7
//   }

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("axiom must not be empty")]
    EmptyAxiom,

    #[error("step length must be a positive finite number, got {0}")]
    InvalidStepLength(f64),

    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_iterations() -> usize {
    10
}

fn default_step_length() -> f64 {
    10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LSystemConfig {
    pub axiom: String,
    /// Rule grammar source text.
    pub rules: String,
    /// Graphics instruction source text.
    pub graphics: String,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Symbols skipped during context matching.
    #[serde(default)]
    pub ignore: String,
    #[serde(default = "default_step_length")]
    pub step_length: f64,
    /// Fixed seed for reproducible stochastic choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Upper bound on the length of any generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl LSystemConfig {
    pub fn new(
        axiom: impl Into<String>,
        rules: impl Into<String>,
        graphics: impl Into<String>,
    ) -> Self {
        Self {
            axiom: axiom.into(),
            rules: rules.into(),
            graphics: graphics.into(),
            iterations: default_iterations(),
            ignore: String::new(),
            step_length: default_step_length(),
            seed: None,
            max_length: None,
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.axiom.is_empty() {
            return Err(ConfigError::EmptyAxiom);
        }
        if !self.step_length.is_finite() || self.step_length <= 0.0 {
            return Err(ConfigError::InvalidStepLength(self.step_length));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config =
            LSystemConfig::from_json(r#"{"axiom": "F", "rules": "F ==> FF", "graphics": "F = forward"}"#)
                .unwrap();
        assert_eq!(config.iterations, 10);
        assert_eq!(config.step_length, 10.0);
        assert_eq!(config.ignore, "");
        assert_eq!(config.seed, None);
        assert_eq!(config.max_length, None);
    }

    #[test]
    fn test_all_fields() {
        let json = r#"{
            "axiom": "X",
            "rules": "X ==> F[+X]",
            "graphics": "F = forward",
            "iterations": 3,
            "ignore": "+[]",
            "step_length": 2.5,
            "seed": 42,
            "max_length": 1000
        }"#;
        let config = LSystemConfig::from_json(json).unwrap();
        assert_eq!(config.iterations, 3);
        assert_eq!(config.ignore, "+[]");
        assert_eq!(config.step_length, 2.5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_length, Some(1000));
    }

    #[test]
    fn test_empty_axiom_rejected() {
        let err = LSystemConfig::from_json(r#"{"axiom": "", "rules": "", "graphics": ""}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyAxiom));
    }

    #[test]
    fn test_bad_step_length_rejected() {
        let mut config = LSystemConfig::new("F", "", "");
        config.step_length = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidStepLength(_))));
        config.step_length = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidStepLength(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            LSystemConfig::from_json("{\"axiom\": 1}"),
            Err(ConfigError::Json(_))
        ));
        // negative iteration counts cannot be represented
        assert!(matches!(
            LSystemConfig::from_json(r#"{"axiom": "F", "rules": "", "graphics": "", "iterations": -1}"#),
            Err(ConfigError::Json(_))
        ));
    }
}
