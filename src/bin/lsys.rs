//! lsys - expand an L-system and print the result
//!
//! Usage:
//!   lsys --config plant.json
//!   lsys --axiom F --rules koch.rules --graphics koch.gfx --iterations 3 --ignore "+-"
//!   lsys --config plant.json --seed 7 --segments

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lsys_engine::{LSystem, LSystemConfig, RngSource, Turtle};

#[derive(Parser)]
#[command(name = "lsys")]
#[command(about = "Expand a context-sensitive L-system and print or draw it")]
struct Cli {
    /// JSON configuration file; other flags override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Starting string
    #[arg(short, long)]
    axiom: Option<String>,

    /// File with rule grammar text
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// File with graphics instruction text
    #[arg(short, long)]
    graphics: Option<PathBuf>,

    /// Number of generations
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Symbols skipped during context matching
    #[arg(long)]
    ignore: Option<String>,

    /// Seed for reproducible stochastic choice
    #[arg(long)]
    seed: Option<u64>,

    /// Fail once a generation grows past this many symbols
    #[arg(long)]
    max_length: Option<usize>,

    /// Length of a unit forward step
    #[arg(long)]
    step_length: Option<f64>,

    /// Print drawn line segments instead of the expanded string
    #[arg(long)]
    segments: bool,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Merge `--config` with the individual flags. `load` reads each named file
/// exactly once.
fn build_config<F>(cli: &Cli, mut load: F) -> Result<LSystemConfig>
where
    F: FnMut(&Path) -> Result<String>,
{
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = serde_json::from_str::<LSystemConfig>(&load(path)?)
                .with_context(|| format!("parsing {}", path.display()))?;
            if let Some(axiom) = &cli.axiom {
                config.axiom = axiom.clone();
            }
            if let Some(path) = &cli.rules {
                config.rules = load(path)?;
            }
            if let Some(path) = &cli.graphics {
                config.graphics = load(path)?;
            }
            config
        }
        None => {
            let (Some(axiom), Some(rules), Some(graphics)) = (&cli.axiom, &cli.rules, &cli.graphics)
            else {
                bail!("either --config or all of --axiom, --rules and --graphics are required");
            };
            LSystemConfig::new(axiom.clone(), load(rules)?, load(graphics)?)
        }
    };

    if let Some(iterations) = cli.iterations {
        config.iterations = iterations;
    }
    if let Some(ignore) = &cli.ignore {
        config.ignore = ignore.clone();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.max_length.is_some() {
        config.max_length = cli.max_length;
    }
    if let Some(step_length) = cli.step_length {
        config.step_length = step_length;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(&cli, read)?;
    let system = LSystem::from_config(&config)?;

    let mut rng = match config.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };
    let expanded = system.expand(&mut rng)?;
    info!(
        iterations = system.iterations(),
        length = expanded.len(),
        "expansion finished"
    );

    if !cli.segments {
        println!("{expanded}");
        return Ok(());
    }

    let mut turtle = Turtle::new();
    let summary = system.render(&expanded, &mut turtle);
    info!(
        ops = summary.ops,
        skipped = summary.skipped,
        segments = turtle.segments().len(),
        "render finished"
    );
    for segment in turtle.segments() {
        println!(
            "{:.4} {:.4} {:.4} {:.4}",
            segment.from.0, segment.from.1, segment.to.0, segment.to.1
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(path: &Path) -> Result<String> {
        match path.to_str() {
            Some("plant.json") => Ok(r#"{"axiom": "X", "rules": "X ==> F", "graphics": "F = forward", "seed": 3}"#.into()),
            Some("koch.rules") => Ok("F ==> F+F-F-F+F".into()),
            Some("koch.gfx") => Ok("F = forward".into()),
            _ => bail!("no such file {}", path.display()),
        }
    }

    fn build(args: &[&str]) -> (Result<LSystemConfig>, Vec<PathBuf>) {
        let cli = Cli::parse_from(std::iter::once("lsys").chain(args.iter().copied()));
        let mut loaded = Vec::new();
        let config = build_config(&cli, |path: &Path| {
            loaded.push(path.to_path_buf());
            sources(path)
        });
        (config, loaded)
    }

    #[test]
    fn test_flags_read_each_file_once() {
        let (config, loaded) = build(&["--axiom", "F", "--rules", "koch.rules", "--graphics", "koch.gfx"]);
        let config = config.unwrap();
        assert_eq!(config.rules, "F ==> F+F-F-F+F");
        assert_eq!(config.graphics, "F = forward");
        assert_eq!(loaded, vec![PathBuf::from("koch.rules"), PathBuf::from("koch.gfx")]);
    }

    #[test]
    fn test_flags_override_config_file() {
        let (config, loaded) = build(&["--config", "plant.json", "--rules", "koch.rules", "-n", "2"]);
        let config = config.unwrap();
        assert_eq!(config.axiom, "X");
        assert_eq!(config.rules, "F ==> F+F-F-F+F");
        assert_eq!(config.iterations, 2);
        assert_eq!(config.seed, Some(3));
        assert_eq!(loaded, vec![PathBuf::from("plant.json"), PathBuf::from("koch.rules")]);
    }

    #[test]
    fn test_missing_inputs_rejected() {
        let (config, loaded) = build(&["--axiom", "F"]);
        assert!(config.is_err());
        assert!(loaded.is_empty());
    }
}
