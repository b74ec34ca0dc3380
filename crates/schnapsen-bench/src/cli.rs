use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use schnapsen_core::game::bot::GamePlayEngine;

use crate::config::ExperimentConfig;
use crate::experiment::{ExperimentRunner, ExperimentSummary, SearchBotFactory};
use crate::logging::init_logging;

/// Head-to-head win-rate experiment for Schnapsen bots.
#[derive(Debug, Parser)]
#[command(
    name = "schnapsen-bench",
    author,
    version,
    about = "Deterministic Schnapsen bot experiment harness"
)]
pub struct ExperimentArgs {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/experiment.yaml")]
    pub config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    pub run_id: Option<String>,

    /// Override the number of game pairs to play.
    #[arg(long, value_name = "PAIRS")]
    pub pairs: Option<usize>,

    /// Override the base seed for dealing.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    pub validate_only: bool,
}

impl ExperimentArgs {
    /// Loads the config file and applies the command-line overrides.
    pub fn load_config(&self) -> anyhow::Result<ExperimentConfig> {
        let mut config = ExperimentConfig::from_path(&self.config)?;

        if let Some(run_id) = self.run_id.as_ref() {
            config.run_id = run_id.clone();
        }
        if let Some(pairs) = self.pairs {
            config.games.pairs = pairs;
        }
        if let Some(seed) = self.seed {
            config.games.seed = seed;
        }

        config
            .validate()
            .with_context(|| format!("applying overrides to {}", self.config.display()))?;
        Ok(config)
    }
}

/// Entry point for host binaries: parses `std::env::args`, runs the
/// experiment against `engine` and prints the results.
pub fn run_cli<E, F>(engine: &E, factory: &F) -> anyhow::Result<()>
where
    E: GamePlayEngine,
    F: SearchBotFactory,
{
    run_with_args(ExperimentArgs::parse(), engine, factory).map(|_| ())
}

/// Same as [`run_cli`] with explicit arguments, e.g. from
/// [`ExperimentArgs::parse_from`]. Returns `None` in validate-only mode.
pub fn run_with_args<E, F>(
    args: ExperimentArgs,
    engine: &E,
    factory: &F,
) -> anyhow::Result<Option<ExperimentSummary>>
where
    E: GamePlayEngine,
    F: SearchBotFactory,
{
    let config = args.load_config()?;
    let outputs = config.resolved_outputs();
    let run_id = config.run_id.clone();

    println!(
        "Loaded configuration '{run_id}': {} ({}) vs {} ({}), {} pairs from seed {}",
        config.candidate.name,
        config.candidate.variant,
        config.baseline.name,
        config.baseline.variant,
        config.games.pairs,
        config.games.seed,
    );

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = ExperimentRunner::new(config, outputs)?;

    if args.validate_only {
        println!("Validation-only mode: no games played.");
        return Ok(None);
    }

    let summary = runner
        .run(engine, factory)
        .with_context(|| format!("running experiment '{run_id}'"))?;

    println!("{}", summary.render_text());
    println!(
        "Game log: {} ({} rows)",
        summary.jsonl_path.display(),
        summary.rows_written
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Trace log: {}", guard.trace_path.display());
    }

    Ok(Some(summary))
}

/// Parses arguments without touching the process environment.
pub fn parse_args<I, T>(args: I) -> Result<ExperimentArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    ExperimentArgs::try_parse_from(args)
}
