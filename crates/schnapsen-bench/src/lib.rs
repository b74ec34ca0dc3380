pub mod analytics;
pub mod cli;
pub mod config;
pub mod experiment;
pub mod logging;

pub use cli::{ExperimentArgs, run_cli, run_with_args};
pub use experiment::{
    ExperimentRunner, ExperimentSummary, HarnessOptions, PairStats, SearchBotFactory,
    play_games_and_return_stats,
};
