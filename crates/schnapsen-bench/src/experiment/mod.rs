mod harness;

pub use harness::{
    GameRecord, HarnessOptions, PairRun, PairStats, play_games_and_return_stats, play_pairs,
};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use schnapsen_bot::{BotVariant, ProbabilityUtilityBot, TwoPhaseBot};
use schnapsen_core::game::bot::{Bot, GamePlayEngine, GameWinner};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsError, WinRateReport};
use crate::config::{AgentConfig, ExperimentConfig, ResolvedOutputs};

/// Supplies the phase-two search bot each experiment agent delegates to.
pub trait SearchBotFactory {
    type Bot: Bot;

    fn search_bot(&self, agent: &AgentConfig) -> Self::Bot;
}

impl<F, B> SearchBotFactory for F
where
    F: Fn(&AgentConfig) -> B,
    B: Bot,
{
    type Bot = B;

    fn search_bot(&self, agent: &AgentConfig) -> B {
        self(agent)
    }
}

/// Runs the candidate against the baseline and writes the per-game log and
/// the Markdown summary.
pub struct ExperimentRunner {
    config: ExperimentConfig,
    outputs: ResolvedOutputs,
    candidate: AgentBlueprint,
    baseline: AgentBlueprint,
}

#[derive(Debug, Clone)]
pub struct ExperimentSummary {
    pub run_id: String,
    pub stats: PairStats,
    pub report: WinRateReport,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

impl ExperimentSummary {
    /// Console report of the finished run.
    pub fn render_text(&self) -> String {
        let report = &self.report;
        format!(
            "Results of {games} games:\n\
             the {candidate} wins: {wins}\n\
             the {baseline} wins: {losses}\n\
             the {candidate} win rate: {rate:.2}% (95% CI {low:.2}%..{high:.2}%, p = {p:.4})",
            games = report.games,
            candidate = report.candidate,
            baseline = report.baseline,
            wins = report.wins,
            losses = report.losses,
            rate = report.win_rate * 100.0,
            low = report.ci95.0 * 100.0,
            high = report.ci95.1 * 100.0,
            p = report.p_value,
        )
    }
}

impl ExperimentRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: ExperimentConfig, outputs: ResolvedOutputs) -> Result<Self, ExperimentError> {
        let candidate = AgentBlueprint::from_config(&config.candidate)?;
        let baseline = AgentBlueprint::from_config(&config.baseline)?;
        Ok(Self {
            config,
            outputs,
            candidate,
            baseline,
        })
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn run<E, F>(&self, engine: &E, factory: &F) -> Result<ExperimentSummary, ExperimentError>
    where
        E: GamePlayEngine,
        F: SearchBotFactory,
    {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut candidate = self.candidate.spawn(factory.search_bot(&self.config.candidate));
        let mut baseline = self.baseline.spawn(factory.search_bot(&self.config.baseline));

        let games = &self.config.games;
        let options = HarnessOptions {
            seed: games.seed,
            progress_interval: games.progress_interval,
            console_progress: true,
        };

        event!(
            target: "schnapsen_bench::progress",
            Level::INFO,
            run_id = %self.config.run_id,
            candidate = %self.candidate.name,
            baseline = %self.baseline.name,
            pairs = games.pairs as u64,
            seed = games.seed,
            "starting experiment"
        );

        let run = play_pairs(engine, &mut candidate, &mut baseline, games.pairs, &options)
            .map_err(ExperimentError::engine)?;

        let rows_written = self.write_rows(&run.games)?;
        let report = WinRateReport::from_stats(
            &self.candidate.name,
            &self.baseline.name,
            &run.stats,
        )?;
        report.write_markdown(&self.outputs.summary_md, &self.config)?;

        Ok(ExperimentSummary {
            run_id: self.config.run_id.clone(),
            stats: run.stats,
            report,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        })
    }

    fn write_rows(&self, games: &[GameRecord]) -> Result<usize, ExperimentError> {
        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        for game in games {
            let row = GameLogRow {
                run_id: &self.config.run_id,
                game_id: format!("P{:05}_G{}", game.pair_index, game.game_index),
                pair_index: game.pair_index,
                game_index: game.game_index,
                deal_seed: game.deal_seed,
                leader: &game.leader,
                follower: &game.follower,
                winner: game.winner_name(),
                winner_role: game.winner,
                game_points: game.game_points,
                candidate_won: game.bot1_won,
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(games.len())
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), ExperimentError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct GameLogRow<'a> {
    run_id: &'a str,
    game_id: String,
    pair_index: usize,
    game_index: u8,
    deal_seed: u64,
    leader: &'a str,
    follower: &'a str,
    winner: &'a str,
    winner_role: GameWinner,
    game_points: u32,
    candidate_won: bool,
}

struct AgentBlueprint {
    name: String,
    variant: BotVariant,
    seed: u64,
}

impl AgentBlueprint {
    fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let variant = config
            .bot_variant()
            .map_err(|message| AgentError::UnknownVariant {
                name: config.name.clone(),
                message,
            })?;
        Ok(Self {
            name: config.name.clone(),
            variant,
            seed: config.seed,
        })
    }

    fn spawn<S: Bot>(&self, search: S) -> TwoPhaseBot<S> {
        let phase_one = ProbabilityUtilityBot::new(self.name.clone(), self.variant.config(), self.seed);
        TwoPhaseBot::new(self.name.clone(), phase_one, search)
    }
}

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("{0}")]
    Agent(#[from] AgentError),
    #[error("game engine failed: {source}")]
    Engine {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize game row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

impl ExperimentError {
    fn engine<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        ExperimentError::Engine {
            source: Box::new(err),
        }
    }
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent '{name}' has an unknown variant: {message}")]
    UnknownVariant { name: String, message: String },
}
