use std::fs;
use std::path::Path;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::config::ExperimentConfig;
use crate::experiment::PairStats;

const CONFIDENCE_Z: f64 = 1.96; // 95% CI

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("no games were played")]
    NoGames,
    #[error("failed to build normal distribution: {0}")]
    Distribution(String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Candidate-versus-baseline win statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinRateReport {
    pub candidate: String,
    pub baseline: String,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    /// Wilson score interval for the win rate.
    pub ci95: (f64, f64),
    /// Two-sided p-value of the null hypothesis "both bots are equally strong".
    pub p_value: f64,
    pub candidate_game_points: u64,
    pub baseline_game_points: u64,
}

impl WinRateReport {
    pub fn from_stats(
        candidate: &str,
        baseline: &str,
        stats: &PairStats,
    ) -> Result<Self, AnalyticsError> {
        if stats.games == 0 {
            return Err(AnalyticsError::NoGames);
        }
        let games = stats.games;
        let wins = stats.bot1_wins;
        Ok(Self {
            candidate: candidate.to_string(),
            baseline: baseline.to_string(),
            games,
            wins,
            losses: stats.bot2_wins(),
            win_rate: wins as f64 / games as f64,
            ci95: wilson_interval(wins, games),
            p_value: p_value_against_even(wins, games)?,
            candidate_game_points: stats.bot1_game_points,
            baseline_game_points: stats.bot2_game_points,
        })
    }

    pub fn write_markdown(
        &self,
        path: impl AsRef<Path>,
        config: &ExperimentConfig,
    ) -> Result<(), AnalyticsError> {
        let mut out = String::new();
        out.push_str(&format!("# Experiment Summary: {}\n\n", config.run_id));
        out.push_str(&format!(
            "{} game pairs, deal seed {}. Candidate `{}` ({}), baseline `{}` ({}).\n\n",
            config.games.pairs,
            config.games.seed,
            config.candidate.name,
            config.candidate.variant,
            config.baseline.name,
            config.baseline.variant,
        ));
        out.push_str("| Bot | Games | Wins | Win % | 95% CI | Game points | p-value |\n");
        out.push_str("|-----|-------|------|-------|--------|-------------|---------|\n");

        let baseline_rate = self.losses as f64 / self.games as f64;
        let baseline_ci = (1.0 - self.ci95.1, 1.0 - self.ci95.0);
        for (name, wins, rate, ci, points) in [
            (
                &self.candidate,
                self.wins,
                self.win_rate,
                self.ci95,
                self.candidate_game_points,
            ),
            (
                &self.baseline,
                self.losses,
                baseline_rate,
                baseline_ci,
                self.baseline_game_points,
            ),
        ] {
            out.push_str(&format!(
                "| {name} | {games} | {wins} | {rate:.2}% | [{low:.2}%, {high:.2}%] | {points} | {pval:.4} |\n",
                games = self.games,
                rate = rate * 100.0,
                low = ci.0 * 100.0,
                high = ci.1 * 100.0,
                pval = self.p_value,
            ));
        }

        fs::write(path.as_ref(), out).map_err(|source| AnalyticsError::Io {
            context: "writing summary markdown",
            source,
        })
    }
}

/// Wilson score interval at 95% confidence. `games` must be positive.
pub fn wilson_interval(wins: usize, games: usize) -> (f64, f64) {
    let n = games as f64;
    let p = wins as f64 / n;
    let z2 = CONFIDENCE_Z * CONFIDENCE_Z;
    let denominator = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denominator;
    let margin = CONFIDENCE_Z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denominator;
    ((center - margin).max(0.0), (center + margin).min(1.0))
}

/// Normal approximation to the two-sided binomial test against p = 0.5.
pub fn p_value_against_even(wins: usize, games: usize) -> Result<f64, AnalyticsError> {
    let n = games as f64;
    let z = (wins as f64 - n / 2.0) / (n / 4.0).sqrt();
    let normal = Normal::new(0.0, 1.0).map_err(|e| AnalyticsError::Distribution(e.to_string()))?;
    let p = 2.0 * (1.0 - normal.cdf(z.abs()));
    Ok(p.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn stats(games: usize, wins: usize) -> PairStats {
        PairStats {
            pairs: games / 2,
            games,
            bot1_wins: wins,
            bot1_game_points: wins as u64 * 2,
            bot2_game_points: (games - wins) as u64,
        }
    }

    #[test]
    fn even_split_is_not_significant() {
        let p = p_value_against_even(500, 1000).expect("p-value");
        assert!((p - 1.0).abs() < 1e-9);
    }

    #[test]
    fn lopsided_result_is_significant() {
        // z = (560 - 500) / sqrt(250) ~ 3.79
        let p = p_value_against_even(560, 1000).expect("p-value");
        assert!(p < 0.001, "p = {p}");
        let symmetric = p_value_against_even(440, 1000).expect("p-value");
        assert!((p - symmetric).abs() < 1e-12);
    }

    #[test]
    fn wilson_interval_brackets_the_rate() {
        let (low, high) = wilson_interval(550, 1000);
        assert!(low < 0.55 && 0.55 < high);
        assert!((low - 0.5192).abs() < 1e-3, "low = {low}");
        assert!((high - 0.5804).abs() < 1e-3, "high = {high}");
    }

    #[test]
    fn wilson_interval_stays_in_unit_range() {
        let (low, high) = wilson_interval(0, 4);
        assert!(low.abs() < 1e-12);
        assert!(high > 0.0 && high < 1.0);
        let (low, high) = wilson_interval(4, 4);
        assert!(low > 0.0);
        assert!((high - 1.0).abs() < 1e-12);
    }

    #[test]
    fn report_requires_games() {
        let err = WinRateReport::from_stats("afro", "a", &PairStats::default());
        assert!(matches!(err, Err(AnalyticsError::NoGames)));
    }

    #[test]
    fn report_counts_both_sides() {
        let report = WinRateReport::from_stats("afro", "a", &stats(10, 7)).expect("report");
        assert_eq!(report.wins, 7);
        assert_eq!(report.losses, 3);
        assert!((report.win_rate - 0.7).abs() < 1e-12);
        assert_eq!(report.candidate_game_points, 14);
        assert_eq!(report.baseline_game_points, 3);
    }

    #[test]
    fn markdown_lists_both_bots() {
        let config = crate::config::ExperimentConfig::from_yaml(
            r#"
run_id: "md"
games: { pairs: 5 }
candidate: { name: "afro", variant: "pu_afro" }
baseline: { name: "a", variant: "pu_a" }
outputs: { jsonl: "games.jsonl", summary_md: "summary.md" }
"#,
        )
        .expect("config");
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("summary.md");
        let report = WinRateReport::from_stats("afro", "a", &stats(10, 6)).expect("report");
        report.write_markdown(&path, &config).expect("write");

        let text = fs::read_to_string(&path).expect("read back");
        assert!(text.starts_with("# Experiment Summary: md"));
        assert!(text.contains("| afro | 10 | 6 | 60.00% |"));
        assert!(text.contains("| a | 10 | 4 | 40.00% |"));
    }
}
