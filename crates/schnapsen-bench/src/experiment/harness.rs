use rand::SeedableRng;
use rand::rngs::StdRng;
use schnapsen_core::game::bot::{Bot, GamePlayEngine, GameWinner};
use serde::Serialize;
use tracing::{Level, event};

use crate::config::DEFAULT_PROGRESS_INTERVAL;

/// Knobs for [`play_games_and_return_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessOptions {
    /// Base seed; pair `p` is dealt from `seed + p`.
    pub seed: u64,
    pub progress_interval: usize,
    /// Also print progress lines to stdout.
    pub console_progress: bool,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            console_progress: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PairStats {
    pub pairs: usize,
    pub games: usize,
    pub bot1_wins: usize,
    pub bot1_game_points: u64,
    pub bot2_game_points: u64,
}

impl PairStats {
    pub fn bot2_wins(&self) -> usize {
        self.games - self.bot1_wins
    }

    fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        if game.bot1_won {
            self.bot1_wins += 1;
            self.bot1_game_points += u64::from(game.game_points);
        } else {
            self.bot2_game_points += u64::from(game.game_points);
        }
    }
}

/// One finished game. `game_index` is 0 when bot1 led the first trick and 1
/// for the swapped replay of the same deal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub pair_index: usize,
    pub game_index: u8,
    pub deal_seed: u64,
    pub leader: String,
    pub follower: String,
    pub winner: GameWinner,
    pub game_points: u32,
    pub bot1_won: bool,
}

impl GameRecord {
    pub fn winner_name(&self) -> &str {
        match self.winner {
            GameWinner::Leader => &self.leader,
            GameWinner::Follower => &self.follower,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairRun {
    pub stats: PairStats,
    pub games: Vec<GameRecord>,
}

/// Plays `2 * pairs` games and counts how often `bot1` wins.
///
/// Both games of a pair use an RNG seeded identically, so the deal is the
/// same and only the roles are swapped. Engine failures abort the run.
pub fn play_games_and_return_stats<E: GamePlayEngine>(
    engine: &E,
    bot1: &mut dyn Bot,
    bot2: &mut dyn Bot,
    pairs: usize,
    options: &HarnessOptions,
) -> Result<PairStats, E::Error> {
    play_pairs(engine, bot1, bot2, pairs, options).map(|run| run.stats)
}

/// Like [`play_games_and_return_stats`] but keeps a record of every game.
pub fn play_pairs<E: GamePlayEngine>(
    engine: &E,
    bot1: &mut dyn Bot,
    bot2: &mut dyn Bot,
    pairs: usize,
    options: &HarnessOptions,
) -> Result<PairRun, E::Error> {
    let mut stats = PairStats {
        pairs,
        ..PairStats::default()
    };
    let mut games = Vec::with_capacity(pairs.saturating_mul(2));

    for pair_index in 0..pairs {
        let deal_seed = options.seed.wrapping_add(pair_index as u64);

        for game_index in 0..2u8 {
            let mut rng = StdRng::seed_from_u64(deal_seed);
            let bot1_leads = game_index == 0;
            let outcome = if bot1_leads {
                engine.play_game(&mut *bot1, &mut *bot2, &mut rng)?
            } else {
                engine.play_game(&mut *bot2, &mut *bot1, &mut rng)?
            };

            let (leader, follower) = if bot1_leads {
                (bot1.name(), bot2.name())
            } else {
                (bot2.name(), bot1.name())
            };
            let bot1_won = matches!(
                (bot1_leads, outcome.winner),
                (true, GameWinner::Leader) | (false, GameWinner::Follower)
            );
            let record = GameRecord {
                pair_index,
                game_index,
                deal_seed,
                leader: leader.to_string(),
                follower: follower.to_string(),
                winner: outcome.winner,
                game_points: outcome.game_points,
                bot1_won,
            };
            log_game(&record);
            stats.record(&record);
            games.push(record);
        }

        report_progress(pair_index, pairs, &stats, options);
    }

    Ok(PairRun { stats, games })
}

fn log_game(record: &GameRecord) {
    if !tracing::enabled!(target: "schnapsen_bench::game", Level::DEBUG) {
        return;
    }

    event!(
        target: "schnapsen_bench::game",
        Level::DEBUG,
        pair_index = record.pair_index as u64,
        game_index = record.game_index,
        deal_seed = record.deal_seed,
        leader = %record.leader,
        follower = %record.follower,
        winner = %record.winner_name(),
        game_points = record.game_points,
    );
}

fn report_progress(pair_index: usize, pairs: usize, stats: &PairStats, options: &HarnessOptions) {
    let played = pair_index + 1;
    if pair_index == 0 || played % options.progress_interval.max(1) != 0 {
        return;
    }

    event!(
        target: "schnapsen_bench::progress",
        Level::INFO,
        played = played as u64,
        pairs = pairs as u64,
        bot1_wins = stats.bot1_wins as u64,
    );
    if options.console_progress {
        println!("Progress: {played}/{pairs} game pairs played");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;
    use schnapsen_core::game::bot::GameOutcome;
    use schnapsen_core::game::perspective::PlayerPerspective;
    use schnapsen_core::model::moves::Move;
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::fmt;

    struct Named(&'static str);

    impl Bot for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn get_move(&mut self, perspective: &dyn PlayerPerspective, _: Option<&Move>) -> Move {
            perspective.valid_moves()[0]
        }
    }

    /// The leader always wins; records the first draw of every deal RNG.
    #[derive(Default)]
    struct LeaderWins {
        draws: RefCell<Vec<(String, u64)>>,
    }

    impl GamePlayEngine for LeaderWins {
        type Error = Infallible;

        fn play_game(
            &self,
            leader: &mut dyn Bot,
            _follower: &mut dyn Bot,
            rng: &mut StdRng,
        ) -> Result<GameOutcome, Infallible> {
            self.draws
                .borrow_mut()
                .push((leader.name().to_string(), rng.next_u64()));
            Ok(GameOutcome {
                winner: GameWinner::Leader,
                game_points: 2,
            })
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("engine broke")
        }
    }

    impl std::error::Error for Broken {}

    struct FailsOnThirdGame {
        played: RefCell<usize>,
    }

    impl GamePlayEngine for FailsOnThirdGame {
        type Error = Broken;

        fn play_game(
            &self,
            _leader: &mut dyn Bot,
            _follower: &mut dyn Bot,
            _rng: &mut StdRng,
        ) -> Result<GameOutcome, Broken> {
            let mut played = self.played.borrow_mut();
            *played += 1;
            if *played == 3 {
                return Err(Broken);
            }
            Ok(GameOutcome {
                winner: GameWinner::Follower,
                game_points: 1,
            })
        }
    }

    fn quiet() -> HarnessOptions {
        HarnessOptions {
            console_progress: false,
            ..HarnessOptions::default()
        }
    }

    #[test]
    fn swapping_roles_splits_wins_evenly_when_leader_always_wins() {
        let engine = LeaderWins::default();
        let stats = play_games_and_return_stats(
            &engine,
            &mut Named("one"),
            &mut Named("two"),
            5,
            &quiet(),
        )
        .expect("infallible");
        assert_eq!(stats.games, 10);
        assert_eq!(stats.bot1_wins, 5);
        assert_eq!(stats.bot2_wins(), 5);
        assert_eq!(stats.bot1_game_points, 10);
    }

    #[test]
    fn both_games_of_a_pair_share_the_deal() {
        let engine = LeaderWins::default();
        let options = HarnessOptions {
            seed: 40,
            ..quiet()
        };
        let run = play_pairs(&engine, &mut Named("one"), &mut Named("two"), 3, &options)
            .expect("infallible");
        let draws = engine.draws.into_inner();
        assert_eq!(draws.len(), 6);
        for pair in draws.chunks(2) {
            assert_eq!(pair[0].0, "one");
            assert_eq!(pair[1].0, "two");
            assert_eq!(pair[0].1, pair[1].1);
        }
        assert_ne!(draws[0].1, draws[2].1);
        let seeds: Vec<u64> = run.games.iter().map(|g| g.deal_seed).collect();
        assert_eq!(seeds, vec![40, 40, 41, 41, 42, 42]);
        assert_eq!(run.games[1].winner_name(), "two");
    }

    #[test]
    fn engine_error_aborts_the_run() {
        let engine = FailsOnThirdGame {
            played: RefCell::new(0),
        };
        let result =
            play_games_and_return_stats(&engine, &mut Named("a"), &mut Named("b"), 4, &quiet());
        assert!(result.is_err());
        assert_eq!(*engine.played.borrow(), 3);
    }

    #[test]
    fn zero_pairs_plays_nothing() {
        let engine = LeaderWins::default();
        let stats =
            play_games_and_return_stats(&engine, &mut Named("a"), &mut Named("b"), 0, &quiet())
                .expect("infallible");
        assert_eq!(stats, PairStats::default());
    }
}
