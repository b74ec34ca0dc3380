use crate::game::perspective::PlayerPerspective;
use crate::model::moves::Move;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// A player strategy. The engine calls `get_move` once per turn.
pub trait Bot {
    fn name(&self) -> &str;

    /// Choose a move. `leader_move` is `None` when this bot leads the trick.
    fn get_move(
        &mut self,
        perspective: &dyn PlayerPerspective,
        leader_move: Option<&Move>,
    ) -> Move;
}

impl<B: Bot + ?Sized> Bot for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get_move(
        &mut self,
        perspective: &dyn PlayerPerspective,
        leader_move: Option<&Move>,
    ) -> Move {
        (**self).get_move(perspective, leader_move)
    }
}

/// Which of the two bots handed to [`GamePlayEngine::play_game`] won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameWinner {
    Leader,
    Follower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: GameWinner,
    /// Game points awarded to the winner (1 to 3).
    pub game_points: u32,
}

/// A complete game implementation: dealing, legality, scoring and phases.
pub trait GamePlayEngine {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Play one game. `leader` leads the first trick. The RNG drives the deal.
    fn play_game(
        &self,
        leader: &mut dyn Bot,
        follower: &mut dyn Bot,
        rng: &mut StdRng,
    ) -> Result<GameOutcome, Self::Error>;
}
