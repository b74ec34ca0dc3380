use super::ProbabilityUtilityBot;
use crate::bot::BotVariant;
use schnapsen_core::game::bot::Bot;
use schnapsen_core::game::perspective::PlayerPerspective;
use schnapsen_core::model::moves::Move;
use schnapsen_core::model::phase::GamePhase;
use tracing::{Level, event};

/// Plays phase one with a [`ProbabilityUtilityBot`] and hands every
/// phase-two decision to the search bot `S` unchanged.
pub struct TwoPhaseBot<S: Bot> {
    name: String,
    phase_one: ProbabilityUtilityBot,
    phase_two: S,
}

impl<S: Bot> TwoPhaseBot<S> {
    pub fn new(name: impl Into<String>, phase_one: ProbabilityUtilityBot, phase_two: S) -> Self {
        Self {
            name: name.into(),
            phase_one,
            phase_two,
        }
    }

    pub fn from_variant(variant: BotVariant, seed: u64, search: S) -> Self {
        Self::new(
            variant.as_str(),
            ProbabilityUtilityBot::from_variant(variant, seed),
            search,
        )
    }

    pub fn phase_one(&self) -> &ProbabilityUtilityBot {
        &self.phase_one
    }

    pub fn phase_two(&self) -> &S {
        &self.phase_two
    }
}

impl<S: Bot> Bot for TwoPhaseBot<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, perspective: &dyn PlayerPerspective, leader_move: Option<&Move>) -> Move {
        let phase = perspective.phase();
        if tracing::enabled!(target: "schnapsen_bot::dispatch", Level::TRACE) {
            event!(
                target: "schnapsen_bot::dispatch",
                Level::TRACE,
                bot = %self.name,
                phase = %phase,
                leading = leader_move.is_none(),
            );
        }

        match phase {
            GamePhase::One => self.phase_one.get_move(perspective, leader_move),
            GamePhase::Two => self.phase_two.get_move(perspective, leader_move),
            other => panic!("invalid game phase: {other:?}"),
        }
    }
}
