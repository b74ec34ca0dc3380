mod follower;
mod leader;
mod probability;
mod risk;

pub use follower::{FollowerDecision, FollowerPlanner, FollowerRule};
pub use leader::{LeaderDecision, LeaderPlanner, LeaderReason};
pub use probability::{SAMPLE_SIZE, safety_probability, safety_probability_from_counts};
pub use risk::{risk_factor, risk_factor_for};

use core::fmt;
use core::str::FromStr;
use schnapsen_core::game::perspective::PlayerPerspective;
use schnapsen_core::model::card::Card;
use schnapsen_core::model::moves::Move;
use schnapsen_core::model::suit::Suit;

/// How the bot answers a trick led by the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowerPolicy {
    /// Fixed rule ladder, see [`FollowerPlanner`].
    Ladder,
    /// Uniform choice among the valid moves.
    Random,
}

/// Switches that distinguish the probability-utility bot family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyConfig {
    /// Lead any marriage or trump exchange immediately.
    pub short_circuit_marriages: bool,
    /// Drop known opponent cards from the unseen pool and judge danger by
    /// the known opponent cards alone.
    pub restrict_dangerous_to_known_opponent_cards: bool,
    /// Scale leader utilities by [`risk_factor`].
    pub apply_risk_factor: bool,
    pub follower: FollowerPolicy,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        BotVariant::Afro.config()
    }
}

/// Named members of the bot family. `A` delegates phase two to search,
/// `F` uses the follower ladder, `R` applies the risk factor and `O` uses
/// known opponent cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BotVariant {
    A,
    Af,
    Ar,
    Ao,
    Afr,
    Afo,
    Aro,
    Afro,
}

impl BotVariant {
    pub const ALL: [BotVariant; 8] = [
        BotVariant::A,
        BotVariant::Af,
        BotVariant::Ar,
        BotVariant::Ao,
        BotVariant::Afr,
        BotVariant::Afo,
        BotVariant::Aro,
        BotVariant::Afro,
    ];

    pub const fn config(self) -> StrategyConfig {
        let (follower, risk, opponent) = match self {
            BotVariant::A => (false, false, false),
            BotVariant::Af => (true, false, false),
            BotVariant::Ar => (false, true, false),
            BotVariant::Ao => (false, false, true),
            BotVariant::Afr => (true, true, false),
            BotVariant::Afo => (true, false, true),
            BotVariant::Aro => (false, true, true),
            BotVariant::Afro => (true, true, true),
        };
        StrategyConfig {
            short_circuit_marriages: opponent,
            restrict_dangerous_to_known_opponent_cards: opponent,
            apply_risk_factor: risk,
            follower: if follower {
                FollowerPolicy::Ladder
            } else {
                FollowerPolicy::Random
            },
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BotVariant::A => "PU_A",
            BotVariant::Af => "PU_AF",
            BotVariant::Ar => "PU_AR",
            BotVariant::Ao => "PU_AO",
            BotVariant::Afr => "PU_AFR",
            BotVariant::Afo => "PU_AFO",
            BotVariant::Aro => "PU_ARO",
            BotVariant::Afro => "PU_AFRO",
        }
    }
}

impl fmt::Display for BotVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BotVariant {
    type Err = String;

    /// Accepts `pu_afro`, `PU_AFRO` or the bare letters `afro`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let letters = normalized.strip_prefix("pu_").unwrap_or(&normalized);
        match letters {
            "a" => Ok(BotVariant::A),
            "af" => Ok(BotVariant::Af),
            "ar" => Ok(BotVariant::Ar),
            "ao" => Ok(BotVariant::Ao),
            "afr" => Ok(BotVariant::Afr),
            "afo" => Ok(BotVariant::Afo),
            "aro" => Ok(BotVariant::Aro),
            "afro" => Ok(BotVariant::Afro),
            _ => Err(format!("unknown bot variant '{s}'")),
        }
    }
}

/// Position of the bot within the current trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role<'a> {
    Leader,
    Follower(&'a Move),
}

impl<'a> From<Option<&'a Move>> for Role<'a> {
    fn from(leader_move: Option<&'a Move>) -> Self {
        match leader_move {
            Some(mv) => Role::Follower(mv),
            None => Role::Leader,
        }
    }
}

/// Per-decision view shared by the planners.
pub struct DecisionContext<'a> {
    pub perspective: &'a dyn PlayerPerspective,
    pub valid_moves: Vec<Move>,
    pub trump: Suit,
}

impl<'a> DecisionContext<'a> {
    /// Panics when the engine offers no valid move.
    pub fn new(perspective: &'a dyn PlayerPerspective) -> Self {
        let valid_moves = perspective.valid_moves();
        if valid_moves.is_empty() {
            panic!("probability-utility bot expected at least one valid move");
        }
        Self {
            perspective,
            valid_moves,
            trump: perspective.trump_suit(),
        }
    }

    pub fn points(&self, card: Card) -> u32 {
        self.perspective.trick_scorer().card_points(card)
    }

    pub fn is_trump(&self, card: Card) -> bool {
        card.suit == self.trump
    }
}

/// Leader move for `perspective`. Panics when there is no valid move.
pub fn choose_leader_move(perspective: &dyn PlayerPerspective, config: &StrategyConfig) -> Move {
    LeaderPlanner::choose(&DecisionContext::new(perspective), config).chosen
}

/// Ladder answer to `leader_move`. Panics when there is no valid move.
pub fn choose_follower_move(perspective: &dyn PlayerPerspective, leader_move: &Move) -> Move {
    FollowerPlanner::choose(&DecisionContext::new(perspective), leader_move).chosen
}
