use crate::game::perspective::PlayerPerspective;
use crate::model::card::Card;
use crate::model::deck::{DeckGenerator, SchnapsenDeckGenerator};
use crate::model::moves::Move;
use crate::model::phase::GamePhase;
use crate::model::score::Score;
use crate::model::scorer::{SchnapsenTrickScorer, TrickScorer};
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Owned per-turn perspective using the standard deck and point table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveSnapshot {
    pub phase: GamePhase,
    pub trump_suit: Suit,
    pub valid_moves: Vec<Move>,
    /// Includes the player's own hand.
    pub seen_cards: Vec<Card>,
    #[serde(default)]
    pub known_opponent_cards: Vec<Card>,
    #[serde(default)]
    pub my_score: Score,
    #[serde(default)]
    pub opponent_score: Score,
}

impl PerspectiveSnapshot {
    pub fn new(phase: GamePhase, trump_suit: Suit) -> Self {
        Self {
            phase,
            trump_suit,
            valid_moves: Vec::new(),
            seen_cards: Vec::new(),
            known_opponent_cards: Vec::new(),
            my_score: Score::default(),
            opponent_score: Score::default(),
        }
    }

    pub fn with_valid_moves(mut self, moves: Vec<Move>) -> Self {
        self.valid_moves = moves;
        self
    }

    pub fn with_seen_cards(mut self, cards: Vec<Card>) -> Self {
        self.seen_cards = cards;
        self
    }

    pub fn with_known_opponent_cards(mut self, cards: Vec<Card>) -> Self {
        self.known_opponent_cards = cards;
        self
    }

    pub fn with_scores(mut self, mine: Score, opponent: Score) -> Self {
        self.my_score = mine;
        self.opponent_score = opponent;
        self
    }

    /// Capture any perspective as an owned snapshot.
    pub fn capture(perspective: &dyn PlayerPerspective) -> Self {
        let mut seen_cards: Vec<Card> = perspective.seen_cards(None).into_iter().collect();
        seen_cards.sort_by_key(|card| (card.suit, card.rank));
        let mut known_opponent_cards: Vec<Card> = perspective
            .known_cards_of_opponent_hand()
            .into_iter()
            .collect();
        known_opponent_cards.sort_by_key(|card| (card.suit, card.rank));
        Self {
            phase: perspective.phase(),
            trump_suit: perspective.trump_suit(),
            valid_moves: perspective.valid_moves(),
            seen_cards,
            known_opponent_cards,
            my_score: perspective.my_score(),
            opponent_score: perspective.opponent_score(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl PlayerPerspective for PerspectiveSnapshot {
    fn valid_moves(&self) -> Vec<Move> {
        self.valid_moves.clone()
    }

    fn seen_cards(&self, leader_move: Option<&Move>) -> HashSet<Card> {
        let mut seen: HashSet<Card> = self.seen_cards.iter().copied().collect();
        if let Some(mv) = leader_move {
            seen.extend(mv.cards());
        }
        seen
    }

    fn known_cards_of_opponent_hand(&self) -> HashSet<Card> {
        self.known_opponent_cards.iter().copied().collect()
    }

    fn trump_suit(&self) -> Suit {
        self.trump_suit
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn my_score(&self) -> Score {
        self.my_score
    }

    fn opponent_score(&self) -> Score {
        self.opponent_score
    }

    fn trick_scorer(&self) -> &dyn TrickScorer {
        &SchnapsenTrickScorer
    }

    fn deck_generator(&self) -> &dyn DeckGenerator {
        &SchnapsenDeckGenerator
    }
}
