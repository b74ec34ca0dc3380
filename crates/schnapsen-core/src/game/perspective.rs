use crate::model::card::Card;
use crate::model::deck::DeckGenerator;
use crate::model::moves::Move;
use crate::model::phase::GamePhase;
use crate::model::score::Score;
use crate::model::scorer::TrickScorer;
use crate::model::suit::Suit;
use std::collections::HashSet;

/// Read-only view of the game for the player about to move.
///
/// Implemented by the engine and handed to a [`Bot`](crate::game::bot::Bot)
/// once per decision. Nothing in it outlives the call.
pub trait PlayerPerspective {
    /// Moves the player may legally make right now. Never empty during play.
    fn valid_moves(&self) -> Vec<Move>;

    /// Every card this player has seen so far, including their own hand.
    /// When `leader_move` is given its cards count as seen too.
    fn seen_cards(&self, leader_move: Option<&Move>) -> HashSet<Card>;

    /// Cards known to sit in the opponent's hand (e.g. revealed by a marriage).
    fn known_cards_of_opponent_hand(&self) -> HashSet<Card>;

    fn trump_suit(&self) -> Suit;

    fn phase(&self) -> GamePhase;

    fn my_score(&self) -> Score;

    fn opponent_score(&self) -> Score;

    fn trick_scorer(&self) -> &dyn TrickScorer;

    fn deck_generator(&self) -> &dyn DeckGenerator;
}
