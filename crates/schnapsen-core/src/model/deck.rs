use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;

/// Source of the full card set a game starts from. Supplied by the engine.
pub trait DeckGenerator {
    fn initial_deck(&self) -> Vec<Card>;
}

/// The 20-card Schnapsen deck in suit-major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchnapsenDeckGenerator;

impl DeckGenerator for SchnapsenDeckGenerator {
    fn initial_deck(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(20);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        cards
    }
}
