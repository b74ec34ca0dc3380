use crate::model::card::Card;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A move offered by the engine for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Move {
    Regular { card: Card },
    /// King and queen of one suit; the queen is the card actually played.
    Marriage { queen: Card, king: Card },
    TrumpExchange { jack: Card },
}

impl Move {
    pub const fn regular(card: Card) -> Self {
        Move::Regular { card }
    }

    pub const fn marriage(queen: Card, king: Card) -> Self {
        Move::Marriage { queen, king }
    }

    pub const fn trump_exchange(jack: Card) -> Self {
        Move::TrumpExchange { jack }
    }

    pub const fn is_marriage(&self) -> bool {
        matches!(self, Move::Marriage { .. })
    }

    pub const fn is_trump_exchange(&self) -> bool {
        matches!(self, Move::TrumpExchange { .. })
    }

    /// The effective card of the move.
    pub const fn card(&self) -> Card {
        match *self {
            Move::Regular { card } => card,
            Move::Marriage { queen, .. } => queen,
            Move::TrumpExchange { jack } => jack,
        }
    }

    /// All cards involved. For a marriage the effective card comes second.
    pub fn cards(&self) -> Vec<Card> {
        match *self {
            Move::Regular { card } => vec![card],
            Move::Marriage { queen, king } => vec![king, queen],
            Move::TrumpExchange { jack } => vec![jack],
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Regular { card } => write!(f, "{card}"),
            Move::Marriage { queen, king } => write!(f, "marriage({king}+{queen})"),
            Move::TrumpExchange { jack } => write!(f, "exchange({jack})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn marriage_plays_the_queen() {
        let queen = Card::new(Rank::Queen, Suit::Spades);
        let king = Card::new(Rank::King, Suit::Spades);
        let marriage = Move::marriage(queen, king);
        assert!(marriage.is_marriage());
        assert_eq!(marriage.card(), queen);
        assert_eq!(marriage.cards()[1], queen);
    }

    #[test]
    fn exchange_plays_the_jack() {
        let jack = Card::new(Rank::Jack, Suit::Hearts);
        let exchange = Move::trump_exchange(jack);
        assert!(exchange.is_trump_exchange());
        assert!(!exchange.is_marriage());
        assert_eq!(exchange.card(), jack);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let mv = Move::regular(Card::new(Rank::Ace, Suit::Clubs));
        let json = serde_json::to_string(&mv).unwrap();
        assert!(json.contains("\"kind\":\"regular\""));
    }
}
