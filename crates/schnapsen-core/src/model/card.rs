use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn is_trump(self, trump: Suit) -> bool {
        self.suit == trump
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCardError(pub String);

impl fmt::Display for ParseCardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid card '{}'", self.0)
    }
}

impl std::error::Error for ParseCardError {}

/// Parses the display form, e.g. `"QH"` or `"10C"`.
impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let mut chars = text.chars();
        let suit_symbol = chars
            .next_back()
            .ok_or_else(|| ParseCardError(s.to_string()))?;
        let suit = Suit::from_symbol(suit_symbol).ok_or_else(|| ParseCardError(s.to_string()))?;
        let rank = Rank::from_symbol(chars.as_str()).ok_or_else(|| ParseCardError(s.to_string()))?;
        Ok(Card::new(rank, suit))
    }
}
