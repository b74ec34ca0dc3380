use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Hearts = 0,
    Clubs = 1,
    Spades = 2,
    Diamonds = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Clubs, Suit::Spades, Suit::Diamonds];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Hearts),
            1 => Some(Suit::Clubs),
            2 => Some(Suit::Spades),
            3 => Some(Suit::Diamonds),
            _ => None,
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'H' | 'h' => Some(Suit::Hearts),
            'C' | 'c' => Some(Suit::Clubs),
            'S' | 's' => Some(Suit::Spades),
            'D' | 'd' => Some(Suit::Diamonds),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Hearts => "H",
            Suit::Clubs => "C",
            Suit::Spades => "S",
            Suit::Diamonds => "D",
        };
        f.write_str(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::Suit;

    #[test]
    fn display_returns_ascii_symbols() {
        assert_eq!(Suit::Clubs.to_string(), "C");
        assert_eq!(Suit::Diamonds.to_string(), "D");
    }

    #[test]
    fn from_index_maps_valid_values() {
        assert_eq!(Suit::from_index(2), Some(Suit::Spades));
        assert_eq!(Suit::from_index(4), None);
    }

    #[test]
    fn from_symbol_accepts_either_case() {
        assert_eq!(Suit::from_symbol('h'), Some(Suit::Hearts));
        assert_eq!(Suit::from_symbol('D'), Some(Suit::Diamonds));
        assert_eq!(Suit::from_symbol('x'), None);
    }
}
