use core::fmt;
use serde::{Deserialize, Serialize};

/// The five Schnapsen ranks, ordered by trick-taking strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Jack = 0,
    Queen = 1,
    King = 2,
    Ten = 3,
    Ace = 4,
}

impl Rank {
    pub const ORDERED: [Rank; 5] = [Rank::Jack, Rank::Queen, Rank::King, Rank::Ten, Rank::Ace];

    pub const fn is_face(self) -> bool {
        matches!(self, Rank::Queen | Rank::King)
    }

    pub fn from_symbol(text: &str) -> Option<Self> {
        match text {
            "J" | "j" => Some(Rank::Jack),
            "Q" | "q" => Some(Rank::Queen),
            "K" | "k" => Some(Rank::King),
            "10" | "T" | "t" => Some(Rank::Ten),
            "A" | "a" => Some(Rank::Ace),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ten => "10",
            Rank::Ace => "A",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::Rank;

    #[test]
    fn ordering_follows_trick_strength() {
        assert!(Rank::Ten > Rank::King);
        assert!(Rank::Ace > Rank::Ten);
        assert!(Rank::Jack < Rank::Queen);
    }

    #[test]
    fn display_matches_symbols() {
        assert_eq!(Rank::Queen.to_string(), "Q");
        assert_eq!(Rank::Ten.to_string(), "10");
    }

    #[test]
    fn from_symbol_accepts_ten_aliases() {
        assert_eq!(Rank::from_symbol("10"), Some(Rank::Ten));
        assert_eq!(Rank::from_symbol("T"), Some(Rank::Ten));
        assert_eq!(Rank::from_symbol("9"), None);
    }
}
