use core::fmt;
use serde::{Deserialize, Serialize};

/// Stage of a Schnapsen game: before and after the talon runs out or is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum GamePhase {
    One,
    Two,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::One => f.write_str("one"),
            GamePhase::Two => f.write_str("two"),
        }
    }
}
