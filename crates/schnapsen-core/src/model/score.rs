use serde::{Deserialize, Serialize};

/// Score state of one player. Pending points come from marriages declared
/// before the player has won a trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub direct_points: u32,
    #[serde(default)]
    pub pending_points: u32,
}

impl Score {
    pub const fn new(direct_points: u32, pending_points: u32) -> Self {
        Self {
            direct_points,
            pending_points,
        }
    }

    pub const fn total(&self) -> u32 {
        self.direct_points + self.pending_points
    }
}
