pub mod card;
pub mod deck;
pub mod moves;
pub mod phase;
pub mod rank;
pub mod score;
pub mod scorer;
pub mod suit;
