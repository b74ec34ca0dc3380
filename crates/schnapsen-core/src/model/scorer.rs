use crate::model::card::Card;
use crate::model::rank::Rank;

/// Maps ranks to trick points. Supplied by the engine.
pub trait TrickScorer {
    fn rank_to_points(&self, rank: Rank) -> u32;

    fn card_points(&self, card: Card) -> u32 {
        self.rank_to_points(card.rank)
    }
}

/// Standard 20-card point table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchnapsenTrickScorer;

impl TrickScorer for SchnapsenTrickScorer {
    fn rank_to_points(&self, rank: Rank) -> u32 {
        match rank {
            Rank::Ace => 11,
            Rank::Ten => 10,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Jack => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SchnapsenTrickScorer, TrickScorer};
    use crate::model::rank::Rank;

    #[test]
    fn points_increase_with_rank() {
        let scorer = SchnapsenTrickScorer;
        let points: Vec<u32> = Rank::ORDERED
            .iter()
            .map(|rank| scorer.rank_to_points(*rank))
            .collect();
        assert_eq!(points, vec![2, 3, 4, 10, 11]);
    }

    #[test]
    fn deck_totals_one_hundred_twenty() {
        let scorer = SchnapsenTrickScorer;
        let per_suit: u32 = Rank::ORDERED.iter().map(|r| scorer.rank_to_points(*r)).sum();
        assert_eq!(per_suit * 4, 120);
    }
}
