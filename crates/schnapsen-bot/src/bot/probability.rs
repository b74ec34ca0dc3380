use schnapsen_core::model::card::Card;

/// Number of unseen cards assumed to be in the opponent's hand.
pub const SAMPLE_SIZE: usize = 5;

/// Probability that a five-card draw from `unseen` contains none of `dangerous`.
pub fn safety_probability(unseen: &[Card], dangerous: &[Card]) -> f64 {
    safety_probability_from_counts(unseen.len(), dangerous.len())
}

/// Count form of [`safety_probability`]: the product of
/// `(u - d - k) / (u - k)` for `k` in `0..5`.
///
/// The sample size stays at five no matter how many cards the opponent
/// actually holds. Fewer than five unseen cards yields `0.0`.
pub fn safety_probability_from_counts(unseen: usize, dangerous: usize) -> f64 {
    if unseen < SAMPLE_SIZE {
        return 0.0;
    }

    let u = unseen as f64;
    let d = dangerous as f64;
    (0..SAMPLE_SIZE)
        .map(|k| {
            let k = k as f64;
            (u - d - k) / (u - k)
        })
        .product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use schnapsen_core::model::rank::Rank;
    use schnapsen_core::model::suit::Suit;

    #[test]
    fn fewer_than_five_unseen_is_zero() {
        for unseen in 0..SAMPLE_SIZE {
            for dangerous in 0..=unseen {
                assert_eq!(safety_probability_from_counts(unseen, dangerous), 0.0);
            }
        }
    }

    #[test]
    fn no_dangerous_cards_is_certain() {
        assert_eq!(safety_probability_from_counts(9, 0), 1.0);
        assert_eq!(safety_probability_from_counts(5, 0), 1.0);
    }

    #[test]
    fn matches_closed_form() {
        // 8/10 * 7/9 * 6/8 * 5/7 * 4/6
        let expected = (8.0 / 10.0) * (7.0 / 9.0) * (6.0 / 8.0) * (5.0 / 7.0) * (4.0 / 6.0);
        let actual = safety_probability_from_counts(10, 2);
        assert!((actual - expected).abs() < 1e-12);
        assert!((actual - 2.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn stays_in_unit_interval_and_is_monotone() {
        for unseen in SAMPLE_SIZE..=20 {
            let mut previous = f64::INFINITY;
            for dangerous in 0..=unseen {
                let p = safety_probability_from_counts(unseen, dangerous);
                assert!((0.0..=1.0).contains(&p), "u={unseen} d={dangerous} p={p}");
                assert!(p <= previous, "u={unseen} d={dangerous} not monotone");
                previous = p;
            }
        }
    }

    #[test]
    fn all_dangerous_in_small_pool_is_zero() {
        assert_eq!(safety_probability_from_counts(5, 1), 0.0);
        assert_eq!(safety_probability_from_counts(6, 2), 0.0);
    }

    #[test]
    fn card_slices_use_their_lengths() {
        let unseen: Vec<Card> = Rank::ORDERED
            .iter()
            .flat_map(|rank| [Card::new(*rank, Suit::Clubs), Card::new(*rank, Suit::Spades)])
            .collect();
        let dangerous = vec![Card::new(Rank::Ace, Suit::Clubs)];
        assert_eq!(
            safety_probability(&unseen, &dangerous),
            safety_probability_from_counts(10, 1)
        );
    }
}
