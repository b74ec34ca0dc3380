use schnapsen_core::game::perspective::PlayerPerspective;

/// Score at which a player is considered close to winning.
const NEAR_WIN: u32 = 50;

/// Multiplier applied to leader utilities based on the score situation.
///
/// Totals include pending points. Being behind raises the factor, being
/// ahead lowers it, and either side nearing 66 sharpens both effects.
pub fn risk_factor(my_total: u32, opponent_total: u32) -> f64 {
    let difference = i64::from(my_total) - i64::from(opponent_total);

    if opponent_total >= NEAR_WIN {
        if difference <= -20 { 1.8 } else { 1.3 }
    } else if my_total >= NEAR_WIN {
        if difference >= 20 { 0.5 } else { 0.8 }
    } else if difference >= 20 {
        0.7
    } else if difference >= 10 {
        0.85
    } else if difference <= -20 {
        1.5
    } else if difference <= -10 {
        1.25
    } else {
        1.0
    }
}

pub fn risk_factor_for(perspective: &dyn PlayerPerspective) -> f64 {
    risk_factor(
        perspective.my_score().total(),
        perspective.opponent_score().total(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use schnapsen_core::game::snapshot::PerspectiveSnapshot;
    use schnapsen_core::model::phase::GamePhase;
    use schnapsen_core::model::score::Score;
    use schnapsen_core::model::suit::Suit;

    #[test]
    fn opponent_near_win_and_far_ahead() {
        assert_eq!(risk_factor(30, 50), 1.8);
        assert_eq!(risk_factor(10, 64), 1.8);
    }

    #[test]
    fn opponent_near_win_close_game() {
        assert_eq!(risk_factor(31, 50), 1.3);
        assert_eq!(risk_factor(55, 52), 1.3);
    }

    #[test]
    fn self_near_win() {
        assert_eq!(risk_factor(60, 40), 0.5);
        assert_eq!(risk_factor(50, 31), 0.8);
    }

    #[test]
    fn mid_game_ladder() {
        assert_eq!(risk_factor(40, 20), 0.7);
        assert_eq!(risk_factor(30, 20), 0.85);
        assert_eq!(risk_factor(29, 20), 1.0);
        assert_eq!(risk_factor(20, 40), 1.5);
        assert_eq!(risk_factor(20, 30), 1.25);
        assert_eq!(risk_factor(20, 29), 1.0);
    }

    #[test]
    fn balanced_mid_game_is_neutral() {
        assert_eq!(risk_factor(24, 24), 1.0);
        assert_eq!(risk_factor(0, 0), 1.0);
    }

    #[test]
    fn perspective_totals_include_pending_points() {
        let snapshot = PerspectiveSnapshot::new(GamePhase::One, Suit::Hearts)
            .with_scores(Score::new(10, 0), Score::new(30, 20));
        assert_eq!(risk_factor_for(&snapshot), 1.8);
    }
}
