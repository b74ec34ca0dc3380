use super::probability::safety_probability;
use super::risk::risk_factor_for;
use super::{DecisionContext, StrategyConfig};
use schnapsen_core::model::card::Card;
use schnapsen_core::model::moves::Move;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderReason {
    /// A marriage or trump exchange was available and taken at once.
    ShortCircuit,
    MaxUtility,
    /// No regular move was scored; the first valid move was played.
    FallbackFirst,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderDecision {
    pub chosen: Move,
    pub reason: LeaderReason,
    pub utility: Option<f64>,
    pub candidates: usize,
}

/// Picks the lead with the best ratio of "opponent cannot beat it" to
/// points given away.
pub struct LeaderPlanner;

impl LeaderPlanner {
    pub fn choose(ctx: &DecisionContext<'_>, config: &StrategyConfig) -> LeaderDecision {
        if config.short_circuit_marriages {
            if let Some(mv) = ctx
                .valid_moves
                .iter()
                .find(|mv| mv.is_marriage() || mv.is_trump_exchange())
            {
                return LeaderDecision {
                    chosen: *mv,
                    reason: LeaderReason::ShortCircuit,
                    utility: None,
                    candidates: 0,
                };
            }
        }

        let known_opponent = ctx.perspective.known_cards_of_opponent_hand();
        let unseen = unseen_cards(ctx, config, &known_opponent);
        let risk = config
            .apply_risk_factor
            .then(|| risk_factor_for(ctx.perspective));

        let mut max_utility = f64::NEG_INFINITY;
        let mut chosen: Option<Move> = None;
        let mut candidates = 0usize;

        for mv in &ctx.valid_moves {
            // Marriages and exchanges are never scored; with short-circuiting
            // enabled they have already been returned above.
            if mv.is_marriage() || mv.is_trump_exchange() {
                continue;
            }
            candidates += 1;

            let utility = move_utility(ctx, config, mv.card(), &unseen, &known_opponent, risk);
            if utility > max_utility {
                max_utility = utility;
                chosen = Some(*mv);
            }
        }

        match chosen {
            Some(mv) => LeaderDecision {
                chosen: mv,
                reason: LeaderReason::MaxUtility,
                utility: Some(max_utility),
                candidates,
            },
            None => LeaderDecision {
                chosen: ctx.valid_moves[0],
                reason: LeaderReason::FallbackFirst,
                utility: None,
                candidates,
            },
        }
    }
}

/// Cards from the initial deck this player has not seen. With the
/// known-opponent restriction, cards known to be in the opponent's hand
/// are excluded as well.
pub(crate) fn unseen_cards(
    ctx: &DecisionContext<'_>,
    config: &StrategyConfig,
    known_opponent: &HashSet<Card>,
) -> Vec<Card> {
    let seen = ctx.perspective.seen_cards(None);
    ctx.perspective
        .deck_generator()
        .initial_deck()
        .into_iter()
        .filter(|card| !seen.contains(card))
        .filter(|card| {
            !config.restrict_dangerous_to_known_opponent_cards || !known_opponent.contains(card)
        })
        .collect()
}

/// Cards in `pool` of the same suit as `card` and worth strictly more.
pub(crate) fn dangerous_cards<'p>(
    ctx: &DecisionContext<'_>,
    card: Card,
    pool: impl IntoIterator<Item = &'p Card>,
) -> Vec<Card> {
    let points = ctx.points(card);
    pool.into_iter()
        .copied()
        .filter(|other| other.suit == card.suit && ctx.points(*other) > points)
        .collect()
}

pub(crate) fn move_utility(
    ctx: &DecisionContext<'_>,
    config: &StrategyConfig,
    card: Card,
    unseen: &[Card],
    known_opponent: &HashSet<Card>,
    risk: Option<f64>,
) -> f64 {
    let mut dangerous = dangerous_cards(ctx, card, unseen);
    if config.restrict_dangerous_to_known_opponent_cards {
        // Replaces the unseen-based set instead of extending it.
        dangerous = dangerous_cards(ctx, card, known_opponent);
    }

    let probability = safety_probability(unseen, &dangerous);
    let utility = probability / f64::from(ctx.points(card));
    match risk {
        Some(factor) => utility * factor,
        None => utility,
    }
}
