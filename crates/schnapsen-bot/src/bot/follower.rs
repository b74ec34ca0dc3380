use super::DecisionContext;
use schnapsen_core::model::moves::Move;
use schnapsen_core::model::rank::Rank;

/// Rung of the follower ladder that produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowerRule {
    DiscardJack,
    DiscardFace,
    OvertrumpTrump,
    WinSameSuit,
    LowestTrump,
    LowestNonTrump,
    /// Only trumps left in hand.
    LowestAny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowerDecision {
    pub chosen: Move,
    pub rule: FollowerRule,
}

/// Answers a lead: give away little against trump leads, win cheaply
/// against plain leads, and ruff high cards.
pub struct FollowerPlanner;

impl FollowerPlanner {
    pub fn choose(ctx: &DecisionContext<'_>, leader_move: &Move) -> FollowerDecision {
        let led = leader_move.card();
        let led_points = ctx.points(led);
        let trumps: Vec<&Move> = ctx
            .valid_moves
            .iter()
            .filter(|mv| ctx.is_trump(mv.card()))
            .collect();

        if ctx.is_trump(led) {
            if let Some(mv) = first_off_suit(ctx, |rank| rank == Rank::Jack) {
                return decision(*mv, FollowerRule::DiscardJack);
            }
            if let Some(mv) = first_off_suit(ctx, Rank::is_face) {
                return decision(*mv, FollowerRule::DiscardFace);
            }
            if let Some(mv) = trumps
                .iter()
                .find(|mv| ctx.points(mv.card()) > led_points)
            {
                return decision(**mv, FollowerRule::OvertrumpTrump);
            }
            return shed_lowest(ctx);
        }

        if let Some(mv) = ctx
            .valid_moves
            .iter()
            .filter(|mv| mv.card().suit == led.suit && ctx.points(mv.card()) > led_points)
            .min_by_key(|mv| ctx.points(mv.card()))
        {
            return decision(*mv, FollowerRule::WinSameSuit);
        }

        if matches!(led.rank, Rank::Ace | Rank::Ten) {
            if let Some(mv) = trumps.iter().min_by_key(|mv| ctx.points(mv.card())) {
                return decision(**mv, FollowerRule::LowestTrump);
            }
        }

        shed_lowest(ctx)
    }
}

fn first_off_suit<'c>(
    ctx: &'c DecisionContext<'_>,
    rank_matches: impl Fn(Rank) -> bool,
) -> Option<&'c Move> {
    ctx.valid_moves
        .iter()
        .find(|mv| rank_matches(mv.card().rank) && !ctx.is_trump(mv.card()))
}

fn decision(chosen: Move, rule: FollowerRule) -> FollowerDecision {
    FollowerDecision { chosen, rule }
}

/// Cheapest non-trump; if the hand holds only trumps, the cheapest card.
fn shed_lowest(ctx: &DecisionContext<'_>) -> FollowerDecision {
    let lowest_non_trump = ctx
        .valid_moves
        .iter()
        .filter(|mv| !ctx.is_trump(mv.card()))
        .min_by_key(|mv| ctx.points(mv.card()));
    match lowest_non_trump {
        Some(mv) => decision(*mv, FollowerRule::LowestNonTrump),
        None => {
            let lowest = ctx
                .valid_moves
                .iter()
                .min_by_key(|mv| ctx.points(mv.card()))
                .copied()
                .unwrap_or(ctx.valid_moves[0]);
            decision(lowest, FollowerRule::LowestAny)
        }
    }
}
