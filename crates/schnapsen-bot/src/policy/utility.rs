use crate::bot::{
    BotVariant, DecisionContext, FollowerDecision, FollowerPlanner, FollowerPolicy,
    LeaderDecision, LeaderPlanner, Role, StrategyConfig,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use schnapsen_core::game::bot::Bot;
use schnapsen_core::game::perspective::PlayerPerspective;
use schnapsen_core::model::moves::Move;
use tracing::{Level, event};

/// Phase-one strategy: the leader maximises safety per point given away,
/// the follower either walks the rule ladder or plays at random.
pub struct ProbabilityUtilityBot {
    name: String,
    config: StrategyConfig,
    rng: StdRng,
}

impl ProbabilityUtilityBot {
    pub fn new(name: impl Into<String>, config: StrategyConfig, seed: u64) -> Self {
        Self {
            name: name.into(),
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_variant(variant: BotVariant, seed: u64) -> Self {
        Self::new(variant.as_str(), variant.config(), seed)
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    fn lead(&self, ctx: &DecisionContext<'_>) -> Move {
        let decision = LeaderPlanner::choose(ctx, &self.config);
        log_lead_decision(&self.name, ctx, &decision);
        decision.chosen
    }

    fn follow(&mut self, ctx: &DecisionContext<'_>, leader_move: &Move) -> Move {
        match self.config.follower {
            FollowerPolicy::Ladder => {
                let decision = FollowerPlanner::choose(ctx, leader_move);
                log_follow_decision(&self.name, ctx, leader_move, &decision);
                decision.chosen
            }
            FollowerPolicy::Random => {
                // DecisionContext guarantees a non-empty move list.
                let chosen = ctx
                    .valid_moves
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(ctx.valid_moves[0]);
                log_random_follow(&self.name, ctx, leader_move, chosen);
                chosen
            }
        }
    }
}

impl Bot for ProbabilityUtilityBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, perspective: &dyn PlayerPerspective, leader_move: Option<&Move>) -> Move {
        let ctx = DecisionContext::new(perspective);
        match Role::from(leader_move) {
            Role::Leader => self.lead(&ctx),
            Role::Follower(lead) => self.follow(&ctx, lead),
        }
    }
}

fn moves_preview(moves: &[Move]) -> String {
    if moves.len() <= 6 {
        moves
            .iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", moves.len())
    }
}

fn log_lead_decision(bot: &str, ctx: &DecisionContext<'_>, decision: &LeaderDecision) {
    if !tracing::enabled!(target: "schnapsen_bot::leader", Level::DEBUG) {
        return;
    }

    event!(
        target: "schnapsen_bot::leader",
        Level::DEBUG,
        bot,
        trump = %ctx.trump,
        valid_moves = %moves_preview(&ctx.valid_moves),
        candidates = decision.candidates,
        utility = decision.utility.unwrap_or(f64::NAN),
        chosen = %decision.chosen,
        reason = ?decision.reason,
    );
}

fn log_follow_decision(
    bot: &str,
    ctx: &DecisionContext<'_>,
    leader_move: &Move,
    decision: &FollowerDecision,
) {
    if !tracing::enabled!(target: "schnapsen_bot::follower", Level::DEBUG) {
        return;
    }

    event!(
        target: "schnapsen_bot::follower",
        Level::DEBUG,
        bot,
        trump = %ctx.trump,
        lead = %leader_move,
        valid_moves = %moves_preview(&ctx.valid_moves),
        chosen = %decision.chosen,
        rule = ?decision.rule,
    );
}

fn log_random_follow(bot: &str, ctx: &DecisionContext<'_>, leader_move: &Move, chosen: Move) {
    if !tracing::enabled!(target: "schnapsen_bot::follower", Level::DEBUG) {
        return;
    }

    event!(
        target: "schnapsen_bot::follower",
        Level::DEBUG,
        bot,
        lead = %leader_move,
        valid_count = ctx.valid_moves.len(),
        chosen = %chosen,
        rule = "random",
    );
}
