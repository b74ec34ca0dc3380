pub mod bot;
pub mod policy;

pub use bot::{
    BotVariant, DecisionContext, FollowerPlanner, FollowerPolicy, FollowerRule, LeaderPlanner,
    LeaderReason, Role, StrategyConfig, choose_follower_move, choose_leader_move, risk_factor,
    safety_probability,
};
pub use policy::{ProbabilityUtilityBot, TwoPhaseBot};
