mod dispatch;
mod utility;

pub use dispatch::TwoPhaseBot;
pub use utility::ProbabilityUtilityBot;
