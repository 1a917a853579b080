pub mod batch;
pub mod session;

pub use batch::{run_to_completion, simulate_matchup, BattleResult, Decision, MatchupSummary};
pub use session::BattleSession;
