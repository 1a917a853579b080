pub mod commentary;
pub mod config;
pub mod core;
pub mod data;
pub mod driver;

pub use crate::commentary::{flavor_text, narrate_battle_start, narrate_turn, narrate_victory};
pub use crate::config::{EngineConfig, ImmuneDamage};
pub use crate::core::{
    battle::{advance_turn, initialize_battle, BattleEngine},
    damage::{compute_attack, AttackOutcome},
    error::{EngineError, Result},
    state::{BattleState, BattleStatus, PlaybackSpeed, Side, TurnLogEntry},
};
pub use crate::data::{
    roster::{BaseStats, Combatant, RarityTier, Roster, StatKind},
    type_chart::{DamageClass, Effectiveness, TypeChart},
};
pub use crate::driver::{
    batch::{run_to_completion, simulate_matchup, BattleResult, Decision, MatchupSummary},
    session::BattleSession,
};

#[cfg(target_arch = "wasm32")]
pub mod wasm;
