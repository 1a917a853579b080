pub mod battle;
pub mod damage;
pub mod error;
pub mod rng;
pub mod state;

pub use battle::{advance_turn, initialize_battle, BattleEngine};
pub use damage::{compute_attack, AttackOutcome};
pub use error::{EngineError, Result};
pub use state::{BattleState, BattleStatus, PlaybackSpeed, Side, TurnLogEntry};
