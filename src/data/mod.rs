pub mod roster;
pub mod type_chart;

pub use roster::{BaseStats, Combatant, RarityTier, Roster, StatKind};
pub use type_chart::{AttackChoice, DamageClass, Effectiveness, TypeChart};
