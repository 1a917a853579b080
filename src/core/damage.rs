use crate::config::{EngineConfig, ImmuneDamage};
use crate::core::error::{EngineError, Result};
use crate::data::roster::{Combatant, StatKind};
use crate::data::type_chart::{DamageClass, Effectiveness, TypeChart};
use serde::{Deserialize, Serialize};

/// Result of a single attack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub damage: u32,
    pub attack_type: String,
    pub multiplier: f32,
    pub effectiveness: Effectiveness,
    pub is_critical: bool,
}

/// `((2 * level / 5 + 2) * power * offense / defense) / 50 + 2`, before any modifier.
pub fn base_damage(config: &EngineConfig, offense: u32, defense: u32) -> f64 {
    let level = config.level as f64;
    let power = config.base_power as f64;
    let defense = defense.max(1) as f64;
    ((2.0 * level / 5.0 + 2.0) * power * offense as f64 / defense) / 50.0 + 2.0
}

/// Computes one attack from `attacker` against `defender`.
///
/// Draws twice from `rng`: the critical roll, then the damage roll.
pub fn compute_attack(
    chart: &TypeChart,
    config: &EngineConfig,
    attacker: &Combatant,
    defender: &Combatant,
    rng: &mut dyn FnMut() -> f64,
) -> Result<AttackOutcome> {
    if defender.types.is_empty() {
        return Err(EngineError::MissingTypes {
            name: defender.name.clone(),
        });
    }
    let choice = chart
        .best_attack_type(&attacker.types, &defender.types)
        .ok_or_else(|| EngineError::MissingTypes {
            name: attacker.name.clone(),
        })?;

    let (offense, defense) = match chart.damage_class(&choice.attack_type) {
        DamageClass::Physical => (attacker.stat(StatKind::Attack), defender.stat(StatKind::Defense)),
        DamageClass::Special => (
            attacker.stat(StatKind::SpecialAttack),
            defender.stat(StatKind::SpecialDefense),
        ),
    };

    let is_critical = rng() < config.critical_chance;
    let critical_multiplier = if is_critical { config.critical_multiplier } else { 1.0 };
    let roll = config.variance_floor + (1.0 - config.variance_floor) * rng();

    let base = base_damage(config, offense, defense);
    let raw = (base * choice.multiplier as f64 * critical_multiplier * roll).floor() as u32;
    let damage = if choice.multiplier == 0.0 && config.immune_damage == ImmuneDamage::Zero {
        0
    } else {
        raw.max(1)
    };

    Ok(AttackOutcome {
        damage,
        effectiveness: Effectiveness::from_multiplier(choice.multiplier),
        attack_type: choice.attack_type,
        multiplier: choice.multiplier,
        is_critical,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_damage_at_even_stats() {
        let config = EngineConfig::default();
        assert_eq!(base_damage(&config, 100, 100), 24.0);
        assert_eq!(base_damage(&config, 200, 100), 46.0);
    }

    #[test]
    fn zero_defense_does_not_divide_by_zero() {
        let config = EngineConfig::default();
        assert!(base_damage(&config, 50, 0).is_finite());
    }
}
