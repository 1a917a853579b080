use crate::config::EngineConfig;
use crate::core::damage::{compute_attack, AttackOutcome};
use crate::core::error::{EngineError, Result};
use crate::core::state::{BattleState, BattleStatus, PlaybackSpeed, Side, TurnLogEntry};
use crate::data::roster::{Combatant, StatKind};
use crate::data::type_chart::TypeChart;
use tracing::{debug, info, trace, warn};

#[derive(Clone, Debug, Default)]
pub struct BattleEngine {
    pub type_chart: TypeChart,
    pub config: EngineConfig,
}

impl BattleEngine {
    pub fn new(type_chart: TypeChart, config: EngineConfig) -> Self {
        Self { type_chart, config }
    }

    pub fn battle_hp(&self, combatant: &Combatant) -> Result<u32> {
        let scale = self.config.hp_scale.max(1);
        combatant
            .stat(StatKind::Hp)
            .checked_mul(scale)
            .ok_or_else(|| EngineError::InvalidSetting {
                key: "hp_scale",
                value: scale.to_string(),
            })
    }

    // Raw speeds: a 0 speed still loses to 1.
    pub fn first_attacker(&self, one: &Combatant, two: &Combatant, rng: &mut dyn FnMut() -> f64) -> Side {
        let speed_one = one.stats.speed;
        let speed_two = two.stats.speed;
        if speed_one > speed_two {
            Side::One
        } else if speed_two > speed_one {
            Side::Two
        } else if rng() < 0.5 {
            Side::One
        } else {
            Side::Two
        }
    }

    pub fn compute_attack(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<AttackOutcome> {
        compute_attack(&self.type_chart, &self.config, attacker, defender, rng)
    }

    pub fn initialize(&self, one: &Combatant, two: &Combatant, rng: &mut dyn FnMut() -> f64) -> Result<BattleState> {
        one.validate()?;
        two.validate()?;

        let max_hp = [self.battle_hp(one)?, self.battle_hp(two)?];
        let current_attacker = self.first_attacker(one, two, rng);
        debug!(
            one = %one.name,
            two = %two.name,
            hp_one = max_hp[0],
            hp_two = max_hp[1],
            first = ?current_attacker,
            "battle initialized"
        );

        Ok(BattleState {
            status: BattleStatus::Idle,
            current_turn: 1,
            hp: max_hp,
            max_hp,
            log: Vec::new(),
            winner: None,
            speed: PlaybackSpeed::default(),
            current_attacker,
        })
    }

    pub fn reset(&self, one: &Combatant, two: &Combatant, rng: &mut dyn FnMut() -> f64) -> Result<BattleState> {
        self.initialize(one, two, rng)
    }

    pub fn advance_turn(
        &self,
        state: &BattleState,
        one: &Combatant,
        two: &Combatant,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<BattleState> {
        if state.status != BattleStatus::Fighting {
            return Ok(state.clone());
        }

        let actor = state.current_attacker;
        let target = actor.opponent();
        let attacker = actor.pick(one, two);
        let defender = target.pick(one, two);

        if state.hp(actor) == 0 {
            warn!(attacker = %attacker.name, turn = state.current_turn, "acting side already fainted");
            return Ok(state.finish(target));
        }

        let outcome = self.compute_attack(attacker, defender, rng)?;
        let defender_hp = state.hp(target).saturating_sub(outcome.damage);

        let mut next = state.clone();
        next.hp[target.index()] = defender_hp;
        next.log.push(TurnLogEntry {
            turn: state.current_turn,
            attacker: attacker.name.clone(),
            defender: defender.name.clone(),
            attacker_side: actor,
            attack_type: outcome.attack_type,
            damage: outcome.damage,
            effectiveness: outcome.effectiveness,
            is_critical: outcome.is_critical,
            attacker_hp: state.hp(actor),
            defender_hp,
        });
        next.current_turn += 1;
        next.current_attacker = target;
        trace!(
            turn = state.current_turn,
            attacker = %attacker.name,
            damage = outcome.damage,
            defender_hp,
            "turn processed"
        );

        if defender_hp == 0 {
            info!(winner = %attacker.name, turns = state.current_turn, "battle finished by knockout");
            next.status = BattleStatus::Finished;
            next.winner = Some(actor);
        }
        Ok(next)
    }
}

pub fn initialize_battle(one: &Combatant, two: &Combatant, rng: &mut dyn FnMut() -> f64) -> Result<BattleState> {
    BattleEngine::default().initialize(one, two, rng)
}

pub fn advance_turn(
    state: &BattleState,
    one: &Combatant,
    two: &Combatant,
    rng: &mut dyn FnMut() -> f64,
) -> Result<BattleState> {
    BattleEngine::default().advance_turn(state, one, two, rng)
}
