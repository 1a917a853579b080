use crate::commentary::{narrate_battle_start, narrate_turn, narrate_victory};
use crate::core::battle::BattleEngine;
use crate::core::state::{BattleState, BattleStatus, PlaybackSpeed, Side, TurnLogEntry};
use crate::data::roster::Combatant;
use crate::data::type_chart::Effectiveness;
use crate::driver::batch::{run_to_completion, BattleResult, Decision};
use js_sys::Math;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

static ENGINE: Lazy<BattleEngine> = Lazy::new(BattleEngine::default);

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TurnLogEntryWire {
    turn: u32,
    attacker: String,
    defender: String,
    attacker_side: u8,
    attack_type: String,
    damage: u32,
    effectiveness: Effectiveness,
    is_critical: bool,
    attacker_hp: u32,
    defender_hp: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BattleStateWire {
    status: BattleStatus,
    current_turn: u32,
    hp1: u32,
    hp2: u32,
    max_hp1: u32,
    max_hp2: u32,
    #[serde(default)]
    log: Vec<TurnLogEntryWire>,
    winner: Option<u8>,
    #[serde(default)]
    speed: PlaybackSpeed,
    current_attacker: u8,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DamageTotalsWire {
    pokemon1: u32,
    pokemon2: u32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BattleResultWire {
    winner: String,
    loser: String,
    total_turns: u32,
    log: Vec<TurnLogEntryWire>,
    winner_remaining_hp: u32,
    winner_max_hp: u32,
    total_damage_dealt: DamageTotalsWire,
    decision: Decision,
}

fn js_err(message: impl ToString) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn side_to_js(side: Side) -> u8 {
    match side {
        Side::One => 1,
        Side::Two => 2,
    }
}

fn side_from_js(value: u8) -> Result<Side, String> {
    match value {
        1 => Ok(Side::One),
        2 => Ok(Side::Two),
        other => Err(format!("Unknown side: {}", other)),
    }
}

impl From<TurnLogEntry> for TurnLogEntryWire {
    fn from(entry: TurnLogEntry) -> Self {
        Self {
            turn: entry.turn,
            attacker: entry.attacker,
            defender: entry.defender,
            attacker_side: side_to_js(entry.attacker_side),
            attack_type: entry.attack_type,
            damage: entry.damage,
            effectiveness: entry.effectiveness,
            is_critical: entry.is_critical,
            attacker_hp: entry.attacker_hp,
            defender_hp: entry.defender_hp,
        }
    }
}

impl TryFrom<TurnLogEntryWire> for TurnLogEntry {
    type Error = String;

    fn try_from(entry: TurnLogEntryWire) -> Result<Self, Self::Error> {
        Ok(Self {
            turn: entry.turn,
            attacker: entry.attacker,
            defender: entry.defender,
            attacker_side: side_from_js(entry.attacker_side)?,
            attack_type: entry.attack_type,
            damage: entry.damage,
            effectiveness: entry.effectiveness,
            is_critical: entry.is_critical,
            attacker_hp: entry.attacker_hp,
            defender_hp: entry.defender_hp,
        })
    }
}

impl From<BattleState> for BattleStateWire {
    fn from(state: BattleState) -> Self {
        Self {
            status: state.status,
            current_turn: state.current_turn,
            hp1: state.hp[0],
            hp2: state.hp[1],
            max_hp1: state.max_hp[0],
            max_hp2: state.max_hp[1],
            log: state.log.into_iter().map(TurnLogEntryWire::from).collect(),
            winner: state.winner.map(side_to_js),
            speed: state.speed,
            current_attacker: side_to_js(state.current_attacker),
        }
    }
}

impl TryFrom<BattleStateWire> for BattleState {
    type Error = String;

    fn try_from(state: BattleStateWire) -> Result<Self, Self::Error> {
        Ok(Self {
            status: state.status,
            current_turn: state.current_turn,
            hp: [state.hp1, state.hp2],
            max_hp: [state.max_hp1, state.max_hp2],
            log: state
                .log
                .into_iter()
                .map(TurnLogEntry::try_from)
                .collect::<Result<_, _>>()?,
            winner: state.winner.map(side_from_js).transpose()?,
            speed: state.speed,
            current_attacker: side_from_js(state.current_attacker)?,
        })
    }
}

impl From<BattleResult> for BattleResultWire {
    fn from(result: BattleResult) -> Self {
        Self {
            winner: result.winner_name,
            loser: result.loser_name,
            total_turns: result.total_turns,
            log: result.log.into_iter().map(TurnLogEntryWire::from).collect(),
            winner_remaining_hp: result.winner_remaining_hp,
            winner_max_hp: result.winner_max_hp,
            total_damage_dealt: DamageTotalsWire {
                pokemon1: result.total_damage_dealt.one,
                pokemon2: result.total_damage_dealt.two,
            },
            decision: result.decision,
        }
    }
}

fn combatant_from_js(value: JsValue) -> Result<Combatant, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(js_err)
}

fn state_from_js(value: JsValue) -> Result<BattleState, JsValue> {
    let wire: BattleStateWire = serde_wasm_bindgen::from_value(value).map_err(js_err)?;
    BattleState::try_from(wire).map_err(js_err)
}

fn state_to_js(state: BattleState) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&BattleStateWire::from(state)).map_err(js_err)
}

#[wasm_bindgen(js_name = initializeBattle)]
pub fn initialize_battle_wasm(pokemon1: JsValue, pokemon2: JsValue) -> Result<JsValue, JsValue> {
    let one = combatant_from_js(pokemon1)?;
    let two = combatant_from_js(pokemon2)?;
    let mut rng = || Math::random();
    let state = ENGINE.initialize(&one, &two, &mut rng).map_err(js_err)?;
    state_to_js(state)
}

#[wasm_bindgen(js_name = startBattle)]
pub fn start_battle_wasm(state: JsValue) -> Result<JsValue, JsValue> {
    state_to_js(state_from_js(state)?.start())
}

#[wasm_bindgen(js_name = togglePause)]
pub fn toggle_pause_wasm(state: JsValue) -> Result<JsValue, JsValue> {
    state_to_js(state_from_js(state)?.toggle_pause())
}

#[wasm_bindgen(js_name = setSpeed)]
pub fn set_speed_wasm(state: JsValue, speed: String) -> Result<JsValue, JsValue> {
    let speed: PlaybackSpeed = speed.parse().map_err(js_err)?;
    state_to_js(state_from_js(state)?.with_speed(speed))
}

#[wasm_bindgen(js_name = getSpeedInterval)]
pub fn get_speed_interval_wasm(speed: String) -> Result<u32, JsValue> {
    let speed: PlaybackSpeed = speed.parse().map_err(js_err)?;
    Ok(speed.interval().as_millis() as u32)
}

#[wasm_bindgen(js_name = processTurn)]
pub fn process_turn_wasm(state: JsValue, pokemon1: JsValue, pokemon2: JsValue) -> Result<JsValue, JsValue> {
    let state = state_from_js(state)?;
    let one = combatant_from_js(pokemon1)?;
    let two = combatant_from_js(pokemon2)?;
    let mut rng = || Math::random();
    let next = ENGINE.advance_turn(&state, &one, &two, &mut rng).map_err(js_err)?;
    state_to_js(next)
}

#[wasm_bindgen(js_name = runCompleteBattle)]
pub fn run_complete_battle_wasm(pokemon1: JsValue, pokemon2: JsValue) -> Result<JsValue, JsValue> {
    let one = combatant_from_js(pokemon1)?;
    let two = combatant_from_js(pokemon2)?;
    let mut rng = || Math::random();
    let result = run_to_completion(&ENGINE, &one, &two, &mut rng).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&BattleResultWire::from(result)).map_err(js_err)
}

#[wasm_bindgen(js_name = narrateTurn)]
pub fn narrate_turn_wasm(
    entry: JsValue,
    attacker: JsValue,
    defender: JsValue,
    defender_max_hp: u32,
) -> Result<String, JsValue> {
    let wire: TurnLogEntryWire = serde_wasm_bindgen::from_value(entry).map_err(js_err)?;
    let entry = TurnLogEntry::try_from(wire).map_err(js_err)?;
    let attacker = combatant_from_js(attacker)?;
    let defender = combatant_from_js(defender)?;
    let mut rng = || Math::random();
    Ok(narrate_turn(&entry, &attacker, &defender, defender_max_hp, &mut rng))
}

#[wasm_bindgen(js_name = narrateBattleStart)]
pub fn narrate_battle_start_wasm(
    pokemon1: JsValue,
    pokemon2: JsValue,
    first_attacker: u8,
) -> Result<JsValue, JsValue> {
    let one = combatant_from_js(pokemon1)?;
    let two = combatant_from_js(pokemon2)?;
    let first = side_from_js(first_attacker).map_err(js_err)?;
    let mut rng = || Math::random();
    let lines = narrate_battle_start(&one, &two, first, &mut rng);
    serde_wasm_bindgen::to_value(&lines).map_err(js_err)
}

#[wasm_bindgen(js_name = narrateVictory)]
pub fn narrate_victory_wasm(winner: JsValue, loser: JsValue, winner_hp_fraction: f64) -> Result<String, JsValue> {
    let winner = combatant_from_js(winner)?;
    let loser = combatant_from_js(loser)?;
    let mut rng = || Math::random();
    Ok(narrate_victory(&winner, &loser, winner_hp_fraction, &mut rng))
}
