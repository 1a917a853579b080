use crate::core::battle::BattleEngine;
use crate::core::error::Result;
use crate::core::state::{BattleState, BattleStatus, Side, TurnLogEntry};
use crate::data::roster::Combatant;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decision {
    Knockout,
    /// The turn ceiling was reached and remaining HP decided the winner.
    TurnLimit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageTotals {
    pub one: u32,
    pub two: u32,
}

impl DamageTotals {
    pub fn from_log(log: &[TurnLogEntry]) -> Self {
        log.iter().fold(Self::default(), |mut totals, entry| {
            match entry.attacker_side {
                Side::One => totals.one += entry.damage,
                Side::Two => totals.two += entry.damage,
            }
            totals
        })
    }

    pub fn get(&self, side: Side) -> u32 {
        side.pick(self.one, self.two)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub winner: Side,
    pub loser: Side,
    pub winner_name: String,
    pub loser_name: String,
    pub total_turns: u32,
    pub log: Vec<TurnLogEntry>,
    pub winner_remaining_hp: u32,
    pub winner_max_hp: u32,
    pub total_damage_dealt: DamageTotals,
    pub decision: Decision,
}

impl BattleResult {
    pub fn winner_hp_fraction(&self) -> f64 {
        if self.winner_max_hp == 0 {
            return 0.0;
        }
        self.winner_remaining_hp as f64 / self.winner_max_hp as f64
    }
}

/// Side ahead on remaining HP fraction. Exact ties go to side one.
pub fn leader_by_hp(state: &BattleState) -> Side {
    if state.hp_fraction(Side::Two) > state.hp_fraction(Side::One) {
        Side::Two
    } else {
        Side::One
    }
}

/// Runs `state` until it finishes or `max_turns` more turns have been played.
///
/// Idle and paused states are switched to fighting first. The ceiling counts
/// from the turns already in `state`, so a session watched for a while still
/// gets a full budget when skipped. When the ceiling is reached without a
/// knockout, the side with the higher remaining HP fraction wins.
pub fn drive_to_finish(
    engine: &BattleEngine,
    state: &BattleState,
    one: &Combatant,
    two: &Combatant,
    rng: &mut dyn FnMut() -> f64,
) -> Result<(BattleState, Decision)> {
    let _span = debug_span!("battle", one = %one.name, two = %two.name).entered();
    let mut state = state.start().resume();
    let ceiling = state.turns_elapsed().saturating_add(engine.config.max_turns);

    while state.status == BattleStatus::Fighting && state.turns_elapsed() < ceiling {
        state = engine.advance_turn(&state, one, two, rng)?;
    }

    if state.status == BattleStatus::Fighting {
        let winner = leader_by_hp(&state);
        warn!(
            one = %one.name,
            two = %two.name,
            turns = state.turns_elapsed(),
            winner = ?winner,
            "turn ceiling reached, deciding by remaining hp"
        );
        return Ok((state.finish(winner), Decision::TurnLimit));
    }

    let decision = decision_of(&state);
    Ok((state, decision))
}

/// A finished battle whose loser still has HP was decided on the turn limit.
pub fn decision_of(state: &BattleState) -> Decision {
    match state.loser() {
        Some(loser) if state.hp(loser) > 0 => Decision::TurnLimit,
        _ => Decision::Knockout,
    }
}

pub fn run_to_completion(
    engine: &BattleEngine,
    one: &Combatant,
    two: &Combatant,
    rng: &mut dyn FnMut() -> f64,
) -> Result<BattleResult> {
    let initial = engine.initialize(one, two, rng)?;
    let (state, decision) = drive_to_finish(engine, &initial, one, two, rng)?;
    Ok(summarize(&state, decision, one, two))
}

/// Builds a `BattleResult` from a finished state.
pub fn summarize(state: &BattleState, decision: Decision, one: &Combatant, two: &Combatant) -> BattleResult {
    let winner = state.winner.unwrap_or_else(|| leader_by_hp(state));
    let loser = winner.opponent();
    BattleResult {
        winner,
        loser,
        winner_name: winner.pick(one, two).name.clone(),
        loser_name: loser.pick(one, two).name.clone(),
        total_turns: state.turns_elapsed(),
        log: state.log.clone(),
        winner_remaining_hp: state.hp(winner),
        winner_max_hp: state.max_hp(winner),
        total_damage_dealt: DamageTotals::from_log(&state.log),
        decision,
    }
}

/// One row of a matchup simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchupRecord {
    pub run: u32,
    pub winner: String,
    pub winner_side: Side,
    pub turns: u32,
    pub decision: Decision,
    pub winner_remaining_hp: u32,
    pub damage_one: u32,
    pub damage_two: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchupSummary {
    pub one: String,
    pub two: String,
    pub runs: u32,
    pub wins_one: u32,
    pub wins_two: u32,
    pub turn_limit_finishes: u32,
    pub mean_turns: f64,
    pub records: Vec<MatchupRecord>,
}

impl MatchupSummary {
    pub fn wins(&self, side: Side) -> u32 {
        side.pick(self.wins_one, self.wins_two)
    }

    pub fn win_rate(&self, side: Side) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.wins(side) as f64 / self.runs as f64
    }
}

/// Plays `runs` independent batch battles between the same pair.
pub fn simulate_matchup(
    engine: &BattleEngine,
    one: &Combatant,
    two: &Combatant,
    runs: u32,
    rng: &mut dyn FnMut() -> f64,
) -> Result<MatchupSummary> {
    let mut summary = MatchupSummary {
        one: one.name.clone(),
        two: two.name.clone(),
        runs,
        wins_one: 0,
        wins_two: 0,
        turn_limit_finishes: 0,
        mean_turns: 0.0,
        records: Vec::with_capacity(runs as usize),
    };
    let mut total_turns: u64 = 0;

    for run in 1..=runs {
        let result = run_to_completion(engine, one, two, rng)?;
        match result.winner {
            Side::One => summary.wins_one += 1,
            Side::Two => summary.wins_two += 1,
        }
        if result.decision == Decision::TurnLimit {
            summary.turn_limit_finishes += 1;
        }
        total_turns += result.total_turns as u64;
        summary.records.push(MatchupRecord {
            run,
            winner: result.winner_name,
            winner_side: result.winner,
            turns: result.total_turns,
            decision: result.decision,
            winner_remaining_hp: result.winner_remaining_hp,
            damage_one: result.total_damage_dealt.one,
            damage_two: result.total_damage_dealt.two,
        });
    }

    if runs > 0 {
        summary.mean_turns = total_turns as f64 / runs as f64;
    }
    debug!(
        one = %summary.one,
        two = %summary.two,
        runs,
        wins_one = summary.wins_one,
        wins_two = summary.wins_two,
        "matchup simulated"
    );
    Ok(summary)
}
