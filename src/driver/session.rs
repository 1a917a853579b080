use crate::commentary::{narrate_battle_start, narrate_turn, narrate_victory};
use crate::core::battle::BattleEngine;
use crate::core::error::Result;
use crate::core::state::{BattleState, BattleStatus, PlaybackSpeed, Side, TurnLogEntry};
use crate::data::roster::Combatant;
use crate::driver::batch::{decision_of, drive_to_finish, summarize, BattleResult, Decision};
use std::time::Duration;

/// An animated battle between two combatants, advanced one tick at a time by
/// whatever timer the caller owns. Keeps the running commentary.
#[derive(Clone, Debug)]
pub struct BattleSession<'e> {
    engine: &'e BattleEngine,
    one: Combatant,
    two: Combatant,
    state: BattleState,
    commentary: Vec<String>,
}

impl<'e> BattleSession<'e> {
    pub fn new(
        engine: &'e BattleEngine,
        one: Combatant,
        two: Combatant,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<Self> {
        let state = engine.initialize(&one, &two, rng)?;
        Ok(Self {
            engine,
            one,
            two,
            state,
            commentary: Vec::new(),
        })
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn commentary(&self) -> &[String] {
        &self.commentary
    }

    /// Lines added after the first `seen` ones.
    pub fn commentary_since(&self, seen: usize) -> &[String] {
        self.commentary.get(seen..).unwrap_or(&[])
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        side.pick(&self.one, &self.two)
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn start(&mut self, rng: &mut dyn FnMut() -> f64) {
        if self.state.status != BattleStatus::Idle {
            return;
        }
        self.state = self.state.start();
        let lines = narrate_battle_start(&self.one, &self.two, self.state.current_attacker, rng);
        self.commentary.extend(lines);
    }

    pub fn pause(&mut self) {
        self.state = self.state.pause();
    }

    pub fn resume(&mut self) {
        self.state = self.state.resume();
    }

    pub fn toggle_pause(&mut self) {
        self.state = self.state.toggle_pause();
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.state = self.state.with_speed(speed);
    }

    pub fn tick_interval(&self) -> Duration {
        self.state.speed.interval()
    }

    /// Advances exactly one turn. Does nothing unless the battle is fighting.
    pub fn tick(&mut self, rng: &mut dyn FnMut() -> f64) -> Result<Option<TurnLogEntry>> {
        if self.state.status != BattleStatus::Fighting {
            return Ok(None);
        }
        let seen = self.state.log.len();
        let next = self.engine.advance_turn(&self.state, &self.one, &self.two, rng)?;
        self.state = next;
        self.narrate_entries(seen, rng);
        if self.state.is_finished() {
            self.narrate_finish(rng);
        }
        Ok(self.state.log.get(seen).cloned())
    }

    /// Plays the rest of the battle at once, narrating every turn. A session
    /// that has not started yet gets its opening lines first.
    pub fn skip_to_end(&mut self, rng: &mut dyn FnMut() -> f64) -> Result<Decision> {
        if self.state.is_finished() {
            return Ok(self.decision());
        }
        self.start(rng);
        let seen = self.state.log.len();
        let (next, decision) = drive_to_finish(self.engine, &self.state, &self.one, &self.two, rng)?;
        self.state = next;
        self.narrate_entries(seen, rng);
        self.narrate_finish(rng);
        Ok(decision)
    }

    /// Fresh battle between the same pair. Playback speed carries over.
    pub fn rematch(&mut self, rng: &mut dyn FnMut() -> f64) -> Result<()> {
        let speed = self.state.speed;
        self.state = self.engine.reset(&self.one, &self.two, rng)?.with_speed(speed);
        self.commentary.clear();
        Ok(())
    }

    /// Summary of a finished battle.
    pub fn result(&self) -> Option<BattleResult> {
        if !self.state.is_finished() {
            return None;
        }
        Some(summarize(&self.state, self.decision(), &self.one, &self.two))
    }

    fn decision(&self) -> Decision {
        decision_of(&self.state)
    }

    fn narrate_entries(&mut self, from: usize, rng: &mut dyn FnMut() -> f64) {
        for entry in &self.state.log[from..] {
            let attacker = entry.attacker_side.pick(&self.one, &self.two);
            let defender = entry.defender_side().pick(&self.one, &self.two);
            let max_hp = self.state.max_hp(entry.defender_side());
            self.commentary.push(narrate_turn(entry, attacker, defender, max_hp, rng));
        }
    }

    fn narrate_finish(&mut self, rng: &mut dyn FnMut() -> f64) {
        if let Some(winner) = self.state.winner {
            let line = narrate_victory(
                self.combatant(winner),
                self.combatant(winner.opponent()),
                self.state.hp_fraction(winner),
                rng,
            );
            self.commentary.push(line);
        }
    }
}
