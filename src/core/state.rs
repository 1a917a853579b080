use crate::data::type_chart::Effectiveness;
use crate::core::error::EngineError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    pub fn pick<T>(self, one: T, two: T) -> T {
        match self {
            Side::One => one,
            Side::Two => two,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleStatus {
    #[default]
    Idle,
    Fighting,
    Paused,
    Finished,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl PlaybackSpeed {
    pub fn interval(&self) -> Duration {
        match self {
            PlaybackSpeed::Slow => Duration::from_millis(1500),
            PlaybackSpeed::Normal => Duration::from_millis(800),
            PlaybackSpeed::Fast => Duration::from_millis(300),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackSpeed::Slow => "slow",
            PlaybackSpeed::Normal => "normal",
            PlaybackSpeed::Fast => "fast",
        }
    }
}

impl FromStr for PlaybackSpeed {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "slow" => Ok(PlaybackSpeed::Slow),
            "normal" => Ok(PlaybackSpeed::Normal),
            "fast" => Ok(PlaybackSpeed::Fast),
            other => Err(EngineError::InvalidSetting {
                key: "speed",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnLogEntry {
    pub turn: u32,
    pub attacker: String,
    pub defender: String,
    pub attacker_side: Side,
    pub attack_type: String,
    pub damage: u32,
    pub effectiveness: Effectiveness,
    pub is_critical: bool,
    pub attacker_hp: u32,
    pub defender_hp: u32,
}

impl TurnLogEntry {
    pub fn defender_side(&self) -> Side {
        self.attacker_side.opponent()
    }

    pub fn is_knockout(&self) -> bool {
        self.defender_hp == 0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub status: BattleStatus,
    pub current_turn: u32,
    pub hp: [u32; 2],
    pub max_hp: [u32; 2],
    pub log: Vec<TurnLogEntry>,
    pub winner: Option<Side>,
    pub speed: PlaybackSpeed,
    pub current_attacker: Side,
}

impl BattleState {
    pub fn hp(&self, side: Side) -> u32 {
        self.hp[side.index()]
    }

    pub fn max_hp(&self, side: Side) -> u32 {
        self.max_hp[side.index()]
    }

    pub fn hp_fraction(&self, side: Side) -> f64 {
        let max = self.max_hp(side);
        if max == 0 {
            return 0.0;
        }
        self.hp(side) as f64 / max as f64
    }

    pub fn turns_elapsed(&self) -> u32 {
        self.current_turn.saturating_sub(1)
    }

    pub fn is_finished(&self) -> bool {
        self.status == BattleStatus::Finished
    }

    pub fn loser(&self) -> Option<Side> {
        self.winner.map(Side::opponent)
    }

    pub fn start(&self) -> Self {
        self.with_status(BattleStatus::Idle, BattleStatus::Fighting)
    }

    pub fn pause(&self) -> Self {
        self.with_status(BattleStatus::Fighting, BattleStatus::Paused)
    }

    pub fn resume(&self) -> Self {
        self.with_status(BattleStatus::Paused, BattleStatus::Fighting)
    }

    pub fn toggle_pause(&self) -> Self {
        match self.status {
            BattleStatus::Fighting => self.pause(),
            BattleStatus::Paused => self.resume(),
            _ => self.clone(),
        }
    }

    pub fn with_speed(&self, speed: PlaybackSpeed) -> Self {
        Self {
            speed,
            ..self.clone()
        }
    }

    pub fn finish(&self, winner: Side) -> Self {
        Self {
            status: BattleStatus::Finished,
            winner: Some(winner),
            ..self.clone()
        }
    }

    fn with_status(&self, from: BattleStatus, to: BattleStatus) -> Self {
        if self.status != from {
            return self.clone();
        }
        Self {
            status: to,
            ..self.clone()
        }
    }
}
