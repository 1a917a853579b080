//! Engine tuning knobs.
//!
//! Defaults reproduce the canonical battle math (level 50, 50 base power, HP x3,
//! 100 turn ceiling). A YAML file and `POKEDUEL_*` environment variables can
//! override them.
use crate::core::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use crate::core::state::PlaybackSpeed;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const HP_SCALE: u32 = 3;
pub const LEVEL: u32 = 50;
pub const BASE_POWER: u32 = 50;
pub const CRITICAL_CHANCE: f64 = 0.0625;
pub const CRITICAL_MULTIPLIER: f64 = 1.5;
pub const VARIANCE_FLOOR: f64 = 0.85;
pub const MAX_TURNS: u32 = 100;

/// Damage dealt by an attack whose combined multiplier is 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImmuneDamage {
    /// The usual one-damage floor still applies.
    #[default]
    MinimumOne,
    Zero,
}

impl FromStr for ImmuneDamage {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "minimum-one" | "min-one" | "one" | "1" => Ok(ImmuneDamage::MinimumOne),
            "zero" | "0" => Ok(ImmuneDamage::Zero),
            other => Err(EngineError::InvalidSetting {
                key: "immune_damage",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub hp_scale: u32,
    pub level: u32,
    pub base_power: u32,
    pub critical_chance: f64,
    pub critical_multiplier: f64,
    pub variance_floor: f64,
    pub max_turns: u32,
    pub immune_damage: ImmuneDamage,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hp_scale: HP_SCALE,
            level: LEVEL,
            base_power: BASE_POWER,
            critical_chance: CRITICAL_CHANCE,
            critical_multiplier: CRITICAL_MULTIPLIER,
            variance_floor: VARIANCE_FLOOR,
            max_turns: MAX_TURNS,
            immune_damage: ImmuneDamage::default(),
        }
    }
}

impl EngineConfig {
    pub fn load_from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load_from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_yaml_str(&content)
    }

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `POKEDUEL_CONFIG` - YAML file loaded before the overrides below
    /// - `POKEDUEL_MAX_TURNS` - batch turn ceiling (default: 100)
    /// - `POKEDUEL_HP_SCALE` - battle HP multiplier (default: 3)
    /// - `POKEDUEL_IMMUNE_DAMAGE` - `minimum-one` or `zero`
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var("POKEDUEL_CONFIG") {
            Ok(path) => Self::load_from_yaml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };

        if let Some(max_turns) = read_env::<u32>("POKEDUEL_MAX_TURNS") {
            config.max_turns = max_turns.max(1);
        }
        if let Some(hp_scale) = read_env::<u32>("POKEDUEL_HP_SCALE") {
            config.hp_scale = hp_scale.max(1);
        }
        if let Ok(value) = env::var("POKEDUEL_IMMUNE_DAMAGE") {
            config.immune_damage = value.parse()?;
        }

        Ok(config)
    }
}

/// Roster file named by `POKEDUEL_ROSTER`. Blank values are ignored.
pub fn roster_path_from_env() -> Option<PathBuf> {
    read_env::<String>("POKEDUEL_ROSTER")
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
}

/// Playback speed named by `POKEDUEL_SPEED`. Unknown names are logged and ignored.
pub fn playback_speed_from_env() -> Option<PlaybackSpeed> {
    read_env("POKEDUEL_SPEED")
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = EngineConfig::load_from_yaml_str("max_turns: 40\nimmune_damage: zero\n")
            .expect("parse yaml");
        assert_eq!(config.max_turns, 40);
        assert_eq!(config.immune_damage, ImmuneDamage::Zero);
        assert_eq!(config.hp_scale, HP_SCALE);
        assert_eq!(config.critical_chance, CRITICAL_CHANCE);
    }

    #[test]
    fn bad_env_values_are_skipped() {
        env::set_var("POKEDUEL_TEST_SPEED", "warp");
        assert_eq!(read_env::<PlaybackSpeed>("POKEDUEL_TEST_SPEED"), None);
        env::set_var("POKEDUEL_TEST_SPEED", "Slow");
        assert_eq!(read_env::<PlaybackSpeed>("POKEDUEL_TEST_SPEED"), Some(PlaybackSpeed::Slow));
        env::remove_var("POKEDUEL_TEST_SPEED");
        assert_eq!(read_env::<PlaybackSpeed>("POKEDUEL_TEST_SPEED"), None);
    }

    #[test]
    fn immune_damage_parses_aliases() {
        assert_eq!("Zero".parse::<ImmuneDamage>().ok(), Some(ImmuneDamage::Zero));
        assert_eq!("minimum-one".parse::<ImmuneDamage>().ok(), Some(ImmuneDamage::MinimumOne));
        assert!("sometimes".parse::<ImmuneDamage>().is_err());
    }
}
