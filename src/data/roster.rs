use crate::core::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKind {
    pub const ALL: [StatKind; 6] = [
        StatKind::Hp,
        StatKind::Attack,
        StatKind::Defense,
        StatKind::SpecialAttack,
        StatKind::SpecialDefense,
        StatKind::Speed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKind::Hp => "hp",
            StatKind::Attack => "attack",
            StatKind::Defense => "defense",
            StatKind::SpecialAttack => "special-attack",
            StatKind::SpecialDefense => "special-defense",
            StatKind::Speed => "speed",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    #[serde(rename = "special-attack")]
    pub special_attack: u32,
    #[serde(rename = "special-defense")]
    pub special_defense: u32,
    pub speed: u32,
}

impl BaseStats {
    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialAttack => self.special_attack,
            StatKind::SpecialDefense => self.special_defense,
            StatKind::Speed => self.speed,
        }
    }

    pub fn total(&self) -> u32 {
        StatKind::ALL.iter().map(|kind| self.get(*kind)).sum()
    }
}

/// Rarity tiers in ascending order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RarityTier {
    #[default]
    Common,
    Uncommon,
    Rare,
    UltraRare,
    Legendary,
    Mythical,
}

impl RarityTier {
    pub fn rank(&self) -> i32 {
        *self as i32
    }
}

/// A read-only battle participant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CombatantWire")]
pub struct Combatant {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub stats: BaseStats,
    pub rarity_tier: RarityTier,
    pub is_legendary: bool,
    pub is_mythical: bool,
    pub flavor_text: Option<String>,
}

impl Combatant {
    /// Stat value used in battle math, never below 1.
    pub fn stat(&self, kind: StatKind) -> u32 {
        self.stats.get(kind).max(1)
    }

    pub fn total_stats(&self) -> u32 {
        self.stats.total()
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::EmptyName { id: self.id });
        }
        if self.types.is_empty() {
            return Err(EngineError::MissingTypes {
                name: self.name.clone(),
            });
        }
        if self.types.len() > 2 {
            return Err(EngineError::TooManyTypes {
                name: self.name.clone(),
                count: self.types.len(),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
struct StatNameWire {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct StatEntryWire {
    base_stat: u32,
    stat: StatNameWire,
}

/// Stats arrive either as a name map or as the PokeAPI list form.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum StatsWire {
    Map(HashMap<String, u32>),
    List(Vec<StatEntryWire>),
}

impl StatsWire {
    fn into_map(self) -> HashMap<String, u32> {
        match self {
            StatsWire::Map(map) => map,
            StatsWire::List(entries) => entries
                .into_iter()
                .map(|entry| (entry.stat.name, entry.base_stat))
                .collect(),
        }
    }
}

/// Serialized form of a [`Combatant`] as found in roster files.
#[derive(Clone, Debug, Deserialize)]
pub struct CombatantWire {
    #[serde(default)]
    id: u32,
    name: String,
    #[serde(default)]
    types: Vec<String>,
    stats: StatsWire,
    #[serde(default)]
    rarity_tier: RarityTier,
    #[serde(default)]
    is_legendary: bool,
    #[serde(default)]
    is_mythical: bool,
    #[serde(default)]
    flavor_text: Option<String>,
}

impl TryFrom<CombatantWire> for Combatant {
    type Error = EngineError;

    fn try_from(wire: CombatantWire) -> Result<Self> {
        let stats = wire.stats.into_map();
        let lookup = |kind: StatKind| {
            stats
                .get(kind.as_str())
                .copied()
                .ok_or_else(|| EngineError::MissingStat {
                    name: wire.name.clone(),
                    stat: kind.as_str(),
                })
        };

        let stats = BaseStats {
            hp: lookup(StatKind::Hp)?,
            attack: lookup(StatKind::Attack)?,
            defense: lookup(StatKind::Defense)?,
            special_attack: lookup(StatKind::SpecialAttack)?,
            special_defense: lookup(StatKind::SpecialDefense)?,
            speed: lookup(StatKind::Speed)?,
        };

        Ok(Self {
            id: wire.id,
            name: wire.name,
            types: wire.types.into_iter().map(|t| t.to_lowercase()).collect(),
            stats,
            rarity_tier: wire.rarity_tier,
            is_legendary: wire.is_legendary,
            is_mythical: wire.is_mythical,
            flavor_text: wire.flavor_text.filter(|text| !text.trim().is_empty()),
        })
    }
}

/// Name-keyed repository of combatants, built once at startup and passed to
/// whatever sets up battles.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    combatants: HashMap<String, Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            combatants: HashMap::new(),
        }
    }

    pub fn insert(&mut self, combatant: Combatant) {
        self.combatants.insert(combatant.name.to_lowercase(), combatant);
    }

    pub fn get(&self, name: &str) -> Option<&Combatant> {
        self.combatants.get(&name.to_lowercase())
    }

    pub fn get_required(&self, name: &str) -> Result<&Combatant> {
        self.get(name)
            .ok_or_else(|| EngineError::UnknownCombatant(name.to_string()))
    }

    /// Sorted combatant names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.combatants.values().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.values()
    }

    pub fn load_from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let wires: Vec<CombatantWire> = match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(_, data)| serde_json::from_value(data))
                .collect::<std::result::Result<_, _>>()?,
            other => serde_json::from_value(other)?,
        };
        let mut roster = Self::new();
        for wire in wires {
            roster.insert(Combatant::try_from(wire)?);
        }
        Ok(roster)
    }

    pub fn load_from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_json_str(&content)
    }

    pub fn load_default() -> Result<Self> {
        const DEFAULT_ROSTER_JSON: &str = include_str!("../../data/roster.json");
        Self::load_from_json_str(DEFAULT_ROSTER_JSON)
    }
}
