use crate::core::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

const DEFAULT_TYPE_COLOR: &str = "#A8A878";

/// Which stat pair an attack of a given type draws on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageClass {
    #[default]
    Physical,
    Special,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effectiveness {
    Immune,
    DoublyResisted,
    NotEffective,
    Neutral,
    SuperEffective,
    DoublySuperEffective,
}

impl Effectiveness {
    /// Maps a combined multiplier to its label. Values outside the six legal
    /// products fall back to neutral.
    pub fn from_multiplier(multiplier: f32) -> Self {
        if multiplier == 0.0 {
            Effectiveness::Immune
        } else if multiplier == 0.25 {
            Effectiveness::DoublyResisted
        } else if multiplier == 0.5 {
            Effectiveness::NotEffective
        } else if multiplier == 2.0 {
            Effectiveness::SuperEffective
        } else if multiplier == 4.0 {
            Effectiveness::DoublySuperEffective
        } else {
            Effectiveness::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Effectiveness::Immune => "immune",
            Effectiveness::DoublyResisted => "doubly-resisted",
            Effectiveness::NotEffective => "not-effective",
            Effectiveness::Neutral => "neutral",
            Effectiveness::SuperEffective => "super-effective",
            Effectiveness::DoublySuperEffective => "doubly-super-effective",
        }
    }
}

impl fmt::Display for Effectiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageRelations {
    #[serde(default)]
    pub double_damage_from: Vec<String>,
    #[serde(default)]
    pub double_damage_to: Vec<String>,
    #[serde(default)]
    pub half_damage_from: Vec<String>,
    #[serde(default)]
    pub half_damage_to: Vec<String>,
    #[serde(default)]
    pub no_damage_from: Vec<String>,
    #[serde(default)]
    pub no_damage_to: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeEntry {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub damage_relations: DamageRelations,
    #[serde(default)]
    pub move_damage_class: Option<DamageClass>,
    #[serde(default)]
    pub color: Option<String>,
}

/// The attacking type picked for a matchup and the multiplier it achieves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackChoice {
    pub attack_type: String,
    pub multiplier: f32,
}

#[derive(Clone, Debug)]
pub struct TypeChart {
    chart: HashMap<String, TypeEntry>,
}

impl TypeChart {
    /// Builds the standard 18-type chart.
    pub fn new() -> Self {
        let mut chart = HashMap::new();
        let mut add_entry = |id: u32,
                             type_name: &str,
                             class: Option<DamageClass>,
                             color: &str,
                             double_to: &[&str],
                             half_to: &[&str],
                             no_to: &[&str]| {
            let to_vec = |names: &[&str]| names.iter().map(|v| v.to_string()).collect::<Vec<_>>();
            chart.insert(
                type_name.to_string(),
                TypeEntry {
                    id,
                    name: type_name.to_string(),
                    damage_relations: DamageRelations {
                        double_damage_to: to_vec(double_to),
                        half_damage_to: to_vec(half_to),
                        no_damage_to: to_vec(no_to),
                        ..Default::default()
                    },
                    move_damage_class: class,
                    color: Some(color.to_string()),
                },
            );
        };

        use DamageClass::{Physical, Special};
        add_entry(1, "normal", Some(Physical), "#A8A878", &[], &["rock", "steel"], &["ghost"]);
        add_entry(2, "fighting", Some(Physical), "#C03028", &["normal", "ice", "rock", "dark", "steel"], &["poison", "flying", "psychic", "bug", "fairy"], &["ghost"]);
        add_entry(3, "flying", Some(Physical), "#A890F0", &["grass", "fighting", "bug"], &["electric", "rock", "steel"], &[]);
        add_entry(4, "poison", Some(Physical), "#A040A0", &["grass", "fairy"], &["poison", "ground", "rock", "ghost"], &["steel"]);
        add_entry(5, "ground", Some(Physical), "#E0C068", &["fire", "electric", "poison", "rock", "steel"], &["grass", "bug"], &["flying"]);
        add_entry(6, "rock", Some(Physical), "#B8A038", &["fire", "ice", "flying", "bug"], &["fighting", "ground", "steel"], &[]);
        add_entry(7, "bug", Some(Physical), "#A8B820", &["grass", "psychic", "dark"], &["fire", "fighting", "poison", "flying", "ghost", "steel", "fairy"], &[]);
        add_entry(8, "ghost", Some(Physical), "#705898", &["psychic", "ghost"], &["dark"], &["normal"]);
        add_entry(9, "steel", Some(Physical), "#B8B8D0", &["ice", "rock", "fairy"], &["fire", "water", "electric", "steel"], &[]);
        add_entry(10, "fire", Some(Special), "#F08030", &["grass", "ice", "bug", "steel"], &["fire", "water", "rock", "dragon"], &[]);
        add_entry(11, "water", Some(Special), "#6890F0", &["fire", "ground", "rock"], &["water", "grass", "dragon"], &[]);
        add_entry(12, "grass", Some(Special), "#78C850", &["water", "ground", "rock"], &["fire", "grass", "poison", "flying", "bug", "dragon", "steel"], &[]);
        add_entry(13, "electric", Some(Special), "#F8D030", &["water", "flying"], &["electric", "grass", "dragon"], &["ground"]);
        add_entry(14, "psychic", Some(Special), "#F85888", &["fighting", "poison"], &["psychic", "steel"], &["dark"]);
        add_entry(15, "ice", Some(Special), "#98D8D8", &["grass", "ground", "flying", "dragon"], &["fire", "water", "ice", "steel"], &[]);
        add_entry(16, "dragon", Some(Special), "#7038F8", &["dragon"], &["steel"], &["fairy"]);
        add_entry(17, "dark", Some(Special), "#705848", &["psychic", "ghost"], &["fighting", "dark", "fairy"], &[]);
        add_entry(18, "fairy", None, "#EE99AC", &["fighting", "dragon", "dark"], &["fire", "poison", "steel"], &[]);

        let mut chart = Self { chart };
        chart.fill_incoming_relations();
        chart
    }

    /// Loads a chart from a PokeAPI-shaped `types.json`: either an array of
    /// entries or an object keyed by type name.
    pub fn load_from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let entries: Vec<TypeEntry> = match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(_, entry)| serde_json::from_value(entry))
                .collect::<std::result::Result<_, _>>()?,
            other => serde_json::from_value(other)?,
        };
        let chart = entries
            .into_iter()
            .map(|mut entry| {
                entry.name = entry.name.to_lowercase();
                (entry.name.clone(), entry)
            })
            .collect();
        Ok(Self { chart })
    }

    pub fn load_from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_json_str(&content)
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeEntry> {
        self.chart.get(&type_name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.chart.len()
    }

    /// Sorted type names.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.chart.keys().map(|name| name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.chart.is_empty()
    }

    /// Multiplier of `attack_type` against one defending type: 0, 0.5, 1 or 2.
    /// Unknown attacking types are neutral.
    pub fn single_type_multiplier(&self, attack_type: &str, defense_type: &str) -> f32 {
        let Some(entry) = self.get(attack_type) else {
            return 1.0;
        };
        let relations = &entry.damage_relations;
        let listed = |names: &[String]| names.iter().any(|t| t.eq_ignore_ascii_case(defense_type));

        if listed(&relations.no_damage_to) {
            0.0
        } else if listed(&relations.double_damage_to) {
            2.0
        } else if listed(&relations.half_damage_to) {
            0.5
        } else {
            1.0
        }
    }

    /// Product of the single-type multipliers over every defending type.
    pub fn combined_multiplier(&self, attack_type: &str, defense_types: &[String]) -> f32 {
        defense_types
            .iter()
            .map(|defense_type| self.single_type_multiplier(attack_type, defense_type))
            .product()
    }

    /// Picks the attacker type with the highest combined multiplier. Ties keep
    /// the earliest type in `attacker_types`.
    pub fn best_attack_type(&self, attacker_types: &[String], defender_types: &[String]) -> Option<AttackChoice> {
        let first = attacker_types.first()?;
        let mut best = AttackChoice {
            attack_type: first.to_lowercase(),
            multiplier: 0.0,
        };
        for attack_type in attacker_types {
            let multiplier = self.combined_multiplier(attack_type, defender_types);
            if multiplier > best.multiplier {
                best = AttackChoice {
                    attack_type: attack_type.to_lowercase(),
                    multiplier,
                };
            }
        }
        Some(best)
    }

    pub fn damage_class(&self, type_name: &str) -> DamageClass {
        self.get(type_name)
            .and_then(|entry| entry.move_damage_class)
            .unwrap_or_default()
    }

    pub fn type_color(&self, type_name: &str) -> &str {
        self.get(type_name)
            .and_then(|entry| entry.color.as_deref())
            .unwrap_or(DEFAULT_TYPE_COLOR)
    }

    /// Positive when the attacker's best matchup beats the defender's, in
    /// doublings. Immunity counts as a quarter.
    pub fn type_advantage(&self, attacker_types: &[String], defender_types: &[String]) -> f32 {
        let score = |multiplier: f32| {
            let multiplier = if multiplier == 0.0 { 0.25 } else { multiplier };
            multiplier.log2()
        };
        let attacker_best = self
            .best_attack_type(attacker_types, defender_types)
            .map_or(1.0, |choice| choice.multiplier);
        let defender_best = self
            .best_attack_type(defender_types, attacker_types)
            .map_or(1.0, |choice| choice.multiplier);
        score(attacker_best) - score(defender_best)
    }

    fn fill_incoming_relations(&mut self) {
        let outgoing: Vec<(String, DamageRelations)> = self
            .chart
            .iter()
            .map(|(name, entry)| (name.clone(), entry.damage_relations.clone()))
            .collect();

        for (attacker, relations) in outgoing {
            for defender in &relations.double_damage_to {
                if let Some(entry) = self.chart.get_mut(defender) {
                    entry.damage_relations.double_damage_from.push(attacker.clone());
                }
            }
            for defender in &relations.half_damage_to {
                if let Some(entry) = self.chart.get_mut(defender) {
                    entry.damage_relations.half_damage_from.push(attacker.clone());
                }
            }
            for defender in &relations.no_damage_to {
                if let Some(entry) = self.chart.get_mut(defender) {
                    entry.damage_relations.no_damage_from.push(attacker.clone());
                }
            }
        }

        for entry in self.chart.values_mut() {
            entry.damage_relations.double_damage_from.sort();
            entry.damage_relations.half_damage_from.sort();
            entry.damage_relations.no_damage_from.sort();
        }
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::new()
    }
}
