use thiserror::Error;

/// Errors raised while loading battle data or running a battle.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("combatant '{name}' has no types")]
    MissingTypes { name: String },

    #[error("combatant '{name}' has {count} types, at most two are allowed")]
    TooManyTypes { name: String, count: usize },

    #[error("combatant with id {id} has an empty name")]
    EmptyName { id: u32 },

    #[error("combatant '{name}' is missing required stat '{stat}'")]
    MissingStat { name: String, stat: &'static str },

    #[error("unknown combatant '{0}'")]
    UnknownCombatant(String),

    #[error("invalid value '{value}' for {key}")]
    InvalidSetting { key: &'static str, value: String },

    #[error("invalid JSON data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML data: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
