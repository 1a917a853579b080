//! Narration lines, one set per battle situation.

pub const SUPER_EFFECTIVE: &[&str] = &[
    "{attacker} lands a devastating {type} attack! It's super effective!",
    "A powerful {type} strike! {defender} takes massive damage!",
    "{attacker}'s {type} move hits where it hurts!",
    "Super effective! {defender} reels from the {type} attack!",
    "Critical weakness exploited! {attacker}'s {type} attack connects!",
];

pub const DOUBLY_SUPER_EFFECTIVE: &[&str] = &[
    "DEVASTATING! {attacker}'s {type} attack deals quadruple damage!",
    "An absolutely crushing blow! {defender} can barely stand!",
    "{attacker} exploits a massive weakness! The {type} attack is overwhelming!",
];

pub const NOT_EFFECTIVE: &[&str] = &[
    "{defender} shrugs off the {type} attack...",
    "It's not very effective! {defender} barely feels it.",
    "The {type} move doesn't do much to {defender}.",
    "{attacker}'s {type} attack bounces off {defender}!",
];

pub const DOUBLY_RESISTED: &[&str] = &[
    "The {type} attack is almost completely ineffective!",
    "{defender} barely notices the resisted {type} move.",
    "{attacker}'s {type} attack does minimal damage...",
];

pub const IMMUNE: &[&str] = &[
    "The {type} attack passes right through {defender}!",
    "It has no effect! {defender}'s typing makes it immune!",
    "{defender} is completely unaffected by the {type} move!",
    "No damage! {defender} is immune to {type} attacks!",
];

pub const NEUTRAL: &[&str] = &[
    "{attacker} strikes with a {type} attack!",
    "{attacker} launches a {type} move at {defender}!",
    "A solid {type} hit from {attacker}!",
    "{attacker}'s {type} attack connects!",
];

pub const CRITICAL: &[&str] = &[
    "A critical hit! {attacker} shows no mercy!",
    "Critical strike! {attacker} finds a weak spot!",
    "CRITICAL HIT! Maximum damage!",
    "{attacker} lands a devastating critical blow!",
];

pub const LOW_HEALTH: &[&str] = &[
    "{pokemon} is hanging on by a thread!",
    "{pokemon} looks exhausted but refuses to give up!",
    "{pokemon} is in the danger zone!",
    "Can {pokemon} survive another hit?",
];

pub const KNOCKOUT: &[&str] = &[
    "{defender} faints! {attacker} wins!",
    "{defender} is knocked out! Victory for {attacker}!",
    "It's over! {defender} can't continue!",
    "{attacker} claims victory as {defender} falls!",
];

pub const BATTLE_START: &[&str] = &[
    "The battle begins! {pokemon1} vs {pokemon2}!",
    "Trainers ready! {pokemon1} faces off against {pokemon2}!",
    "Let the battle commence! {pokemon1} and {pokemon2} take their positions!",
];

pub const FIRST_ATTACKER: &[&str] = &[
    "{pokemon} moves first with superior speed!",
    "{pokemon} blitzes into action!",
    "Lightning fast! {pokemon} strikes first!",
];

pub const LEGENDARY_APPEARS: &[&str] = &[
    "The legendary {pokemon} enters the arena!",
    "A legendary presence! {pokemon} towers with power!",
    "Behold! The legendary {pokemon} takes the stage!",
];

pub const MYTHICAL_APPEARS: &[&str] = &[
    "The mythical {pokemon} manifests!",
    "A rare sight! The mythical {pokemon} appears!",
    "From legend to reality - {pokemon} enters battle!",
];

pub const RARITY_MISMATCH: &[&str] = &[
    "Can {underdog} overcome the odds against {favorite}?",
    "David vs Goliath! {underdog} faces {favorite}!",
];

pub const CLOSE_FINISH: &[&str] = &[
    "What a close battle! {winner} barely survives!",
    "Down to the wire! {winner} edges out the victory!",
    "A nail-biter! {winner} wins by a hair!",
];

pub const DOMINANT: &[&str] = &[
    "{winner} dominates completely!",
    "A crushing victory for {winner}!",
    "{winner} didn't even break a sweat!",
];
