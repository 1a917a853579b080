//! Battle narration built from the turn log.
//!
//! Every line is picked uniformly from a fixed template set using the
//! injected random source, so seeded sources reproduce the same text.
pub mod templates;

use crate::core::rng::pick_index;
use crate::core::state::{Side, TurnLogEntry};
use crate::data::roster::Combatant;
use crate::data::type_chart::Effectiveness;

/// Remaining-HP fraction under which the defender gets a low health callout.
pub const LOW_HEALTH_FRACTION: f64 = 0.25;
/// Winner HP fraction under which a victory counts as a close finish.
pub const CLOSE_FINISH_FRACTION: f64 = 0.30;
/// Winner HP fraction above which a victory counts as dominant.
pub const DOMINANT_FRACTION: f64 = 0.70;

/// "mr-mime" -> "Mr Mime"
pub fn display_name(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn pick<'a>(set: &[&'a str], rng: &mut dyn FnMut() -> f64) -> &'a str {
    set[pick_index(rng, set.len())]
}

fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |line, (key, value)| line.replace(key, value))
}

pub fn narrate_turn(
    entry: &TurnLogEntry,
    attacker: &Combatant,
    defender: &Combatant,
    defender_max_hp: u32,
    rng: &mut dyn FnMut() -> f64,
) -> String {
    let attacker_name = display_name(&attacker.name);
    let defender_name = display_name(&defender.name);
    let attack_type = display_name(&entry.attack_type);

    let set = if entry.is_critical {
        templates::CRITICAL
    } else {
        match entry.effectiveness {
            Effectiveness::Immune => templates::IMMUNE,
            Effectiveness::DoublySuperEffective => templates::DOUBLY_SUPER_EFFECTIVE,
            Effectiveness::SuperEffective => templates::SUPER_EFFECTIVE,
            Effectiveness::DoublyResisted => templates::DOUBLY_RESISTED,
            Effectiveness::NotEffective => templates::NOT_EFFECTIVE,
            Effectiveness::Neutral => templates::NEUTRAL,
        }
    };
    let line = fill(
        pick(set, rng),
        &[
            ("{attacker}", attacker_name.as_str()),
            ("{defender}", defender_name.as_str()),
            ("{type}", attack_type.as_str()),
        ],
    );

    if entry.defender_hp == 0 {
        let knockout = fill(
            pick(templates::KNOCKOUT, rng),
            &[("{attacker}", attacker_name.as_str()), ("{defender}", defender_name.as_str())],
        );
        return format!("{line} {knockout}");
    }

    let mut message = format!("{line} (-{} HP)", entry.damage);
    if (entry.defender_hp as f64) < defender_max_hp as f64 * LOW_HEALTH_FRACTION {
        message.push(' ');
        message.push_str(&fill(pick(templates::LOW_HEALTH, rng), &[("{pokemon}", defender_name.as_str())]));
    }
    message
}

/// Opening lines: the matchup, entrance callouts for legendary or mythical
/// combatants, an underdog line when rarity tiers are two or more apart, and
/// who moves first.
pub fn narrate_battle_start(
    one: &Combatant,
    two: &Combatant,
    first: Side,
    rng: &mut dyn FnMut() -> f64,
) -> Vec<String> {
    let name_one = display_name(&one.name);
    let name_two = display_name(&two.name);
    let mut lines = vec![fill(
        pick(templates::BATTLE_START, rng),
        &[("{pokemon1}", name_one.as_str()), ("{pokemon2}", name_two.as_str())],
    )];

    for (combatant, name) in [(one, &name_one), (two, &name_two)] {
        let entrance = if combatant.is_legendary {
            Some(templates::LEGENDARY_APPEARS)
        } else if combatant.is_mythical {
            Some(templates::MYTHICAL_APPEARS)
        } else {
            None
        };
        if let Some(set) = entrance {
            lines.push(fill(pick(set, rng), &[("{pokemon}", name.as_str())]));
        }
    }

    let rank_one = one.rarity_tier.rank();
    let rank_two = two.rarity_tier.rank();
    if (rank_one - rank_two).abs() >= 2 {
        let (underdog, favorite) = if rank_one < rank_two {
            (&name_one, &name_two)
        } else {
            (&name_two, &name_one)
        };
        lines.push(fill(
            pick(templates::RARITY_MISMATCH, rng),
            &[("{underdog}", underdog.as_str()), ("{favorite}", favorite.as_str())],
        ));
    }

    let first_name = first.pick(&name_one, &name_two);
    lines.push(fill(pick(templates::FIRST_ATTACKER, rng), &[("{pokemon}", first_name.as_str())]));
    lines
}

pub fn narrate_victory(
    winner: &Combatant,
    _loser: &Combatant,
    winner_hp_fraction: f64,
    rng: &mut dyn FnMut() -> f64,
) -> String {
    let name = display_name(&winner.name);
    if winner_hp_fraction < CLOSE_FINISH_FRACTION {
        fill(pick(templates::CLOSE_FINISH, rng), &[("{winner}", name.as_str())])
    } else if winner_hp_fraction > DOMINANT_FRACTION {
        fill(pick(templates::DOMINANT, rng), &[("{winner}", name.as_str())])
    } else {
        format!("{name} wins the battle!")
    }
}

/// Quoted flavor text, if the combatant has any.
pub fn flavor_text(combatant: &Combatant) -> Option<String> {
    combatant
        .flavor_text
        .as_deref()
        .filter(|text| !text.is_empty())
        .map(|text| format!("\"{text}\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_title_cases_hyphenated_names() {
        assert_eq!(display_name("mr-mime"), "Mr Mime");
        assert_eq!(display_name("pikachu"), "Pikachu");
        assert_eq!(display_name("ho-oh"), "Ho Oh");
    }

    #[test]
    fn fill_replaces_every_occurrence() {
        let line = fill("{a} and {a} vs {b}", &[("{a}", "x"), ("{b}", "y")]);
        assert_eq!(line, "x and x vs y");
    }
}
