use pokeduel_engine::commentary::{display_name, flavor_text, narrate_battle_start, narrate_turn, narrate_victory};
use pokeduel_engine::core::state::{Side, TurnLogEntry};
use pokeduel_engine::data::roster::{BaseStats, Combatant, RarityTier};
use pokeduel_engine::data::type_chart::Effectiveness;

fn create_combatant(name: &str, rarity_tier: RarityTier) -> Combatant {
    Combatant {
        id: 0,
        name: name.to_string(),
        types: vec!["normal".to_string()],
        stats: BaseStats {
            hp: 50,
            attack: 50,
            defense: 50,
            special_attack: 50,
            special_defense: 50,
            speed: 50,
        },
        rarity_tier,
        is_legendary: rarity_tier == RarityTier::Legendary,
        is_mythical: rarity_tier == RarityTier::Mythical,
        flavor_text: None,
    }
}

fn entry(effectiveness: Effectiveness, is_critical: bool, damage: u32, defender_hp: u32) -> TurnLogEntry {
    TurnLogEntry {
        turn: 1,
        attacker: "pikachu".to_string(),
        defender: "mr-mime".to_string(),
        attacker_side: Side::One,
        attack_type: "electric".to_string(),
        damage,
        effectiveness,
        is_critical,
        attacker_hp: 105,
        defender_hp,
    }
}

fn first_choice() -> f64 {
    0.0
}

#[test]
fn test_names_are_title_cased() {
    assert_eq!(display_name("mr-mime"), "Mr Mime");
    assert_eq!(display_name("tapu-koko"), "Tapu Koko");
}

#[test]
fn test_neutral_turn_line() {
    let pikachu = create_combatant("pikachu", RarityTier::Uncommon);
    let mime = create_combatant("mr-mime", RarityTier::Uncommon);
    let line = narrate_turn(&entry(Effectiveness::Neutral, false, 18, 90), &pikachu, &mime, 120, &mut first_choice);
    assert_eq!(line, "Pikachu strikes with a Electric attack! (-18 HP)");
}

#[test]
fn test_critical_takes_precedence() {
    let pikachu = create_combatant("pikachu", RarityTier::Uncommon);
    let mime = create_combatant("mr-mime", RarityTier::Uncommon);
    let line = narrate_turn(
        &entry(Effectiveness::SuperEffective, true, 40, 80),
        &pikachu,
        &mime,
        120,
        &mut first_choice,
    );
    assert_eq!(line, "A critical hit! Pikachu shows no mercy! (-40 HP)");
}

#[test]
fn test_effectiveness_picks_template_set() {
    let pikachu = create_combatant("pikachu", RarityTier::Uncommon);
    let mime = create_combatant("mr-mime", RarityTier::Uncommon);
    let cases = [
        (Effectiveness::Immune, "The Electric attack passes right through Mr Mime! (-1 HP)"),
        (
            Effectiveness::DoublySuperEffective,
            "DEVASTATING! Pikachu's Electric attack deals quadruple damage! (-1 HP)",
        ),
        (
            Effectiveness::SuperEffective,
            "Pikachu lands a devastating Electric attack! It's super effective! (-1 HP)",
        ),
        (Effectiveness::DoublyResisted, "The Electric attack is almost completely ineffective! (-1 HP)"),
        (Effectiveness::NotEffective, "Mr Mime shrugs off the Electric attack... (-1 HP)"),
    ];
    for (effectiveness, expected) in cases {
        let line = narrate_turn(&entry(effectiveness, false, 1, 100), &pikachu, &mime, 120, &mut first_choice);
        assert_eq!(line, expected);
    }
}

#[test]
fn test_low_health_callout_below_quarter() {
    let pikachu = create_combatant("pikachu", RarityTier::Uncommon);
    let mime = create_combatant("mr-mime", RarityTier::Uncommon);
    let line = narrate_turn(&entry(Effectiveness::Neutral, false, 20, 29), &pikachu, &mime, 120, &mut first_choice);
    assert_eq!(
        line,
        "Pikachu strikes with a Electric attack! (-20 HP) Mr Mime is hanging on by a thread!"
    );
    // Exactly a quarter is not low yet.
    let line = narrate_turn(&entry(Effectiveness::Neutral, false, 20, 30), &pikachu, &mime, 120, &mut first_choice);
    assert!(!line.contains("thread"));
}

#[test]
fn test_knockout_replaces_damage_suffix() {
    let pikachu = create_combatant("pikachu", RarityTier::Uncommon);
    let mime = create_combatant("mr-mime", RarityTier::Uncommon);
    let line = narrate_turn(&entry(Effectiveness::Neutral, false, 25, 0), &pikachu, &mime, 120, &mut first_choice);
    assert_eq!(line, "Pikachu strikes with a Electric attack! Mr Mime faints! Pikachu wins!");
    assert!(!line.contains("HP)"));
}

#[test]
fn test_battle_start_callouts() {
    let mewtwo = create_combatant("mewtwo", RarityTier::Legendary);
    let magikarp = create_combatant("magikarp", RarityTier::Common);
    let lines = narrate_battle_start(&mewtwo, &magikarp, Side::One, &mut first_choice);
    assert_eq!(
        lines,
        vec![
            "The battle begins! Mewtwo vs Magikarp!".to_string(),
            "The legendary Mewtwo enters the arena!".to_string(),
            "Can Magikarp overcome the odds against Mewtwo?".to_string(),
            "Mewtwo moves first with superior speed!".to_string(),
        ]
    );
}

#[test]
fn test_battle_start_without_mismatch() {
    let mew = create_combatant("mew", RarityTier::Mythical);
    let mewtwo = create_combatant("mewtwo", RarityTier::Legendary);
    let lines = narrate_battle_start(&mewtwo, &mew, Side::Two, &mut first_choice);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[2], "The mythical Mew manifests!");
    assert_eq!(lines[3], "Mew moves first with superior speed!");
}

#[test]
fn test_victory_thresholds() {
    let winner = create_combatant("snorlax", RarityTier::UltraRare);
    let loser = create_combatant("rattata", RarityTier::Common);
    let mut rng = first_choice;
    assert_eq!(
        narrate_victory(&winner, &loser, 0.2, &mut rng),
        "What a close battle! Snorlax barely survives!"
    );
    assert_eq!(narrate_victory(&winner, &loser, 0.8, &mut rng), "Snorlax dominates completely!");
    assert_eq!(narrate_victory(&winner, &loser, 0.5, &mut rng), "Snorlax wins the battle!");
    assert_eq!(narrate_victory(&winner, &loser, 0.3, &mut rng), "Snorlax wins the battle!");
    assert_eq!(narrate_victory(&winner, &loser, 0.7, &mut rng), "Snorlax wins the battle!");
}

#[test]
fn test_flavor_text_is_quoted() {
    let mut mew = create_combatant("mew", RarityTier::Mythical);
    assert_eq!(flavor_text(&mew), None);
    mew.flavor_text = Some("So rare it is still said to be a mirage.".to_string());
    assert_eq!(
        flavor_text(&mew).as_deref(),
        Some("\"So rare it is still said to be a mirage.\"")
    );
}
