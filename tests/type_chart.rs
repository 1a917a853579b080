use pokeduel_engine::data::type_chart::{DamageClass, Effectiveness, TypeChart};

fn types(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_builtin_chart_has_eighteen_types() {
    let chart = TypeChart::new();
    assert_eq!(chart.len(), 18);
    assert!(chart.type_names().contains(&"fairy"));
}

#[test]
fn test_single_multipliers() {
    let chart = TypeChart::new();
    assert_eq!(chart.single_type_multiplier("water", "fire"), 2.0);
    assert_eq!(chart.single_type_multiplier("fire", "water"), 0.5);
    assert_eq!(chart.single_type_multiplier("normal", "ghost"), 0.0);
    assert_eq!(chart.single_type_multiplier("ground", "flying"), 0.0);
    assert_eq!(chart.single_type_multiplier("normal", "normal"), 1.0);
}

#[test]
fn test_unknown_attack_type_is_neutral() {
    let chart = TypeChart::new();
    assert_eq!(chart.single_type_multiplier("shadow", "fire"), 1.0);
    assert_eq!(chart.combined_multiplier("shadow", &types(&["fire", "rock"])), 1.0);
    assert_eq!(chart.damage_class("shadow"), DamageClass::Physical);
    assert_eq!(chart.type_color("shadow"), "#A8A878");
}

#[test]
fn test_combined_multiplier_is_product_and_in_closed_set() {
    let chart = TypeChart::new();
    let allowed = [0.0, 0.25, 0.5, 1.0, 2.0, 4.0];
    let names = chart.type_names();
    for attack in &names {
        for first in &names {
            for second in &names {
                if first == second {
                    continue;
                }
                let defense = types(&[*first, *second]);
                let combined = chart.combined_multiplier(attack, &defense);
                let product = chart.single_type_multiplier(attack, first) * chart.single_type_multiplier(attack, second);
                assert_eq!(combined, product, "{attack} vs {first}/{second}");
                assert!(allowed.contains(&combined), "{attack} vs {first}/{second} gave {combined}");
            }
        }
    }
}

#[test]
fn test_water_vs_fire_rock_is_quadruple() {
    let chart = TypeChart::new();
    let choice = chart
        .best_attack_type(&types(&["water"]), &types(&["fire", "rock"]))
        .expect("attacker has a type");
    assert_eq!(choice.attack_type, "water");
    assert_eq!(choice.multiplier, 4.0);
    assert_eq!(Effectiveness::from_multiplier(choice.multiplier), Effectiveness::DoublySuperEffective);
}

#[test]
fn test_best_attack_type_prefers_higher_then_first() {
    let chart = TypeChart::new();
    // Electric hits water for 2x, fire only 0.5x.
    let choice = chart
        .best_attack_type(&types(&["fire", "electric"]), &types(&["water"]))
        .expect("choice");
    assert_eq!(choice.attack_type, "electric");

    // Both neutral against normal: the first listed type wins.
    let choice = chart
        .best_attack_type(&types(&["psychic", "dragon"]), &types(&["normal"]))
        .expect("choice");
    assert_eq!(choice.attack_type, "psychic");
    assert_eq!(choice.multiplier, 1.0);
}

#[test]
fn test_all_immune_returns_first_type_with_zero() {
    let chart = TypeChart::new();
    let choice = chart
        .best_attack_type(&types(&["normal"]), &types(&["ghost"]))
        .expect("choice");
    assert_eq!(choice.attack_type, "normal");
    assert_eq!(choice.multiplier, 0.0);
    assert!(chart.best_attack_type(&[], &types(&["ghost"])).is_none());
}

#[test]
fn test_effectiveness_labels() {
    assert_eq!(Effectiveness::from_multiplier(0.0).as_str(), "immune");
    assert_eq!(Effectiveness::from_multiplier(0.25).as_str(), "doubly-resisted");
    assert_eq!(Effectiveness::from_multiplier(0.5).as_str(), "not-effective");
    assert_eq!(Effectiveness::from_multiplier(1.0).as_str(), "neutral");
    assert_eq!(Effectiveness::from_multiplier(2.0).as_str(), "super-effective");
    assert_eq!(Effectiveness::from_multiplier(4.0).as_str(), "doubly-super-effective");
    assert_eq!(Effectiveness::from_multiplier(3.0), Effectiveness::Neutral);
}

#[test]
fn test_load_from_json_accepts_array_and_object() {
    let array = r##"[
        {"id": 11, "name": "Water", "move_damage_class": "special", "color": "#6890F0",
         "damage_relations": {"double_damage_to": ["fire"], "half_damage_to": ["water"]}},
        {"id": 10, "name": "fire",
         "damage_relations": {"double_damage_to": ["grass"], "half_damage_to": ["water"]}}
    ]"##;
    let chart = TypeChart::load_from_json_str(array).expect("array form");
    assert_eq!(chart.len(), 2);
    assert_eq!(chart.single_type_multiplier("water", "fire"), 2.0);
    assert_eq!(chart.damage_class("water"), DamageClass::Special);
    assert_eq!(chart.damage_class("fire"), DamageClass::Physical);
    assert_eq!(chart.type_color("fire"), "#A8A878");

    let object = r#"{"ghost": {"name": "ghost", "damage_relations": {"no_damage_to": ["normal"]}}}"#;
    let chart = TypeChart::load_from_json_str(object).expect("object form");
    assert_eq!(chart.single_type_multiplier("ghost", "normal"), 0.0);
}

#[test]
fn test_load_from_json_rejects_garbage() {
    assert!(TypeChart::load_from_json_str("not json").is_err());
}
