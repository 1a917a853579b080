use pokeduel_engine::config::EngineConfig;
use pokeduel_engine::core::battle::BattleEngine;
use pokeduel_engine::core::rng::seeded;
use pokeduel_engine::core::state::{BattleStatus, PlaybackSpeed, Side};
use pokeduel_engine::data::roster::{BaseStats, Combatant, RarityTier};
use pokeduel_engine::data::type_chart::TypeChart;
use pokeduel_engine::driver::batch::{run_to_completion, simulate_matchup, Decision};
use pokeduel_engine::driver::session::BattleSession;

fn create_combatant(name: &str, types: &[&str], value: u32, speed: u32) -> Combatant {
    Combatant {
        id: 7,
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        stats: BaseStats {
            hp: value,
            attack: value,
            defense: value,
            special_attack: value,
            special_defense: value,
            speed,
        },
        rarity_tier: RarityTier::Rare,
        is_legendary: false,
        is_mythical: false,
        flavor_text: None,
    }
}

#[test]
fn test_identical_combatants_finish_with_one_winner() {
    let engine = BattleEngine::default();
    let one = create_combatant("mirror", &["normal"], 100, 100);
    let two = one.clone();
    let mut rng = seeded(2024);
    for _ in 0..50 {
        let result = run_to_completion(&engine, &one, &two, &mut rng).expect("battle");
        assert!(result.total_turns <= 100);
        assert_ne!(result.winner, result.loser);
        assert_eq!(result.log.len() as u32, result.total_turns);
        assert_eq!(result.decision, Decision::Knockout);
        assert!(result.winner_remaining_hp > 0);
    }
}

#[test]
fn test_damage_totals_are_split_by_side() {
    let engine = BattleEngine::default();
    let one = create_combatant("mirror", &["normal"], 100, 120);
    let two = create_combatant("mirror", &["normal"], 100, 80);
    let result = run_to_completion(&engine, &one, &two, &mut seeded(8)).expect("battle");

    let dealt_by_one: u32 = result
        .log
        .iter()
        .filter(|entry| entry.attacker_side == Side::One)
        .map(|entry| entry.damage)
        .sum();
    let dealt_by_two: u32 = result
        .log
        .iter()
        .filter(|entry| entry.attacker_side == Side::Two)
        .map(|entry| entry.damage)
        .sum();
    assert_eq!(result.total_damage_dealt.one, dealt_by_one);
    assert_eq!(result.total_damage_dealt.two, dealt_by_two);
    assert_eq!(result.total_damage_dealt.get(Side::One), dealt_by_one);
}

#[test]
fn test_turn_limit_decides_by_remaining_hp() {
    let engine = BattleEngine::new(
        TypeChart::new(),
        EngineConfig {
            max_turns: 3,
            ..EngineConfig::default()
        },
    );
    let one = create_combatant("tank", &["normal"], 255, 90);
    let two = create_combatant("wall", &["normal"], 255, 10);
    let result = run_to_completion(&engine, &one, &two, &mut seeded(4)).expect("battle");
    // Side one attacked twice and side two once, so side two is further down.
    assert_eq!(result.decision, Decision::TurnLimit);
    assert_eq!(result.total_turns, 3);
    assert_eq!(result.winner, Side::One);
    assert_eq!(result.winner_name, "tank");
    assert_eq!(result.loser_name, "wall");
    assert_eq!(result.winner_max_hp, 765);
}

#[test]
fn test_skip_after_watching_gets_a_full_turn_budget() {
    let engine = BattleEngine::new(
        TypeChart::new(),
        EngineConfig {
            max_turns: 3,
            ..EngineConfig::default()
        },
    );
    let one = create_combatant("tank", &["normal"], 255, 90);
    let two = create_combatant("wall", &["normal"], 255, 10);
    let mut rng = seeded(4);
    let mut session = BattleSession::new(&engine, one, two, &mut rng).expect("session");
    session.start(&mut rng);
    // Ticking is not capped, so the watched part can run past max_turns.
    for _ in 0..4 {
        session.tick(&mut rng).expect("tick");
    }
    assert_eq!(session.state().log.len(), 4);

    let decision = session.skip_to_end(&mut rng).expect("skip");
    assert_eq!(decision, Decision::TurnLimit);
    assert_eq!(session.state().log.len(), 7);
    assert_eq!(session.state().status, BattleStatus::Finished);
}

#[test]
fn test_turn_limit_tie_goes_to_side_one() {
    let engine = BattleEngine::new(
        TypeChart::new(),
        EngineConfig {
            max_turns: 2,
            ..EngineConfig::default()
        },
    );
    // Ghost and normal cannot hurt each other beyond the one damage floor.
    let one = create_combatant("spirit", &["ghost"], 200, 10);
    let two = create_combatant("plain", &["normal"], 200, 90);
    let result = run_to_completion(&engine, &one, &two, &mut seeded(6)).expect("battle");
    assert_eq!(result.decision, Decision::TurnLimit);
    assert_eq!(result.winner, Side::One);
    assert_eq!(result.winner_remaining_hp, 599);
}

#[test]
fn test_stronger_combatant_wins_most_matchups() {
    let engine = BattleEngine::default();
    let strong = create_combatant("strong", &["normal"], 120, 120);
    let weak = create_combatant("weak", &["normal"], 60, 60);
    let summary = simulate_matchup(&engine, &strong, &weak, 1000, &mut seeded(99)).expect("simulate");
    assert_eq!(summary.runs, 1000);
    assert_eq!(summary.wins(Side::One) + summary.wins(Side::Two), 1000);
    assert!(summary.win_rate(Side::One) > 0.85);
    assert_eq!(summary.records.len(), 1000);
    assert_eq!(summary.turn_limit_finishes, 0);
    assert!(summary.mean_turns > 1.0);
}

#[test]
fn test_simulate_with_no_runs() {
    let engine = BattleEngine::default();
    let one = create_combatant("a", &["fire"], 50, 50);
    let two = create_combatant("b", &["water"], 50, 50);
    let summary = simulate_matchup(&engine, &one, &two, 0, &mut seeded(1)).expect("simulate");
    assert_eq!(summary.win_rate(Side::One), 0.0);
    assert_eq!(summary.mean_turns, 0.0);
    assert!(summary.records.is_empty());
}

#[test]
fn test_session_ticks_and_narrates() {
    let engine = BattleEngine::default();
    let one = create_combatant("squirtle", &["water"], 60, 70);
    let two = create_combatant("charmander", &["fire"], 60, 50);
    let mut rng = seeded(12);
    let mut session = BattleSession::new(&engine, one, two, &mut rng).expect("session");

    // Ticking before the start does nothing.
    assert!(session.tick(&mut rng).expect("tick").is_none());
    assert!(session.commentary().is_empty());

    session.start(&mut rng);
    let opening = session.commentary().len();
    assert!(opening >= 2);
    assert_eq!(session.state().status, BattleStatus::Fighting);

    let entry = session.tick(&mut rng).expect("tick").expect("turn entry");
    assert_eq!(entry.turn, 1);
    assert_eq!(entry.attacker, "squirtle");
    assert_eq!(session.commentary().len(), opening + 1);
    assert_eq!(session.commentary_since(opening).len(), 1);

    session.pause();
    assert!(session.tick(&mut rng).expect("tick").is_none());
    assert_eq!(session.state().log.len(), 1);
    session.toggle_pause();
    assert_eq!(session.state().status, BattleStatus::Fighting);

    while !session.is_finished() {
        session.tick(&mut rng).expect("tick");
    }
    let turns = session.state().log.len();
    // Opening lines, one line per turn, then the victory line.
    assert_eq!(session.commentary().len(), opening + turns + 1);
    let result = session.result().expect("finished");
    assert_eq!(result.decision, Decision::Knockout);
}

#[test]
fn test_session_skip_and_rematch() {
    let engine = BattleEngine::default();
    let one = create_combatant("pikachu", &["electric"], 70, 90);
    let two = create_combatant("gyarados", &["water", "flying"], 70, 80);
    let mut rng = seeded(77);
    let mut session = BattleSession::new(&engine, one, two, &mut rng).expect("session");
    session.set_speed(PlaybackSpeed::Fast);
    assert_eq!(session.tick_interval().as_millis(), 300);

    let decision = session.skip_to_end(&mut rng).expect("skip");
    assert_eq!(decision, Decision::Knockout);
    assert!(session.is_finished());
    let turns = session.state().log.len();
    assert!(session.commentary().len() > turns + 1);
    assert_eq!(session.state().winner, Some(Side::One));

    // Skipping a finished battle changes nothing.
    let lines = session.commentary().len();
    session.skip_to_end(&mut rng).expect("skip");
    assert_eq!(session.commentary().len(), lines);

    session.rematch(&mut rng).expect("rematch");
    assert_eq!(session.state().status, BattleStatus::Idle);
    assert!(session.state().log.is_empty());
    assert!(session.commentary().is_empty());
    assert_eq!(session.state().speed, PlaybackSpeed::Fast);
}
