use inquire::{Confirm, Select};
use pokeduel_engine::commentary::{display_name, flavor_text};
use pokeduel_engine::config::{playback_speed_from_env, roster_path_from_env};
use pokeduel_engine::core::rng::thread_source;
use pokeduel_engine::{
    BattleEngine, BattleSession, Combatant, EngineConfig, PlaybackSpeed, Roster, Side, TypeChart,
};
use std::error::Error;

const HP_BAR_WIDTH: usize = 20;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::from_env()?;
    let roster = match roster_path_from_env() {
        Some(path) => Roster::load_from_json_file(&path)?,
        None => Roster::load_default()?,
    };
    if roster.len() < 2 {
        return Err("the roster needs at least two combatants".into());
    }
    let mut speed = playback_speed_from_env().unwrap_or_default();

    let engine = BattleEngine::new(TypeChart::default(), config);
    let mut rng = thread_source();

    println!("=========================================");
    println!("        Who would win? Battle CLI");
    println!("=========================================");
    println!();

    loop {
        let one = pick_combatant(&roster, "Choose the first combatant:")?;
        let two = pick_combatant(&roster, "Choose the second combatant:")?;
        let mut session = BattleSession::new(&engine, one, two, &mut rng)?;

        loop {
            let watch = Select::new("How do you want to see the battle?", vec!["Watch it play out", "Skip to the result"])
                .prompt()?
                .starts_with("Watch");

            if watch {
                speed = pick_speed(speed)?;
                session.set_speed(speed);
                play(&mut session, &mut rng).await?;
            } else {
                let decision = session.skip_to_end(&mut rng)?;
                for line in session.commentary() {
                    println!("  {}", line);
                }
                println!("  ({:?})", decision);
            }
            print_result(&session);

            if !Confirm::new("Rematch?").with_default(true).prompt()? {
                break;
            }
            session.rematch(&mut rng)?;
        }

        if !Confirm::new("Pick a new pair?").with_default(false).prompt()? {
            break;
        }
    }

    Ok(())
}

fn pick_combatant(roster: &Roster, message: &str) -> Result<Combatant, Box<dyn Error>> {
    let names = roster.names();
    let labels: Vec<String> = names
        .iter()
        .filter_map(|name| roster.get(name))
        .map(|c| format!("{} [{}] total {}", display_name(&c.name), c.types.join("/"), c.total_stats()))
        .collect();
    let choice = Select::new(message, labels).with_page_size(12).raw_prompt()?;
    let combatant = roster.get_required(names[choice.index])?;
    Ok(combatant.clone())
}

fn pick_speed(current: PlaybackSpeed) -> Result<PlaybackSpeed, Box<dyn Error>> {
    let options = vec![PlaybackSpeed::Slow, PlaybackSpeed::Normal, PlaybackSpeed::Fast];
    let cursor = options.iter().position(|s| *s == current).unwrap_or(1);
    let labels: Vec<&str> = options.iter().map(|s| s.as_str()).collect();
    let choice = Select::new("Playback speed:", labels)
        .with_starting_cursor(cursor)
        .raw_prompt()?;
    Ok(options[choice.index])
}

async fn play(session: &mut BattleSession<'_>, rng: &mut dyn FnMut() -> f64) -> Result<(), Box<dyn Error>> {
    session.start(rng);
    let mut seen = print_new_lines(session, 0);

    let mut interval = tokio::time::interval(session.tick_interval());
    interval.tick().await;
    while !session.is_finished() {
        interval.tick().await;
        let turn = session.tick(rng)?;
        seen = print_new_lines(session, seen);
        if turn.is_some() {
            print_hp(session);
        }
    }
    Ok(())
}

fn print_new_lines(session: &BattleSession<'_>, seen: usize) -> usize {
    let lines = session.commentary_since(seen);
    for line in lines {
        println!("  {}", line);
    }
    seen + lines.len()
}

fn print_hp(session: &BattleSession<'_>) {
    let state = session.state();
    for side in [Side::One, Side::Two] {
        println!(
            "    {:<12} {} {}/{}",
            display_name(&session.combatant(side).name),
            hp_bar(state.hp(side), state.max_hp(side)),
            state.hp(side),
            state.max_hp(side)
        );
    }
}

fn hp_bar(hp: u32, max_hp: u32) -> String {
    let filled = if max_hp == 0 {
        0
    } else {
        (hp as usize * HP_BAR_WIDTH).div_ceil(max_hp as usize)
    };
    format!("{}{}", "#".repeat(filled), "-".repeat(HP_BAR_WIDTH - filled))
}

fn print_result(session: &BattleSession<'_>) {
    let Some(result) = session.result() else {
        return;
    };
    let winner = session.combatant(result.winner);
    println!();
    println!("Winner: {}", display_name(&winner.name));
    println!(
        "Turns: {}  Remaining HP: {}/{}",
        result.total_turns, result.winner_remaining_hp, result.winner_max_hp
    );
    println!(
        "Damage dealt: {} {}  {} {}",
        display_name(&session.combatant(Side::One).name),
        result.total_damage_dealt.one,
        display_name(&session.combatant(Side::Two).name),
        result.total_damage_dealt.two
    );
    if let Some(text) = flavor_text(winner) {
        println!("{}", text);
    }
    println!();
}
