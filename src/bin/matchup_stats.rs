use pokeduel_engine::commentary::display_name;
use pokeduel_engine::config::roster_path_from_env;
use pokeduel_engine::core::rng::{seeded, thread_source};
use pokeduel_engine::driver::batch::MatchupSummary;
use pokeduel_engine::{simulate_matchup, BattleEngine, EngineConfig, Roster, Side, TypeChart};
use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct Config {
    one: Option<String>,
    two: Option<String>,
    runs: u32,
    seed: Option<u64>,
    csv_path: Option<PathBuf>,
    roster_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            one: None,
            two: None,
            runs: 1000,
            seed: None,
            csv_path: None,
            roster_path: roster_path_from_env(),
        }
    }
}

fn parse_args() -> Config {
    let mut config = Config::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                if i + 1 < args.len() {
                    config.runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--csv" => {
                if i + 1 < args.len() {
                    config.csv_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--roster" => {
                if i + 1 < args.len() {
                    config.roster_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                if config.one.is_none() {
                    config.one = Some(other.to_string());
                } else if config.two.is_none() {
                    config.two = Some(other.to_string());
                }
            }
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!(
        r#"Matchup Stats - Simulate repeated battles between two combatants

USAGE:
    matchup-stats <ONE> <TWO> [OPTIONS]

OPTIONS:
    --runs <N>         Number of battles to simulate (default: 1000)
    --seed <N>         Seed for reproducible runs
    --csv <PATH>       Write one row per battle to a CSV file
    --roster <PATH>    Roster JSON file (default: built-in roster)
    -h, --help         Print this help

ENVIRONMENT:
    POKEDUEL_ROSTER, POKEDUEL_CONFIG, POKEDUEL_MAX_TURNS,
    POKEDUEL_HP_SCALE, POKEDUEL_IMMUNE_DAMAGE
"#
    );
}

fn write_csv(path: &Path, summary: &MatchupSummary) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in &summary.records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = parse_args();
    let (Some(one_name), Some(two_name)) = (config.one.as_deref(), config.two.as_deref()) else {
        print_help();
        return Err("two combatant names are required".into());
    };

    let roster = match &config.roster_path {
        Some(path) => Roster::load_from_json_file(path)?,
        None => Roster::load_default()?,
    };
    let one = roster.get_required(one_name)?;
    let two = roster.get_required(two_name)?;
    let engine = BattleEngine::new(TypeChart::default(), EngineConfig::from_env()?);

    let summary = match config.seed {
        Some(seed) => simulate_matchup(&engine, one, two, config.runs, &mut seeded(seed))?,
        None => simulate_matchup(&engine, one, two, config.runs, &mut thread_source())?,
    };

    let name_one = display_name(&summary.one);
    let name_two = display_name(&summary.two);
    println!("{} vs {} over {} battles", name_one, name_two, summary.runs);
    println!("=========================================");
    println!(
        "  {:<14} {:>6} wins  {:>6.1}%",
        name_one,
        summary.wins(Side::One),
        summary.win_rate(Side::One) * 100.0
    );
    println!(
        "  {:<14} {:>6} wins  {:>6.1}%",
        name_two,
        summary.wins(Side::Two),
        summary.win_rate(Side::Two) * 100.0
    );
    println!("  Mean turns: {:.1}", summary.mean_turns);
    println!("  Decided on the turn limit: {}", summary.turn_limit_finishes);

    if let Some(path) = &config.csv_path {
        write_csv(path, &summary)?;
        println!("  Wrote {} rows to {:?}", summary.records.len(), path);
    }

    Ok(())
}
