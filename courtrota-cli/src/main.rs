mod config;
mod output;
mod roster;
mod state;

use clap::Parser;
use courtrota_core::{Mode, Round, Side, Tournament};
use std::path::PathBuf;

use crate::config::{CourtrotaConfig, Overrides};

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "courtrota", version, about = "Fair court rotation for social doubles and team round robins")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Tournament state file (default: ./courtrota.json)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Path to config file (default: $XDG_CONFIG_HOME/courtrota/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Log scheduling details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Write a commented config template
    Init,
    /// Start a tournament from a roster
    New(NewArgs),
    /// Generate the next americano round
    Next,
    /// Enter or clear a score
    Score(ScoreArgs),
    /// Print every round and the standings
    Show,
    /// Clear all rounds and scores, keeping roster and settings
    Reset,
}

#[derive(Parser)]
struct NewArgs {
    /// File with one player (or team) per line, or a JSON array
    #[arg(long)]
    entries: Option<PathBuf>,

    /// Inline entry (repeatable)
    #[arg(long = "entry")]
    inline_entries: Vec<String>,

    /// "americano" (rotating doubles) or "teams" (fixed-team round robin)
    #[arg(long)]
    mode: Option<String>,

    /// Courts available per round
    #[arg(long)]
    courts: Option<usize>,

    /// Upper limit for --courts
    #[arg(long)]
    max_courts: Option<usize>,

    /// Balance partners and opponents by rating (americano only)
    #[arg(long)]
    ranked: bool,

    /// Seed for court-order shuffles
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser)]
struct ScoreArgs {
    /// Round number, starting at 1
    #[arg(long)]
    round: usize,

    /// Court number, starting at 1
    #[arg(long)]
    court: usize,

    /// Which side the score is for: "a" or "b"
    #[arg(long)]
    side: Option<String>,

    /// Points scored. Empty clears that side; anything non-numeric counts as 0.
    #[arg(long, allow_hyphen_values = true)]
    value: Option<String>,

    /// Clear both sides of the match
    #[arg(long, conflicts_with_all = ["side", "value"])]
    clear: bool,
}

fn parse_side(value: &str) -> Side {
    match value.to_ascii_lowercase().as_str() {
        "a" => Side::A,
        "b" => Side::B,
        other => bail(format!("Unknown side \"{other}\". Use \"a\" or \"b\".")),
    }
}

/// Convert a 1-based number from the command line to an index.
fn to_index(value: usize, what: &str) -> usize {
    value
        .checked_sub(1)
        .unwrap_or_else(|| bail(format!("--{what} starts at 1")))
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Init = cli.command {
        let path = cli.config.clone().unwrap_or_else(CourtrotaConfig::default_path);
        CourtrotaConfig::write_template(&path);
        println!("Wrote {}; uncomment the settings you want as defaults.", path.display());
        return;
    }

    let config_path = cli.config.clone().unwrap_or_else(CourtrotaConfig::default_path);
    let cfg = CourtrotaConfig::load(&config_path);
    let state_path = state::resolve_path(cli.state.clone(), cfg.state.clone());

    match cli.command {
        Commands::Init => {}
        Commands::New(args) => {
            let mut tournament = run_new(&args, &cfg);
            if tournament.mode() == Mode::RotatingDoubles {
                tournament.generate_round().unwrap_or_else(|e| bail(e));
            }
            state::save(&state_path, &tournament);
            if !cli.json {
                println!(
                    "Started {} tournament with {} entries on {} courts",
                    tournament.mode(),
                    tournament.roster().len(),
                    tournament.config().courts
                );
                println!();
            }
            print_rounds(&tournament, tournament.rounds(), cli.json);
        }
        Commands::Next => {
            let mut tournament = state::load(&state_path);
            let index = tournament.generate_round().unwrap_or_else(|e| bail(e)).index;
            state::save(&state_path, &tournament);
            print_rounds(&tournament, &tournament.rounds()[index..], cli.json);
        }
        Commands::Score(args) => {
            let mut tournament = state::load(&state_path);
            run_score(&mut tournament, &args);
            state::save(&state_path, &tournament);
            print_standings(&tournament, cli.json);
        }
        Commands::Show => {
            let tournament = state::load(&state_path);
            if cli.json {
                output::print_json(tournament.mode(), tournament.rounds(), &tournament.ranking_table());
            } else {
                output::print_rounds(tournament.rounds());
                println!();
                output::print_standings(&tournament.ranking_table(), tournament.mode());
            }
        }
        Commands::Reset => {
            let mut tournament = state::load(&state_path);
            tournament.reset();
            state::save(&state_path, &tournament);
            if !cli.json {
                println!("Tournament reset. Roster and settings kept.");
            }
            print_rounds(&tournament, tournament.rounds(), cli.json);
        }
    }
}

/// Build a tournament from the roster and settings: CLI args > config file > defaults.
fn run_new(args: &NewArgs, cfg: &CourtrotaConfig) -> Tournament {
    let config = cfg.tournament_config(&Overrides {
        mode: args.mode.as_deref(),
        courts: args.courts,
        max_courts: args.max_courts,
        ranked: args.ranked,
        seed: args.seed,
    });
    log::debug!("new tournament: {config:?}");

    let entries = roster::read_roster(args.entries.as_deref(), &args.inline_entries);
    Tournament::new(config, &entries).unwrap_or_else(|e| bail(e))
}

fn run_score(tournament: &mut Tournament, args: &ScoreArgs) {
    let round = to_index(args.round, "round");
    let court = to_index(args.court, "court");

    let result = if args.clear {
        tournament.clear_score(round, court)
    } else {
        let side = args
            .side
            .as_deref()
            .map(parse_side)
            .unwrap_or_else(|| bail("--side is required unless --clear is given"));
        let value = args
            .value
            .as_deref()
            .unwrap_or_else(|| bail("--value is required unless --clear is given"));
        tournament.enter_score_text(round, court, side, value)
    };
    // Core errors are 0-based; report what the user typed.
    result.unwrap_or_else(|_| bail(format!("No match on court {} in round {}", args.court, args.round)));
}

fn print_rounds(tournament: &Tournament, rounds: &[Round], json: bool) {
    if json {
        output::print_json(tournament.mode(), rounds, &tournament.ranking_table());
    } else {
        output::print_rounds(rounds);
    }
}

fn print_standings(tournament: &Tournament, json: bool) {
    if json {
        output::print_json(tournament.mode(), &[], &tournament.ranking_table());
    } else {
        output::print_standings(&tournament.ranking_table(), tournament.mode());
    }
}
