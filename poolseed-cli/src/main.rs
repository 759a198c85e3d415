mod config;
mod generate;
mod output;
mod roster;

use clap::Parser;
use poolseed_core::{assign_pools_with, constants::MAX_RESOLVE_ROUNDS, AssignOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::PoolseedConfig;
use crate::roster::{load_roster, parse_delimiter, LoadOptions};

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "poolseed", version, about = "Seed a fencing tournament roster into balanced pools")]
struct Cli {
    /// Show progress and every swap the resolver makes
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Assign the competitors in a roster file to pools
    Assign(AssignArgs),
    /// Write a random roster for trying things out
    Generate(GenerateArgs),
    /// Create a default config file at ~/.config/poolseed/config.toml
    Init,
}

#[derive(Parser)]
struct AssignArgs {
    /// Roster file: one `last name, first name, club, rank` row per competitor
    file: PathBuf,

    /// Output JSON instead of the text report
    #[arg(long, overrides_with = "text")]
    json: bool,

    /// Output the text report even if the config asks for JSON
    #[arg(long, overrides_with = "json")]
    text: bool,

    /// Print the competitor list before the pools
    #[arg(long, overrides_with = "no_roster")]
    roster: bool,

    /// Skip the competitor list and print only the pools
    #[arg(long, overrides_with = "roster")]
    no_roster: bool,

    /// Fixed number of pools (default: chosen from the roster size)
    #[arg(long)]
    pools: Option<usize>,

    /// Cap on conflict-resolution rounds
    #[arg(long)]
    max_rounds: Option<usize>,

    /// Field delimiter, e.g. ";" or "tab"
    #[arg(long)]
    delimiter: Option<String>,

    /// Abort on a row with an invalid rank instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Path to config file (default: ~/.config/poolseed/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct GenerateArgs {
    /// Number of competitors
    #[arg(long, default_value_t = generate::DEFAULT_ROWS)]
    rows: usize,

    /// Seed for a reproducible roster
    #[arg(long)]
    seed: Option<u64>,

    /// Write to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .unwrap_or_else(|e| bail(format!("Failed to install logger: {e}")));
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Assign(args) => run_assign(args),
        Commands::Generate(args) => run_generate(args),
        Commands::Init => {
            let path = config::create_default_config().unwrap_or_else(|e| bail(e));
            println!("Created config at {}", path.display());
            println!("Edit it to set your default pool count, delimiter, etc.");
        }
    }
}

/// Effective `assign` settings after merging the config file.
#[derive(Debug, PartialEq, Eq)]
struct AssignSettings {
    delimiter: u8,
    num_pools: Option<usize>,
    max_rounds: usize,
    json: bool,
    show_roster: bool,
}

/// Merge CLI args over config values. Each boolean has a flag pair
/// (`--json`/`--text`, `--roster`/`--no-roster`) so either config value
/// can be overridden.
fn settings(args: &AssignArgs, cfg: &PoolseedConfig) -> Result<AssignSettings, String> {
    let delimiter = args.delimiter.as_deref().or(cfg.delimiter.as_deref()).unwrap_or(",");
    let delimiter = parse_delimiter(delimiter)?;

    let num_pools = match (args.pools, cfg.pools) {
        (Some(0), _) => return Err("--pools must be at least 1".to_string()),
        (Some(n), _) => Some(n),
        (None, Some(0)) => return Err("pools in the config file must be at least 1".to_string()),
        (None, cfg_pools) => cfg_pools,
    };

    let json = flag_pair(args.json, args.text).or(cfg.json).unwrap_or(false);
    let show_roster = flag_pair(args.roster, args.no_roster).or(cfg.show_roster).unwrap_or(true);

    Ok(AssignSettings {
        delimiter,
        num_pools,
        max_rounds: args.max_rounds.or(cfg.max_rounds).unwrap_or(MAX_RESOLVE_ROUNDS),
        json,
        show_roster,
    })
}

fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn run_assign(args: AssignArgs) {
    let cfg = match args.config.clone().or_else(config::default_config_path) {
        Some(path) => config::load_config(&path).unwrap_or_else(|e| bail(e)),
        None => PoolseedConfig::default(),
    };
    let AssignSettings {
        delimiter,
        num_pools,
        max_rounds,
        json,
        show_roster,
    } = settings(&args, &cfg).unwrap_or_else(|e| bail(e));

    let load_options = LoadOptions {
        delimiter,
        strict: args.strict,
    };
    let loaded = load_roster(&args.file, &load_options).unwrap_or_else(|e| bail(e));

    info!(
        competitors = loaded.roster.len(),
        malformed = loaded.malformed_rows,
        invalid_ranks = loaded.invalid_ranks,
        "loaded roster from {}",
        args.file.display()
    );
    if loaded.roster.is_empty() {
        warn!("roster has no valid competitors");
    }

    let options = AssignOptions {
        num_pools,
        max_rounds,
    };
    let result = assign_pools_with(&loaded.roster, &options);

    let report = result.report;
    if report.converged {
        info!(
            pools = result.num_pools(),
            rounds = report.rounds,
            swaps = report.swaps(),
            "pools balanced"
        );
    } else {
        warn!(
            pools = result.num_pools(),
            rounds = report.rounds,
            swaps = report.swaps(),
            stalled = report.stalled_rounds,
            "club conflicts remain; pools are best effort"
        );
    }

    if json {
        output::print_json(&result);
    } else {
        output::print_table(&loaded.roster, &result, show_roster);
    }
}

fn run_generate(args: GenerateArgs) {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let rows = generate::generate_rows(args.rows, &mut rng);

    let written = match &args.out {
        Some(path) => {
            let file = std::fs::File::create(path)
                .unwrap_or_else(|e| bail(format!("Failed to create {}: {e}", path.display())));
            generate::write_rows(file, &rows)
        }
        None => generate::write_rows(io::stdout().lock(), &rows),
    };
    written.unwrap_or_else(|e| bail(format!("Failed to write roster: {e}")));

    if let Some(path) = &args.out {
        info!(rows = rows.len(), "wrote roster to {}", path.display());
    }
}
