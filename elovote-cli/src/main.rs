mod config;
mod output;
mod parse;
mod prompt;

use clap::Parser;
use elovote_core::{
    rank, reconcile, EloConfig, EloError, RankingWindow, RatingStore, RatingTable,
    ReconcilePolicy, VotingEngine,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{ElovoteConfig, DEFAULT_DATA_PATH, DEFAULT_LIST_PATH};
use crate::parse::{parse_names, parse_vote, Vote};

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "elovote", version, about = "Rank a list of items by voting on pairs")]
struct Cli {
    /// Log selection and update details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Vote on pairs interactively; ratings are saved after every vote
    Vote(VoteArgs),
    /// Print the current ranking
    Rank(RankArgs),
    /// Add new names from the candidate list to the rating table
    Sync(SyncArgs),
    /// Create a default config file at ~/.config/elovote/config.toml
    Init,
}

#[derive(clap::Args)]
struct StoreArgs {
    /// Rating table JSON file (default: data/items.json)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Candidate list, one name per line (default: data/items.txt)
    #[arg(long)]
    list: Option<PathBuf>,

    /// Path to config file (default: ~/.config/elovote/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct VoteArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Fixed random seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Keep one item of the last pair in the next one
    #[arg(long)]
    chain: bool,

    /// Discard the existing rating table and start over from the list
    #[arg(long)]
    reset: bool,
}

#[derive(Parser)]
struct RankArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Number of items shown from the top
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Number of items shown from the bottom
    #[arg(long, default_value_t = 10)]
    bottom: usize,

    /// Show every item
    #[arg(long)]
    all: bool,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct SyncArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Also drop names that are no longer in the list
    #[arg(long)]
    prune: bool,
}

/// Paths and tuning after merging CLI args over the config file.
struct Settings {
    data: PathBuf,
    list: PathBuf,
    elo: EloConfig,
    file: ElovoteConfig,
}

impl Settings {
    fn resolve(args: &StoreArgs) -> Self {
        let config_path = args.config.clone().unwrap_or_else(config::config_path);
        let mut file = config::load_config(&config_path);

        let data = args.data.clone()
            .or_else(|| file.data.clone().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let list = args.list.clone()
            .or_else(|| file.list.clone().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LIST_PATH));

        let elo = std::mem::take(&mut file.elo);
        if let Err(e) = elo.validate() {
            bail(format!("{e} (in {})", config_path.display()));
        }

        Settings { data, list, elo, file }
    }
}

/// Read the candidate list. A missing list is only fatal when `required`.
fn load_names(path: &Path, required: bool) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_names(&content)
            .unwrap_or_else(|e| bail(format!("List {} looks like JSON but failed to parse: {e}", path.display()))),
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
            warn!(path = %path.display(), "candidate list not found, using saved table only");
            Vec::new()
        }
        Err(e) => bail(format!("Failed to read candidate list {}: {e}", path.display())),
    }
}

fn load_table(store: &RatingStore, names: &[String], elo: &EloConfig) -> RatingTable {
    store.load(names, elo).unwrap_or_else(|e| match e {
        EloError::DataCorruption { .. } => {
            bail(format!("{e}\nRun `elovote vote --reset` to discard it and start over from the list."))
        }
        other => bail(other),
    })
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "elovote=debug,elovote_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Vote(args) => run_vote(args),
        Commands::Rank(args) => run_rank(args),
        Commands::Sync(args) => run_sync(args),
        Commands::Init => {
            let path = config::config_path();
            config::create_default_config(&path);
            println!("Created config at {}", path.display());
            println!("Edit it to set your data and list paths, seed, etc.");
        }
    }
}

fn run_vote(args: VoteArgs) {
    let settings = Settings::resolve(&args.store);
    let store = RatingStore::new(&settings.data);

    if args.reset {
        match store.discard() {
            Ok(true) => info!(path = %settings.data.display(), "starting over from the candidate list"),
            Ok(false) => {}
            Err(e) => bail(e),
        }
    }

    let names = load_names(&settings.list, !store.exists());
    let table = load_table(&store, &names, &settings.elo);
    if table.len() < 2 {
        bail(format!("Need at least 2 items to vote, got {}", table.len()));
    }

    let seed = args.seed.or(settings.file.seed);
    let engine = match seed {
        Some(seed) => VotingEngine::seeded(table, settings.elo, seed),
        None => VotingEngine::new(table, settings.elo),
    };
    let mut engine = engine.unwrap_or_else(|e| bail(e));
    let chain = args.chain || settings.file.chain.unwrap_or(false);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut anchor: Option<String> = None;

    loop {
        let matchup = engine.next_matchup(anchor.as_deref()).unwrap_or_else(|e| bail(e));
        print!("\n{}", prompt::build_vote_prompt(&matchup, engine.table()));
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => bail(format!("Failed to read from stdin: {e}")),
            None => break,
        };

        let winner = match parse_vote(&line) {
            Vote::First => matchup.first.clone(),
            Vote::Second => matchup.second.clone(),
            Vote::Skip => {
                anchor = None;
                continue;
            }
            Vote::Quit => break,
        };

        let outcome = engine.record(&matchup, &winner).unwrap_or_else(|e| bail(e));
        store.save(engine.table()).unwrap_or_else(|e| bail(e));
        println!("{}", prompt::describe_outcome(&outcome));

        anchor = if chain {
            Some(engine.follow_up_anchor(&matchup).unwrap_or_else(|e| bail(e)))
        } else {
            None
        };
    }

    eprintln!(
        "\n{} comparisons recorded this session, saved to {}",
        engine.recorded(),
        store.path().display(),
    );
}

fn run_rank(args: RankArgs) {
    let settings = Settings::resolve(&args.store);
    let store = RatingStore::new(&settings.data);
    let names = load_names(&settings.list, !store.exists());
    let table = load_table(&store, &names, &settings.elo);
    if table.is_empty() {
        bail("Nothing to rank: the rating table and the candidate list are both empty.");
    }

    let ranked = rank(&table);
    let total_comparisons = table.total_rounds() / 2;

    if args.json {
        output::print_json(&ranked, total_comparisons);
    } else {
        let window = if args.all {
            RankingWindow::new(&ranked, ranked.len(), 0)
        } else {
            RankingWindow::new(&ranked, args.top, args.bottom)
        };
        println!(" - Ranking - \n");
        output::print_table(&window, total_comparisons);
    }
}

fn run_sync(args: SyncArgs) {
    let settings = Settings::resolve(&args.store);
    let store = RatingStore::new(&settings.data);
    let names = load_names(&settings.list, true);
    if names.is_empty() {
        bail(format!("Candidate list {} has no names, nothing to sync against.", settings.list.display()));
    }
    let mut table = load_table(&store, &names, &settings.elo);

    let policy = if args.prune || settings.file.prune_missing.unwrap_or(false) {
        ReconcilePolicy::Prune
    } else {
        ReconcilePolicy::Retain
    };
    let report = reconcile(&mut table, &names, policy, &settings.elo);
    store.save(&table).unwrap_or_else(|e| bail(e));

    for name in &report.added {
        println!("+ {name}");
    }
    for name in &report.removed {
        println!("- {name}");
    }
    println!(
        "{} added, {} removed, {} items in {}",
        report.added.len(),
        report.removed.len(),
        table.len(),
        store.path().display(),
    );
}
