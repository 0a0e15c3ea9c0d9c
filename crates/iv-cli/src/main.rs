//! CLI frontend for Iron Vault rules data.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::LoadConfig;

#[derive(Parser)]
#[command(
    name = "iv",
    about = "Iron Vault: load Datasworn rules packages, inspect conflicts, validate oracle rolls",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log loading details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Built-in rules package (repeatable)
    #[arg(short = 's', long = "source", value_name = "FILE", global = true)]
    sources: Vec<PathBuf>,

    /// Directory of homebrew packages (every *.json file is loaded)
    #[arg(short = 'H', long, value_name = "DIR", global = true)]
    homebrew: Option<PathBuf>,

    /// Priority of built-in packages
    #[arg(long, default_value_t = 0, global = true, allow_negative_numbers = true)]
    builtin_priority: i32,

    /// Priority of homebrew packages
    #[arg(long, default_value_t = 1, global = true, allow_negative_numbers = true)]
    homebrew_priority: i32,

    /// Let the earliest loaded source win equal-priority conflicts
    #[arg(long, global = true)]
    first_wins: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every package and report record counts per source
    Check,

    /// List winning records
    List {
        /// Filter by record kind (move_category, move, asset, oracle, rules_package)
        kind: Option<String>,
    },

    /// Show details of the winning record for an id
    Show {
        /// Record id
        id: String,
    },

    /// Show every source that defines an id, winner first
    Conflicts {
        /// Record id
        id: String,
    },

    /// Display oracles grouped by ruleset and collection
    Oracles,

    /// Validate a roll result or oracle block JSON file
    Roll {
        /// JSON file to validate
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    let config = LoadConfig::new()
        .with_sources(cli.sources)
        .with_homebrew(cli.homebrew)
        .with_builtin_priority(cli.builtin_priority)
        .with_homebrew_priority(cli.homebrew_priority)
        .with_first_wins(cli.first_wins);

    let result = match cli.command {
        Commands::Check => commands::check::run(&config),
        Commands::List { kind } => commands::list::run(&config, kind.as_deref()),
        Commands::Show { id } => commands::show::run(&config, &id),
        Commands::Conflicts { id } => commands::conflicts::run(&config, &id),
        Commands::Oracles => commands::oracles::run(&config),
        Commands::Roll { file } => commands::roll::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
