//! evplan CLI
//!
//! Command-line access to the event-planning record store

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use evplan_core::config;
use evplan_core::logging_facility;
use evplan_store::RecordStore;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "evplan")]
#[command(about = "evplan - Event planning record store", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file (overrides configuration)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Add the demo contractors for a user
    Seed(commands::seed::SeedArgs),
    /// Generic record operations on any kind
    Record(commands::record::RecordArgs),
    /// Event listings and details
    Event(commands::event::EventArgs),
    /// Contractor listings
    Contractor(commands::contractor::ContractorArgs),
    /// Checklist status and completion
    Checklist(commands::checklist::ChecklistArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    config::load_dotenv();
    let mut app_config = config::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        app_config.database.path = db;
    }
    logging_facility::init_with_filter(
        app_config.logging.profile,
        app_config.logging.filter.as_deref(),
    );
    tracing::debug!(db = %app_config.database.path.display(), "Opening store");

    let store = RecordStore::open(&app_config.database)?;

    match cli.command {
        Commands::Migrate => commands::db::migrate(&store),
        Commands::Seed(args) => commands::seed::execute(&store, args),
        Commands::Record(args) => commands::record::execute(&store, args),
        Commands::Event(args) => commands::event::execute(&store, args),
        Commands::Contractor(args) => commands::contractor::execute(&store, args),
        Commands::Checklist(args) => commands::checklist::execute(&store, args),
    }
}
