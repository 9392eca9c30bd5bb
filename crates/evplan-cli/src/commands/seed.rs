//! Demo data command
//!
//! Usage: evplan seed --owner <USER_ID>

use clap::Args;
use evplan_store::seed::seed_demo_contractors;
use evplan_store::RecordStore;

use super::{print_json, CommandResult};

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// User that owns the seeded contractors and categories
    #[arg(long)]
    pub owner: i64,
}

pub fn execute(store: &RecordStore, args: SeedArgs) -> CommandResult {
    let report = seed_demo_contractors(store, args.owner)?;
    print_json(&report)
}
