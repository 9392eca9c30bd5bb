//! Contractor commands
//!
//! Usage:
//!   evplan contractor list --owner <USER_ID>
//!   evplan contractor categories --owner <USER_ID>

use clap::{Args, Subcommand};
use evplan_store::RecordStore;

use super::{print_json, CommandResult};

#[derive(Debug, Args)]
pub struct ContractorArgs {
    #[command(subcommand)]
    pub command: ContractorCommand,
}

#[derive(Debug, Subcommand)]
pub enum ContractorCommand {
    /// Contractors with their category, by name
    List {
        #[arg(long)]
        owner: i64,
    },
    /// Contractor categories of a user
    Categories {
        #[arg(long)]
        owner: i64,
    },
}

pub fn execute(store: &RecordStore, args: ContractorArgs) -> CommandResult {
    match args.command {
        ContractorCommand::List { owner } => print_json(&store.contractors().by_owner(owner)?),
        ContractorCommand::Categories { owner } => {
            print_json(&store.contractors().categories_by_owner(owner)?)
        }
    }
}
