//! Event commands
//!
//! Usage:
//!   evplan event list --owner <USER_ID>
//!   evplan event show <ID> [--with tasks,contractors,checklists,completed_items]

use clap::{Args, Subcommand};
use evplan_core::errors::EvplanError;
use evplan_core::model::{Event, EventProjection, EventRelation, Kind};
use evplan_store::RecordStore;

use super::{print_json, CommandResult};

#[derive(Debug, Args)]
pub struct EventArgs {
    #[command(subcommand)]
    pub command: EventCommand,
}

#[derive(Debug, Subcommand)]
pub enum EventCommand {
    /// Events owned by a user, by date
    List {
        #[arg(long)]
        owner: i64,
    },
    /// One event with the requested related collections
    Show {
        id: i64,
        /// Related collections to include
        #[arg(long = "with", value_delimiter = ',')]
        with: Vec<EventRelation>,
    },
}

pub fn execute(store: &RecordStore, args: EventArgs) -> CommandResult {
    match args.command {
        EventCommand::List { owner } => print_json(&store.events().by_owner(owner)?),
        EventCommand::Show { id, with } => {
            let projection: EventProjection = with.into_iter().collect();
            match store.events().with_details(id, &projection)? {
                Some(details) => print_json(&details),
                None => Err(EvplanError::RecordNotFound {
                    kind: Event::NAME.to_string(),
                    id,
                }
                .into()),
            }
        }
    }
}
