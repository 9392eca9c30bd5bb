//! Checklist commands
//!
//! Usage:
//!   evplan checklist status --event <EVENT_ID>
//!   evplan checklist mark --event <EVENT_ID> --item <ITEM_ID> --user <USER_ID>

use clap::{Args, Subcommand};
use evplan_core::model::{CompletedItemView, EventChecklistStatus};
use evplan_store::RecordStore;
use serde::Serialize;

use super::{print_json, CommandResult};

#[derive(Debug, Args)]
pub struct ChecklistArgs {
    #[command(subcommand)]
    pub command: ChecklistCommand,
}

#[derive(Debug, Subcommand)]
pub enum ChecklistCommand {
    /// Checklists of an event and the items marked so far
    Status {
        #[arg(long)]
        event: i64,
    },
    /// Mark a checklist item done for an event
    Mark {
        #[arg(long)]
        event: i64,
        #[arg(long)]
        item: i64,
        #[arg(long)]
        user: i64,
    },
}

#[derive(Serialize)]
struct ChecklistStatus {
    checklists: Vec<EventChecklistStatus>,
    completed_items: Vec<CompletedItemView>,
}

pub fn execute(store: &RecordStore, args: ChecklistArgs) -> CommandResult {
    match args.command {
        ChecklistCommand::Status { event } => {
            let status = ChecklistStatus {
                checklists: store.checklists().for_event(event)?,
                completed_items: store.checklists().completed_items(event)?,
            };
            print_json(&status)
        }
        ChecklistCommand::Mark { event, item, user } => {
            let mark = store.checklists().mark_item_completed(event, item, user)?;
            print_json(&mark)
        }
    }
}
