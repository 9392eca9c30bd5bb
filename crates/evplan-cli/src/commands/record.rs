//! Generic record commands
//!
//! Usage:
//!   evplan record get <KIND> <ID>
//!   evplan record find <KIND> [FIELD=VALUE]...
//!   evplan record list <KIND> [FIELD=VALUE]... [--sort FIELD|-FIELD]...
//!   evplan record add <KIND> FIELD=VALUE...
//!   evplan record update <KIND> <ID> FIELD=VALUE...
//!   evplan record delete <KIND> <ID>
//!
//! Values are parsed by the field's declared type; `null` clears a nullable
//! field and `\null` stores the text `null`. Dates are `YYYY-MM-DD`.

use clap::{Args, Subcommand, ValueEnum};
use evplan_core::errors::{EvplanError, ExError, ExErrorKind};
use evplan_core::model::{
    Checklist, ChecklistItem, CompletedChecklistItem, Contractor, ContractorCategory, Event,
    EventChecklist, EventContractor, Fields, Filter, Identified, Kind, SortOrder, Task, User,
};
use evplan_store::{Entity, RecordStore, Result};
use serde::Serialize;
use serde_json::Value as Json;

use super::{print_json, CommandResult};

#[derive(Debug, Args)]
pub struct RecordArgs {
    #[command(subcommand)]
    pub command: RecordCommand,
}

#[derive(Debug, Subcommand)]
pub enum RecordCommand {
    /// Fetch one record by id
    Get { kind: KindArg, id: i64 },
    /// First record matching all conditions
    Find {
        kind: KindArg,
        #[arg(value_name = "FIELD=VALUE")]
        conditions: Vec<String>,
    },
    /// Every record matching all conditions
    List {
        kind: KindArg,
        #[arg(value_name = "FIELD=VALUE")]
        conditions: Vec<String>,
        /// Sort key; prefix with '-' for descending
        #[arg(long, allow_hyphen_values = true)]
        sort: Vec<String>,
    },
    /// Insert a record
    Add {
        kind: KindArg,
        #[arg(value_name = "FIELD=VALUE", required = true)]
        fields: Vec<String>,
    },
    /// Change some fields of a record
    Update {
        kind: KindArg,
        id: i64,
        #[arg(value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    /// Remove a record
    Delete { kind: KindArg, id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    User,
    Event,
    Task,
    ContractorCategory,
    Contractor,
    Checklist,
    ChecklistItem,
    EventContractor,
    EventChecklist,
    CompletedChecklistItem,
}

type Getter = fn(&RecordStore, i64) -> Result<Option<Json>>;
type Updater = fn(&RecordStore, i64, &Fields) -> Result<Option<Json>>;
type Deleter = fn(&RecordStore, i64) -> Result<bool>;

/// Generic operations instantiated for one kind
struct Handlers {
    name: &'static str,
    parse: fn(&[String]) -> Result<Fields>,
    find: fn(&RecordStore, &Filter) -> Result<Option<Json>>,
    list: fn(&RecordStore, &Filter) -> Result<Vec<Json>>,
    add: fn(&RecordStore, &Fields) -> Result<Json>,
    /// Only kinds with a surrogate id can be addressed by id
    by_id: Option<(Getter, Updater, Deleter)>,
}

impl KindArg {
    fn handlers(self) -> Handlers {
        match self {
            KindArg::User => identified::<User>(),
            KindArg::Event => identified::<Event>(),
            KindArg::Task => identified::<Task>(),
            KindArg::ContractorCategory => identified::<ContractorCategory>(),
            KindArg::Contractor => identified::<Contractor>(),
            KindArg::Checklist => identified::<Checklist>(),
            KindArg::ChecklistItem => identified::<ChecklistItem>(),
            KindArg::EventContractor => keyed::<EventContractor>(),
            KindArg::EventChecklist => keyed::<EventChecklist>(),
            KindArg::CompletedChecklistItem => keyed::<CompletedChecklistItem>(),
        }
    }
}

fn keyed<K: Entity + Serialize>() -> Handlers {
    Handlers {
        name: K::NAME,
        parse: parse_fields::<K>,
        find: |store: &RecordStore, filter: &Filter| {
            store.find_one::<K>(filter)?.map(to_json).transpose()
        },
        list: |store: &RecordStore, filter: &Filter| {
            store.find_all::<K>(filter)?.into_iter().map(to_json).collect()
        },
        add: |store: &RecordStore, fields: &Fields| to_json(store.add::<K>(fields)?),
        by_id: None,
    }
}

fn identified<K: Entity + Identified + Serialize>() -> Handlers {
    Handlers {
        by_id: Some((
            |store: &RecordStore, id: i64| store.find_by_id::<K>(id)?.map(to_json).transpose(),
            |store: &RecordStore, id: i64, fields: &Fields| {
                store.update::<K>(id, fields)?.map(to_json).transpose()
            },
            |store: &RecordStore, id: i64| store.delete::<K>(id),
        )),
        ..keyed::<K>()
    }
}

fn to_json<T: Serialize>(record: T) -> Result<Json> {
    Ok(serde_json::to_value(record)?)
}

/// Parse `field=value` pairs using the kind's declared field types
fn parse_fields<K: Kind>(pairs: &[String]) -> Result<Fields> {
    let mut fields = Fields::new();
    for pair in pairs {
        let (name, raw) = pair.split_once('=').ok_or_else(|| EvplanError::InvalidValue {
            field: pair.clone(),
            reason: "expected FIELD=VALUE".to_string(),
        })?;
        let def = K::field(name).ok_or_else(|| EvplanError::UnknownField {
            kind: K::NAME.to_string(),
            field: name.to_string(),
        })?;
        fields.set(name, def.ty.parse(name, raw)?);
    }
    Ok(fields)
}

fn parse_filter(handlers: &Handlers, conditions: &[String], sort: &[String]) -> Result<Filter> {
    let mut filter = Filter::from((handlers.parse)(conditions)?);
    for key in sort {
        filter = match key.strip_prefix('-') {
            Some(field) => filter.order_by(field, SortOrder::Desc),
            None => filter.order_by(key.as_str(), SortOrder::Asc),
        };
    }
    Ok(filter)
}

fn by_id(handlers: &Handlers) -> Result<(Getter, Updater, Deleter)> {
    handlers.by_id.ok_or_else(|| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_record_kind(handlers.name)
            .with_message(format!(
                "{} records have a composite key; use find or list",
                handlers.name
            ))
    })
}

fn not_found(handlers: &Handlers, id: i64) -> Box<dyn std::error::Error> {
    Box::new(ExError::from(EvplanError::RecordNotFound {
        kind: handlers.name.to_string(),
        id,
    }))
}

pub fn execute(store: &RecordStore, args: RecordArgs) -> CommandResult {
    match args.command {
        RecordCommand::Get { kind, id } => {
            let handlers = kind.handlers();
            let (get, _, _) = by_id(&handlers)?;
            match get(store, id)? {
                Some(record) => print_json(&record),
                None => Err(not_found(&handlers, id)),
            }
        }
        RecordCommand::Find { kind, conditions } => {
            let handlers = kind.handlers();
            let filter = parse_filter(&handlers, &conditions, &[])?;
            match (handlers.find)(store, &filter)? {
                Some(record) => print_json(&record),
                None => Err(format!("No {} matches the given conditions", handlers.name).into()),
            }
        }
        RecordCommand::List {
            kind,
            conditions,
            sort,
        } => {
            let handlers = kind.handlers();
            let filter = parse_filter(&handlers, &conditions, &sort)?;
            print_json(&(handlers.list)(store, &filter)?)
        }
        RecordCommand::Add { kind, fields } => {
            let handlers = kind.handlers();
            let fields = (handlers.parse)(&fields)?;
            print_json(&(handlers.add)(store, &fields)?)
        }
        RecordCommand::Update { kind, id, fields } => {
            let handlers = kind.handlers();
            let (_, update, _) = by_id(&handlers)?;
            let fields = (handlers.parse)(&fields)?;
            match update(store, id, &fields)? {
                Some(record) => print_json(&record),
                None => Err(not_found(&handlers, id)),
            }
        }
        RecordCommand::Delete { kind, id } => {
            let handlers = kind.handlers();
            let (_, _, delete) = by_id(&handlers)?;
            if delete(store, id)? {
                print_json(&serde_json::json!({ "kind": handlers.name, "id": id, "deleted": true }))
            } else {
                Err(not_found(&handlers, id))
            }
        }
    }
}
