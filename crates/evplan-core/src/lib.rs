//! evplan Core - record kinds and ambient facilities for the event planner
//!
//! This crate provides the storage-agnostic half of the record store:
//! - Record kinds (users, events, contractors, tasks, checklists and their join records)
//! - Typed values, partial field sets and exact-match filters with validation
//! - Flat read-only projections assembled by the store's composed queries
//! - Structured error facility (`ExError`) and logging facility
//! - Layered configuration loading

pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use config::{AppConfig, DatabaseConfig, LoggingConfig};
pub use errors::{EvplanError, ExError, ExErrorKind, Result};
pub use model::{
    Checklist, ChecklistItem, CompletedChecklistItem, Contractor, ContractorCategory, Event,
    EventChecklist, EventContractor, FieldDef, FieldType, Fields, Filter, Identified, Kind,
    SortOrder, Task, User, Value,
};
