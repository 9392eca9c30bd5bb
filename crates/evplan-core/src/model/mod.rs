//! Record kinds and the data they carry

pub mod checklist;
pub mod contractor;
pub mod event;
pub mod filter;
pub mod kind;
pub mod links;
pub mod task;
pub mod user;
pub mod value;
pub mod views;

pub use checklist::{Checklist, ChecklistItem};
pub use contractor::{Contractor, ContractorCategory};
pub use event::Event;
pub use filter::{Filter, SortOrder};
pub use kind::{FieldDef, FieldType, Identified, Kind};
pub use links::{CompletedChecklistItem, EventChecklist, EventContractor};
pub use task::Task;
pub use user::User;
pub use value::{Fields, Value};
pub use views::{
    CategorySummary, CompletedItemView, ContractorAssignment, ContractorView, EventChecklistStatus,
    EventDetails, EventProjection, EventRelation, EventSummary, TaskSummary, UserWithEvents,
};
