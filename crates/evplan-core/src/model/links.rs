//! Join records
//!
//! Each is identified by the composite of the two foreign keys it connects
//! and is removed when either side is deleted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::kind::{FieldDef, FieldType, Kind};

/// Contractor assigned to an event, with the agreed cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventContractor {
    pub event_id: i64,
    pub contractor_id: i64,
    pub cost: Option<String>,
}

impl Kind for EventContractor {
    const NAME: &'static str = "event_contractor";
    const TABLE: &'static str = "event_contractors";
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("event_id", FieldType::Integer),
        FieldDef::required("contractor_id", FieldType::Integer),
        FieldDef::optional("cost", FieldType::Text),
    ];
    const KEY: &'static [&'static str] = &["event_id", "contractor_id"];
}

/// Checklist attached to an event, with its overall completion state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventChecklist {
    pub event_id: i64,
    pub checklist_id: i64,
    pub is_completed: bool,
    pub completed_at: Option<NaiveDate>,
}

impl Kind for EventChecklist {
    const NAME: &'static str = "event_checklist";
    const TABLE: &'static str = "event_checklists";
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("event_id", FieldType::Integer),
        FieldDef::required("checklist_id", FieldType::Integer),
        FieldDef::required("is_completed", FieldType::Bool),
        FieldDef::optional("completed_at", FieldType::Date),
    ];
    const KEY: &'static [&'static str] = &["event_id", "checklist_id"];
}

/// Completion mark of one checklist item within one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedChecklistItem {
    pub event_id: i64,
    pub item_id: i64,
    pub is_completed: bool,
    pub completed_at: Option<NaiveDate>,
    /// User who ticked the item
    pub completed_by: Option<i64>,
}

impl Kind for CompletedChecklistItem {
    const NAME: &'static str = "completed_checklist_item";
    const TABLE: &'static str = "completed_checklist_items";
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("event_id", FieldType::Integer),
        FieldDef::required("item_id", FieldType::Integer),
        FieldDef::required("is_completed", FieldType::Bool),
        FieldDef::optional("completed_at", FieldType::Date),
        FieldDef::optional("completed_by", FieldType::Integer),
    ];
    const KEY: &'static [&'static str] = &["event_id", "item_id"];
}
