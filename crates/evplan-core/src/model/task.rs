use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::kind::{FieldDef, FieldType, Identified, Kind};

/// A dated to-do belonging to one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub event_id: i64,
    pub title: String,
    pub date: NaiveDate,
    /// Done flag; defaults to false when omitted on insert
    pub status: bool,
}

impl Kind for Task {
    const NAME: &'static str = "task";
    const TABLE: &'static str = "tasks";
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("id", FieldType::Integer),
        FieldDef::required("event_id", FieldType::Integer),
        FieldDef::required("title", FieldType::Text),
        FieldDef::required("date", FieldType::Date),
        FieldDef::required("status", FieldType::Bool),
    ];
    const KEY: &'static [&'static str] = &["id"];
    const GENERATED_KEY: bool = true;
}

impl Identified for Task {
    fn id(&self) -> i64 {
        self.id
    }
}
