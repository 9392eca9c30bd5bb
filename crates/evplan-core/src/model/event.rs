use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::kind::{FieldDef, FieldType, Identified, Kind};

/// A planned event
///
/// Deleting an event removes its tasks and every join record pointing at it
/// (declared cascade in the schema).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub location: Option<String>,
    pub date: NaiveDate,
}

impl Kind for Event {
    const NAME: &'static str = "event";
    const TABLE: &'static str = "events";
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("id", FieldType::Integer),
        FieldDef::required("owner_id", FieldType::Integer),
        FieldDef::required("title", FieldType::Text),
        FieldDef::optional("location", FieldType::Text),
        FieldDef::required("date", FieldType::Date),
    ];
    const KEY: &'static [&'static str] = &["id"];
    const GENERATED_KEY: bool = true;
}

impl Identified for Event {
    fn id(&self) -> i64 {
        self.id
    }
}
