use serde::{Deserialize, Serialize};

use super::kind::{FieldDef, FieldType, Identified, Kind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
}

impl Kind for Checklist {
    const NAME: &'static str = "checklist";
    const TABLE: &'static str = "checklists";
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("id", FieldType::Integer),
        FieldDef::required("owner_id", FieldType::Integer),
        FieldDef::required("title", FieldType::Text),
    ];
    const KEY: &'static [&'static str] = &["id"];
    const GENERATED_KEY: bool = true;
}

impl Identified for Checklist {
    fn id(&self) -> i64 {
        self.id
    }
}

/// One line of a checklist; removed together with its checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: i64,
    pub checklist_id: i64,
    pub title: String,
}

impl Kind for ChecklistItem {
    const NAME: &'static str = "checklist_item";
    const TABLE: &'static str = "checklist_items";
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("id", FieldType::Integer),
        FieldDef::required("checklist_id", FieldType::Integer),
        FieldDef::required("title", FieldType::Text),
    ];
    const KEY: &'static [&'static str] = &["id"];
    const GENERATED_KEY: bool = true;
}

impl Identified for ChecklistItem {
    fn id(&self) -> i64 {
        self.id
    }
}
