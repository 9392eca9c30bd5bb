use serde::{Deserialize, Serialize};

use super::kind::{FieldDef, FieldType, Identified, Kind};

/// Owner-defined contractor grouping (photographers, catering, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorCategory {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
}

impl Kind for ContractorCategory {
    const NAME: &'static str = "contractor_category";
    const TABLE: &'static str = "contractor_categories";
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("id", FieldType::Integer),
        FieldDef::required("owner_id", FieldType::Integer),
        FieldDef::required("title", FieldType::Text),
    ];
    const KEY: &'static [&'static str] = &["id"];
    const GENERATED_KEY: bool = true;
}

impl Identified for ContractorCategory {
    fn id(&self) -> i64 {
        self.id
    }
}

/// A supplier the owner can assign to events
///
/// A category cannot be deleted while contractors still reference it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contractor {
    pub id: i64,
    pub owner_id: i64,
    pub category_id: i64,
    pub name: String,
    pub contact: String,
}

impl Kind for Contractor {
    const NAME: &'static str = "contractor";
    const TABLE: &'static str = "contractors";
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("id", FieldType::Integer),
        FieldDef::required("owner_id", FieldType::Integer),
        FieldDef::required("category_id", FieldType::Integer),
        FieldDef::required("name", FieldType::Text),
        FieldDef::required("contact", FieldType::Text),
    ];
    const KEY: &'static [&'static str] = &["id"];
    const GENERATED_KEY: bool = true;
}

impl Identified for Contractor {
    fn id(&self) -> i64 {
        self.id
    }
}
