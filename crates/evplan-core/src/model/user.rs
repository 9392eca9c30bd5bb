use serde::{Deserialize, Serialize};

use super::kind::{FieldDef, FieldType, Identified, Kind};

/// A chat-bot user; owns events, contractors, categories and checklists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// Chat platform account id, unique per user
    pub telegram_id: i64,
    pub name: String,
    pub username: Option<String>,
}

impl Kind for User {
    const NAME: &'static str = "user";
    const TABLE: &'static str = "users";
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("id", FieldType::Integer),
        FieldDef::required("telegram_id", FieldType::Integer),
        FieldDef::required("name", FieldType::Text),
        FieldDef::optional("username", FieldType::Text),
    ];
    const KEY: &'static [&'static str] = &["id"];
    const GENERATED_KEY: bool = true;
}

impl Identified for User {
    fn id(&self) -> i64 {
        self.id
    }
}
