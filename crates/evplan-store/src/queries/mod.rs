//! Composed queries
//!
//! Read projections that join a primary record with its related records,
//! plus the checklist completion upsert. Each runs in a single transaction
//! on top of the generic primitives in `repo::tx`.

pub mod checklists;
pub mod contractors;
pub mod events;
pub mod tasks;
pub mod users;

pub use checklists::ChecklistQueries;
pub use contractors::ContractorQueries;
pub use events::EventQueries;
pub use tasks::TaskQueries;
pub use users::UserQueries;

use crate::repo::RecordStore;

impl RecordStore {
    pub fn users(&self) -> UserQueries<'_> {
        UserQueries::new(self)
    }

    pub fn events(&self) -> EventQueries<'_> {
        EventQueries::new(self)
    }

    pub fn contractors(&self) -> ContractorQueries<'_> {
        ContractorQueries::new(self)
    }

    pub fn checklists(&self) -> ChecklistQueries<'_> {
        ChecklistQueries::new(self)
    }

    pub fn tasks(&self) -> TaskQueries<'_> {
        TaskQueries::new(self)
    }
}

/// Collect a mapped statement into a vector
macro_rules! query_vec {
    ($conn:expr, $sql:expr, $params:expr, $map:expr) => {{
        let mut stmt = $conn.prepare($sql).map_err($crate::errors::from_rusqlite)?;
        let rows = stmt
            .query_map($params, $map)
            .map_err($crate::errors::from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err($crate::errors::from_rusqlite)?;
        rows
    }};
}

pub(crate) use query_vec;
