use std::time::Instant;

use evplan_core::log_op_start;
use evplan_core::model::{
    CategorySummary, Contractor, ContractorAssignment, ContractorCategory, ContractorView, Kind,
};
use rusqlite::Connection;

use crate::errors::Result;
use crate::queries::query_vec;
use crate::repo::record_store::{finish, Outcome};
use crate::repo::RecordStore;

pub struct ContractorQueries<'a> {
    store: &'a RecordStore,
}

impl<'a> ContractorQueries<'a> {
    pub(crate) fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    pub fn categories_by_owner(&self, owner_id: i64) -> Result<Vec<CategorySummary>> {
        let started = Instant::now();
        log_op_start!("categories_by_owner", kind = ContractorCategory::NAME);
        let result = self.store.read(|tx| {
            Ok(query_vec!(
                tx,
                "SELECT DISTINCT id, title FROM contractor_categories
                 WHERE owner_id = ?1
                 ORDER BY id",
                [owner_id],
                |row| {
                    Ok(CategorySummary {
                        id: row.get("id")?,
                        title: row.get("title")?,
                    })
                }
            ))
        });
        finish(
            "categories_by_owner",
            ContractorCategory::NAME,
            started,
            result,
            |r| Outcome::Rows(r.len() as u64),
        )
    }

    /// Contractors of an owner with their category title, by name
    pub fn by_owner(&self, owner_id: i64) -> Result<Vec<ContractorView>> {
        let started = Instant::now();
        log_op_start!("contractors_by_owner", kind = Contractor::NAME);
        let result = self.store.read(|tx| {
            Ok(query_vec!(
                tx,
                "SELECT c.id, c.name, c.contact, c.owner_id, cat.title AS category
                 FROM contractors c
                 JOIN contractor_categories cat ON cat.id = c.category_id
                 WHERE c.owner_id = ?1
                 ORDER BY c.name, c.id",
                [owner_id],
                |row| {
                    Ok(ContractorView {
                        id: row.get("id")?,
                        name: row.get("name")?,
                        category: row.get("category")?,
                        contact: row.get("contact")?,
                        owner_id: row.get("owner_id")?,
                    })
                }
            ))
        });
        finish("contractors_by_owner", Contractor::NAME, started, result, |r| {
            Outcome::Rows(r.len() as u64)
        })
    }

    /// Contractors assigned to an event, with the agreed cost
    pub fn for_event(&self, event_id: i64) -> Result<Vec<ContractorAssignment>> {
        let started = Instant::now();
        log_op_start!("contractors_for_event", kind = Contractor::NAME);
        let result = self.store.read(|tx| for_event_tx(tx, event_id));
        finish("contractors_for_event", Contractor::NAME, started, result, |r| {
            Outcome::Rows(r.len() as u64)
        })
    }
}

pub(crate) fn for_event_tx(conn: &Connection, event_id: i64) -> Result<Vec<ContractorAssignment>> {
    Ok(query_vec!(
        conn,
        "SELECT c.id, c.name, c.contact, ec.cost
         FROM event_contractors ec
         JOIN contractors c ON c.id = ec.contractor_id
         WHERE ec.event_id = ?1
         ORDER BY ec.rowid",
        [event_id],
        |row| {
            Ok(ContractorAssignment {
                id: row.get("id")?,
                name: row.get("name")?,
                contact: row.get("contact")?,
                cost: row.get("cost")?,
            })
        }
    ))
}
