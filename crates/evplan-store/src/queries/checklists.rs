use std::time::Instant;

use chrono::NaiveDate;
use evplan_core::errors::{ExError, ExErrorKind};
use evplan_core::log_op_start;
use evplan_core::model::{
    ChecklistItem, CompletedChecklistItem, CompletedItemView, EventChecklist,
    EventChecklistStatus, Fields, Filter, Kind,
};
use rusqlite::Connection;

use crate::errors::Result;
use crate::queries::query_vec;
use crate::repo::record_store::{finish, Outcome};
use crate::repo::tx::{add_tx, delete_where_tx, find_one_tx, update_where_tx};
use crate::repo::RecordStore;

pub struct ChecklistQueries<'a> {
    store: &'a RecordStore,
}

impl<'a> ChecklistQueries<'a> {
    pub(crate) fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Checklists attached to an event, with their completion state
    pub fn for_event(&self, event_id: i64) -> Result<Vec<EventChecklistStatus>> {
        let started = Instant::now();
        log_op_start!("checklists_for_event", kind = EventChecklist::NAME);
        let result = self.store.read(|tx| for_event_tx(tx, event_id));
        finish("checklists_for_event", EventChecklist::NAME, started, result, |r| {
            Outcome::Rows(r.len() as u64)
        })
    }

    /// Checklist items that carry a completion mark for an event
    pub fn completed_items(&self, event_id: i64) -> Result<Vec<CompletedItemView>> {
        let started = Instant::now();
        log_op_start!("completed_items", kind = CompletedChecklistItem::NAME);
        let result = self.store.read(|tx| completed_items_tx(tx, event_id));
        finish(
            "completed_items",
            CompletedChecklistItem::NAME,
            started,
            result,
            |r| Outcome::Rows(r.len() as u64),
        )
    }

    /// Mark an item done for an event, dated today
    pub fn mark_item_completed(
        &self,
        event_id: i64,
        item_id: i64,
        user_id: i64,
    ) -> Result<CompletedChecklistItem> {
        let today = chrono::Local::now().date_naive();
        self.mark_item_completed_on(event_id, item_id, user_id, today)
    }

    /// Mark an item done for an event on a given date
    ///
    /// Creates the completion record or overwrites the existing one. The
    /// lookup and the write share one immediate transaction, so concurrent
    /// calls for the same pair leave exactly one record.
    pub fn mark_item_completed_on(
        &self,
        event_id: i64,
        item_id: i64,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<CompletedChecklistItem> {
        let started = Instant::now();
        log_op_start!(
            "mark_item_completed",
            kind = CompletedChecklistItem::NAME,
            event_id = event_id,
            item_id = item_id
        );
        let result = self.store.write(|tx| {
            let key = Filter::new()
                .eq("event_id", event_id)
                .eq("item_id", item_id);
            let mark = Fields::new()
                .with("is_completed", true)
                .with("completed_at", date)
                .with("completed_by", user_id);

            if find_one_tx::<CompletedChecklistItem>(tx, &key)?.is_some() {
                update_where_tx::<CompletedChecklistItem>(tx, &key, &mark)?;
                // Present: the write lock has been held since the lookup
                find_one_tx::<CompletedChecklistItem>(tx, &key)?.ok_or_else(|| {
                    ExError::new(ExErrorKind::Internal)
                        .with_message("completion record vanished inside its transaction")
                })
            } else {
                let record = mark
                    .with("event_id", event_id)
                    .with("item_id", item_id);
                add_tx::<CompletedChecklistItem>(tx, &record)
            }
        });
        finish(
            "mark_item_completed",
            CompletedChecklistItem::NAME,
            started,
            result,
            |_| Outcome::Rows(1),
        )
    }

    /// Delete every item of a checklist; returns how many were removed
    ///
    /// Completion marks of the removed items go with them.
    pub fn delete_items(&self, checklist_id: i64) -> Result<usize> {
        let started = Instant::now();
        log_op_start!(
            "delete_items",
            kind = ChecklistItem::NAME,
            checklist_id = checklist_id
        );
        let result = self.store.write(|tx| {
            delete_where_tx::<ChecklistItem>(tx, &Filter::new().eq("checklist_id", checklist_id))
        });
        finish("delete_items", ChecklistItem::NAME, started, result, |n| {
            Outcome::Rows(*n as u64)
        })
    }
}

pub(crate) fn for_event_tx(conn: &Connection, event_id: i64) -> Result<Vec<EventChecklistStatus>> {
    Ok(query_vec!(
        conn,
        "SELECT c.id, c.title, ec.is_completed, ec.completed_at
         FROM event_checklists ec
         JOIN checklists c ON c.id = ec.checklist_id
         WHERE ec.event_id = ?1
         ORDER BY ec.rowid",
        [event_id],
        |row| {
            Ok(EventChecklistStatus {
                id: row.get("id")?,
                title: row.get("title")?,
                is_completed: row.get("is_completed")?,
                completed_at: row.get("completed_at")?,
            })
        }
    ))
}

pub(crate) fn completed_items_tx(conn: &Connection, event_id: i64) -> Result<Vec<CompletedItemView>> {
    Ok(query_vec!(
        conn,
        "SELECT i.id, i.title, cci.is_completed, cci.completed_at
         FROM completed_checklist_items cci
         JOIN checklist_items i ON i.id = cci.item_id
         WHERE cci.event_id = ?1
         ORDER BY cci.rowid",
        [event_id],
        |row| {
            Ok(CompletedItemView {
                id: row.get("id")?,
                title: row.get("title")?,
                is_completed: row.get("is_completed")?,
                completed_at: row.get("completed_at")?,
            })
        }
    ))
}
