use std::time::Instant;

use chrono::NaiveDate;
use evplan_core::log_op_start;
use evplan_core::model::{
    Event, EventDetails, EventProjection, EventSummary, Filter, Kind, SortOrder,
};
use rusqlite::Connection;

use crate::errors::Result;
use crate::queries::{checklists, contractors, tasks};
use crate::repo::record_store::{finish, Outcome};
use crate::repo::tx::{find_all_tx, find_by_id_tx};
use crate::repo::RecordStore;

pub struct EventQueries<'a> {
    store: &'a RecordStore,
}

impl<'a> EventQueries<'a> {
    pub(crate) fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Events owned by a user, by date
    pub fn by_owner(&self, owner_id: i64) -> Result<Vec<EventSummary>> {
        let started = Instant::now();
        log_op_start!("events_by_owner", kind = Event::NAME);
        let result = self.store.read(|tx| by_owner_tx(tx, owner_id));
        finish("events_by_owner", Event::NAME, started, result, |r| {
            Outcome::Rows(r.len() as u64)
        })
    }

    /// Events held on `date` (reminder scheduling)
    pub fn on_date(&self, date: NaiveDate) -> Result<Vec<Event>> {
        let started = Instant::now();
        log_op_start!("events_on_date", kind = Event::NAME);
        let result = self
            .store
            .read(|tx| find_all_tx::<Event>(tx, &Filter::new().eq("date", date)));
        finish("events_on_date", Event::NAME, started, result, |r| {
            Outcome::Rows(r.len() as u64)
        })
    }

    /// An event with the related collections `projection` asks for
    ///
    /// Everything is read in one transaction, so the collections are
    /// consistent with the event row.
    pub fn with_details(
        &self,
        event_id: i64,
        projection: &EventProjection,
    ) -> Result<Option<EventDetails>> {
        let started = Instant::now();
        log_op_start!("event_details", kind = Event::NAME, record_id = event_id);
        let result = self.store.read(|tx| {
            let Some(event) = find_by_id_tx::<Event>(tx, event_id)? else {
                return Ok(None);
            };

            let tasks = projection
                .tasks
                .then(|| tasks::for_event_tx(tx, event_id))
                .transpose()?;
            let contractors = projection
                .contractors
                .then(|| contractors::for_event_tx(tx, event_id))
                .transpose()?;
            let checklists = projection
                .checklists
                .then(|| checklists::for_event_tx(tx, event_id))
                .transpose()?;
            let completed_items = projection
                .completed_items
                .then(|| checklists::completed_items_tx(tx, event_id))
                .transpose()?;

            Ok(Some(EventDetails {
                event,
                tasks,
                contractors,
                checklists,
                completed_items,
            }))
        });
        finish("event_details", Event::NAME, started, result, |r| {
            Outcome::Found(r.is_some())
        })
    }
}

pub(crate) fn by_owner_tx(conn: &Connection, owner_id: i64) -> Result<Vec<EventSummary>> {
    let filter = Filter::new()
        .eq("owner_id", owner_id)
        .order_by("date", SortOrder::Asc);
    let events = find_all_tx::<Event>(conn, &filter)?;
    Ok(events.into_iter().map(EventSummary::from).collect())
}
