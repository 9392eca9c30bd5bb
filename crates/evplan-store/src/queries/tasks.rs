use std::time::Instant;

use evplan_core::log_op_start;
use evplan_core::model::{Filter, Kind, SortOrder, Task, TaskSummary};
use rusqlite::Connection;

use crate::errors::Result;
use crate::repo::record_store::{finish, Outcome};
use crate::repo::tx::find_all_tx;
use crate::repo::RecordStore;

pub struct TaskQueries<'a> {
    store: &'a RecordStore,
}

impl<'a> TaskQueries<'a> {
    pub(crate) fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Tasks of an event, earliest first
    pub fn for_event(&self, event_id: i64) -> Result<Vec<TaskSummary>> {
        let started = Instant::now();
        log_op_start!("tasks_for_event", kind = Task::NAME);
        let result = self.store.read(|tx| for_event_tx(tx, event_id));
        finish("tasks_for_event", Task::NAME, started, result, |r| {
            Outcome::Rows(r.len() as u64)
        })
    }
}

pub(crate) fn for_event_tx(conn: &Connection, event_id: i64) -> Result<Vec<TaskSummary>> {
    let filter = Filter::new()
        .eq("event_id", event_id)
        .order_by("date", SortOrder::Asc);
    let tasks = find_all_tx::<Task>(conn, &filter)?;
    Ok(tasks.into_iter().map(TaskSummary::from).collect())
}
