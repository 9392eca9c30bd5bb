//! Async facade over the record store
//!
//! rusqlite is blocking, so every call is moved onto tokio's blocking pool.
//! Each call is its own unit of work and can be awaited independently.

use std::sync::Arc;

use evplan_core::model::{
    CompletedChecklistItem, EventDetails, EventProjection, Fields, Filter, Identified, Kind,
};

use crate::errors::{task_failed, Result};
use crate::repo::{Entity, RecordStore};

#[derive(Clone)]
pub struct AsyncRecordStore {
    inner: Arc<RecordStore>,
}

impl AsyncRecordStore {
    pub fn new(store: RecordStore) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// The blocking store this facade dispatches to
    pub fn blocking(&self) -> &RecordStore {
        &self.inner
    }

    async fn run<T, F>(&self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&RecordStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| task_failed(op, e))?
    }

    pub async fn find_by_id<K: Entity + Identified>(&self, id: i64) -> Result<Option<K>> {
        self.run("find_by_id", move |store| store.find_by_id::<K>(id))
            .await
    }

    pub async fn find_one<K: Entity>(&self, filter: Filter) -> Result<Option<K>> {
        self.run("find_one", move |store| store.find_one::<K>(&filter))
            .await
    }

    pub async fn find_all<K: Entity>(&self, filter: Filter) -> Result<Vec<K>> {
        self.run("find_all", move |store| store.find_all::<K>(&filter))
            .await
    }

    pub async fn add<K: Entity>(&self, fields: Fields) -> Result<K> {
        self.run("add", move |store| store.add::<K>(&fields)).await
    }

    pub async fn delete<K: Identified>(&self, id: i64) -> Result<bool> {
        self.run("delete", move |store| store.delete::<K>(id)).await
    }

    pub async fn update<K: Entity + Identified>(
        &self,
        id: i64,
        fields: Fields,
    ) -> Result<Option<K>> {
        self.run("update", move |store| store.update::<K>(id, &fields))
            .await
    }

    pub async fn delete_where<K: Kind>(&self, filter: Filter) -> Result<usize> {
        self.run("delete_where", move |store| store.delete_where::<K>(&filter))
            .await
    }

    pub async fn count<K: Kind>(&self, filter: Filter) -> Result<u64> {
        self.run("count", move |store| store.count::<K>(&filter))
            .await
    }

    pub async fn event_details(
        &self,
        event_id: i64,
        projection: EventProjection,
    ) -> Result<Option<EventDetails>> {
        self.run("event_details", move |store| {
            store.events().with_details(event_id, &projection)
        })
        .await
    }

    pub async fn mark_item_completed(
        &self,
        event_id: i64,
        item_id: i64,
        user_id: i64,
    ) -> Result<CompletedChecklistItem> {
        self.run("mark_item_completed", move |store| {
            store
                .checklists()
                .mark_item_completed(event_id, item_id, user_id)
        })
        .await
    }
}

impl From<RecordStore> for AsyncRecordStore {
    fn from(store: RecordStore) -> Self {
        Self::new(store)
    }
}
