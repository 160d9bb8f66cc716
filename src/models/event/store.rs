use chrono::Utc;
use serde_json::Value;
use std::cell::Cell;
use std::rc::Rc;

use crate::state::AsyncState;
use crate::store::{OrderBy, Row, StoreError, Table, TableStore};
use super::normalize::normalize_event;
use super::types::{CalendarEvent, EventInput, EventPatch};

/// Liveness flag shared between a store and whoever owns its view.
///
/// After `teardown()`, results of calls still in flight are dropped instead of
/// being applied to the store.
#[derive(Debug, Clone)]
pub struct MountGuard(Rc<Cell<bool>>);

impl MountGuard {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn teardown(&self) {
        self.0.set(false);
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

fn patch_row(patch: &EventPatch) -> Row {
    match serde_json::to_value(patch) {
        Ok(Value::Object(map)) => map,
        _ => Row::new(),
    }
}

/// In-memory, normalized view of the `events` table.
///
/// The table is the source of truth: the list is replaced wholesale by
/// `fetch_all` and patched after each successful write. A failed call leaves
/// the list exactly as it was.
pub struct EventStore<'s, S> {
    store: &'s S,
    events: Vec<CalendarEvent>,
    status: AsyncState<()>,
    guard: MountGuard,
}

impl<'s, S: TableStore> EventStore<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            events: Vec::new(),
            status: AsyncState::Idle,
            guard: MountGuard::new(),
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<CalendarEvent> {
        self.events
    }

    pub fn find(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn status(&self) -> &AsyncState<()> {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_pending()
    }

    /// Handle for tearing the store down from the owning view.
    pub fn guard(&self) -> MountGuard {
        self.guard.clone()
    }

    fn settle<T>(&mut self, result: &Result<T, StoreError>) {
        self.status = match result {
            Ok(_) => AsyncState::Succeeded(()),
            Err(e) => AsyncState::Failed(e.to_string()),
        };
    }

    /// Reload every event, ordered by date.
    pub async fn fetch_all(&mut self) -> Result<(), StoreError> {
        self.status = AsyncState::Pending;
        let result = self
            .store
            .select(Table::Events, Some(OrderBy::asc("date")))
            .await;
        self.settle(&result);
        if !self.guard.is_alive() {
            log::debug!("Discarding event fetch for a torn-down view");
            return result.map(|_| ());
        }

        match result {
            Ok(rows) => {
                self.events = rows.iter().map(normalize_event).collect();
                log::debug!("Loaded {} events", self.events.len());
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to fetch events: {e}");
                Err(e)
            }
        }
    }

    /// Insert a new event stamped with `creator` and the current time.
    pub async fn create(&mut self, input: &EventInput, creator: &str) -> Result<CalendarEvent, StoreError> {
        let now = Utc::now().to_rfc3339();
        let mut row = patch_row(&EventPatch::from(input.clone()));
        row.insert("created_by".into(), Value::String(creator.to_string()));
        row.insert("created_at".into(), Value::String(now.clone()));
        row.insert("updated_at".into(), Value::String(now));

        self.status = AsyncState::Pending;
        let result = self.store.insert(Table::Events, row).await.map(|saved| normalize_event(&saved));
        self.settle(&result);
        if !self.guard.is_alive() {
            return result;
        }

        match result {
            Ok(event) => {
                self.events.push(event.clone());
                Ok(event)
            }
            Err(e) => {
                log::error!("Failed to create event: {e}");
                Err(e)
            }
        }
    }

    /// Send a partial update and replace the cached copy with what the table returns.
    pub async fn update(&mut self, id: &str, patch: &EventPatch) -> Result<CalendarEvent, StoreError> {
        let mut row = patch_row(patch);
        row.insert("updated_at".into(), Value::String(Utc::now().to_rfc3339()));

        self.status = AsyncState::Pending;
        let result = self
            .store
            .update(Table::Events, id, row)
            .await
            .map(|saved| normalize_event(&saved));
        self.settle(&result);
        if !self.guard.is_alive() {
            return result;
        }

        match result {
            Ok(event) => {
                if let Some(slot) = self.events.iter_mut().find(|e| e.id == id) {
                    *slot = event.clone();
                }
                Ok(event)
            }
            Err(e) => {
                log::error!("Failed to update event {id}: {e}");
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.status = AsyncState::Pending;
        let result = self.store.delete(Table::Events, id).await;
        self.settle(&result);
        if !self.guard.is_alive() {
            return result;
        }

        match result {
            Ok(()) => {
                self.events.retain(|e| e.id != id);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to delete event {id}: {e}");
                Err(e)
            }
        }
    }
}
