//! ## sparhund-telemetry::store
//! **Per-run, append-only, category-partitioned event collection**
//!
//! Insertion order is chronological order of occurrence and is never
//! reordered or deduplicated. The store serializes directly into the
//! persisted artifact shape: three top-level category arrays.

use serde::Serialize;
use tracing::debug;

use crate::events::{EventCategory, EventRecord};

#[derive(Debug, Default, Clone, Serialize, PartialEq)]
pub struct EventStore {
    file_processes: Vec<EventRecord>,
    network_processes: Vec<EventRecord>,
    executable_processes: Vec<EventRecord>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to its category partition. O(1), never fails.
    pub fn append(&mut self, record: EventRecord) {
        let category = record.category();
        debug!(category = category.key(), "event appended");
        match category {
            EventCategory::File => self.file_processes.push(record),
            EventCategory::Network => self.network_processes.push(record),
            EventCategory::Executable => self.executable_processes.push(record),
        }
    }

    pub fn file_events(&self) -> &[EventRecord] {
        &self.file_processes
    }

    pub fn network_events(&self) -> &[EventRecord] {
        &self.network_processes
    }

    pub fn executable_events(&self) -> &[EventRecord] {
        &self.executable_processes
    }

    /// Total records across all categories.
    pub fn len(&self) -> usize {
        self.file_processes.len() + self.network_processes.len() + self.executable_processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point-in-time copy of the category → event mapping, suitable
    /// for serialization. Reflects every append made so far.
    pub fn snapshot(&self) -> EventStore {
        self.clone()
    }
}
