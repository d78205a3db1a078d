//! Event dispatch
//!
//! [`EventBus`] is the seam to the host's logging framework. Two buses ship
//! with the crate:
//! - [`EventLog`]: keeps records in memory
//! - [`TracingEventBus`]: writes records to structured logs

use crate::error::EventResult;
use crate::types::EventRecord;
use parking_lot::Mutex;

/// Sink for dispatched events
pub trait EventBus: Send + Sync {
    /// Accept one event record
    ///
    /// # Errors
    /// Returns an error if the record cannot be stored
    fn emit(&self, record: EventRecord) -> EventResult<()>;
}

/// In-memory event log
#[derive(Debug, Default)]
pub struct EventLog {
    inner: Mutex<Vec<EventRecord>>,
}

impl EventLog {
    /// Create an empty log
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records in dispatch order
    #[must_use]
    pub fn records(&self) -> Vec<EventRecord> {
        self.inner.lock().clone()
    }

    /// Records with the given event name
    #[must_use]
    pub fn records_named(&self, event_name: &str) -> Vec<EventRecord> {
        self.inner
            .lock()
            .iter()
            .filter(|r| r.event_name == event_name)
            .cloned()
            .collect()
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if log is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl EventBus for EventLog {
    fn emit(&self, record: EventRecord) -> EventResult<()> {
        self.inner.lock().push(record);
        Ok(())
    }
}

/// Bus that writes each record as a structured log line
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventBus;

impl EventBus for TracingEventBus {
    fn emit(&self, record: EventRecord) -> EventResult<()> {
        let other = serde_json::to_string(&record.other)?;
        tracing::info!(
            event_id = %record.event_id,
            event_name = %record.event_name,
            component = %record.component,
            crud = %record.crud.as_char(),
            edulevel = record.edulevel.value(),
            context_id = record.context_id,
            user_id = ?record.user_id,
            other = %other,
            "{}",
            record.description
        );
        Ok(())
    }
}

impl<B: EventBus + ?Sized> EventBus for &B {
    fn emit(&self, record: EventRecord) -> EventResult<()> {
        (**self).emit(record)
    }
}
