use std::sync::Arc;
use std::time::Duration;

use common::Envelope;

use crate::Result;
use crate::source::{EventSource, RecordCursor};

/// In-memory event source for testing.
///
/// Holds raw records in arrival order and provides the same interface as the
/// Kafka implementation. Running off the end of the record list stands in for
/// the idle timeout.
#[derive(Clone, Default)]
pub struct InMemoryEventSource {
    records: Arc<Vec<Vec<u8>>>,
}

impl InMemoryEventSource {
    /// Creates a new empty in-memory source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source over raw record bodies in arrival order.
    pub fn from_records(records: Vec<Vec<u8>>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Creates a source from envelopes, serialized to the wire format.
    pub fn from_envelopes(envelopes: &[Envelope]) -> serde_json::Result<Self> {
        let records = envelopes
            .iter()
            .map(serde_json::to_vec)
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(Self::from_records(records))
    }

    /// Returns the total number of raw records held.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

impl EventSource for InMemoryEventSource {
    type Cursor = InMemoryCursor;

    fn open(&self) -> Result<InMemoryCursor> {
        Ok(InMemoryCursor {
            records: Arc::clone(&self.records),
            next: 0,
        })
    }
}

/// Cursor over an in-memory record list.
pub struct InMemoryCursor {
    records: Arc<Vec<Vec<u8>>>,
    next: usize,
}

impl RecordCursor for InMemoryCursor {
    fn next_record(&mut self, _idle_timeout: Duration) -> Result<Option<Vec<u8>>> {
        match self.records.get(self.next) {
            Some(record) => {
                self.next += 1;
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }
}
