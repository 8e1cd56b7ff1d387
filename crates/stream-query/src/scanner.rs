//! Lazy scan of a topic into a finite sequence of decoded envelopes.

use common::{Envelope, EventKind};
use serde::Deserialize;

use crate::error::{Result, ScanError};
use crate::source::{DecodePolicy, RecordCursor, ScanOptions};

/// Raw wire shape. Tolerates a missing `type` so that records without one are
/// treated as unrecognized rather than malformed.
#[derive(Deserialize)]
struct WireEnvelope {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    payload: serde_json::Value,
}

fn decode(record: &[u8]) -> serde_json::Result<Option<Envelope>> {
    let wire: WireEnvelope = serde_json::from_slice(record)?;
    Ok(wire
        .kind
        .as_deref()
        .and_then(EventKind::from_wire)
        .map(|kind| Envelope::new(kind, wire.payload)))
}

/// A lazy, finite, non-restartable pass over a cursor.
///
/// Yields envelopes in log arrival order. Records with an unrecognized or
/// missing kind are consumed and skipped. The sequence ends when the cursor's
/// idle timeout expires with no new record; once exhausted (or failed) the
/// iterator is fused and a new scan requires a new cursor.
pub struct EventScanner<C> {
    cursor: C,
    options: ScanOptions,
    records_seen: u64,
    done: bool,
}

impl<C: RecordCursor> EventScanner<C> {
    pub fn new(cursor: C, options: ScanOptions) -> Self {
        Self {
            cursor,
            options,
            records_seen: 0,
            done: false,
        }
    }

    /// Raw records pulled so far, including skipped and unrecognized ones.
    pub fn records_seen(&self) -> u64 {
        self.records_seen
    }
}

impl<C: RecordCursor> Iterator for EventScanner<C> {
    type Item = Result<Envelope>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let record = match self.cursor.next_record(self.options.idle_timeout) {
                Ok(Some(record)) => record,
                Ok(None) => {
                    self.done = true;
                    tracing::debug!(records = self.records_seen, "scan exhausted on idle timeout");
                    return None;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };
            self.records_seen += 1;

            match decode(&record) {
                Ok(Some(envelope)) => return Some(Ok(envelope)),
                Ok(None) => continue,
                Err(source) => match self.options.decode_policy {
                    DecodePolicy::Abort => {
                        self.done = true;
                        return Some(Err(ScanError::MalformedRecord {
                            record: self.records_seen,
                            source,
                        }));
                    }
                    DecodePolicy::Skip => {
                        tracing::warn!(record = self.records_seen, error = %source, "skipping malformed record");
                        continue;
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::memory::{InMemoryCursor, InMemoryEventSource};
    use crate::source::EventSource;

    use super::*;

    fn record(kind: &str, payload: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({"type": kind, "payload": payload})).unwrap()
    }

    fn scan(records: Vec<Vec<u8>>, policy: DecodePolicy) -> EventScanner<InMemoryCursor> {
        let source = InMemoryEventSource::from_records(records);
        let options = ScanOptions {
            idle_timeout: Duration::from_millis(10),
            decode_policy: policy,
        };
        EventScanner::new(source.open().unwrap(), options)
    }

    #[test]
    fn yields_envelopes_in_arrival_order() {
        let scanner = scan(
            vec![
                record("flight_schedule", serde_json::json!("A")),
                record("passenger_checkin", serde_json::json!("X")),
                record("flight_schedule", serde_json::json!("B")),
            ],
            DecodePolicy::Abort,
        );

        let envelopes: Vec<Envelope> = scanner.map(|e| e.unwrap()).collect();
        assert_eq!(
            envelopes,
            vec![
                Envelope::new(EventKind::FlightSchedule, serde_json::json!("A")),
                Envelope::new(EventKind::PassengerCheckin, serde_json::json!("X")),
                Envelope::new(EventKind::FlightSchedule, serde_json::json!("B")),
            ]
        );
    }

    #[test]
    fn skips_unrecognized_and_untyped_records() {
        let mut scanner = scan(
            vec![
                record("gate_change", serde_json::json!({})),
                serde_json::to_vec(&serde_json::json!({"payload": 1})).unwrap(),
                record("flight_schedule", serde_json::json!("A")),
            ],
            DecodePolicy::Abort,
        );

        let envelope = scanner.next().unwrap().unwrap();
        assert_eq!(envelope.kind, EventKind::FlightSchedule);
        assert!(scanner.next().is_none());
        assert_eq!(scanner.records_seen(), 3);
    }

    #[test]
    fn abort_policy_fails_on_malformed_record() {
        let mut scanner = scan(
            vec![
                record("flight_schedule", serde_json::json!("A")),
                b"not json".to_vec(),
                record("flight_schedule", serde_json::json!("B")),
            ],
            DecodePolicy::Abort,
        );

        assert!(scanner.next().unwrap().is_ok());
        let err = scanner.next().unwrap().unwrap_err();
        assert!(matches!(err, ScanError::MalformedRecord { record: 2, .. }));
        // Fused after the failure.
        assert!(scanner.next().is_none());
    }

    #[test]
    fn skip_policy_continues_past_malformed_record() {
        let scanner = scan(
            vec![
                record("flight_schedule", serde_json::json!("A")),
                b"not json".to_vec(),
                record("flight_schedule", serde_json::json!("B")),
            ],
            DecodePolicy::Skip,
        );

        let payloads: Vec<serde_json::Value> =
            scanner.map(|e| e.unwrap().payload).collect();
        assert_eq!(payloads, vec![serde_json::json!("A"), serde_json::json!("B")]);
    }

    #[test]
    fn non_string_type_field_is_malformed() {
        let mut scanner = scan(
            vec![serde_json::to_vec(&serde_json::json!({"type": 7, "payload": {}})).unwrap()],
            DecodePolicy::Abort,
        );
        assert!(matches!(
            scanner.next().unwrap().unwrap_err(),
            ScanError::MalformedRecord { record: 1, .. }
        ));
    }

    #[test]
    fn empty_log_exhausts_immediately() {
        let mut scanner = scan(vec![], DecodePolicy::Abort);
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
        assert_eq!(scanner.records_seen(), 0);
    }
}
