//! Stream scan and query engine.
//!
//! Answers read-only queries over an append-only event log by scanning a
//! topic from its earliest retained record to a timeout-defined end. Every
//! query opens its own cursor, performs one full (or early-terminated) pass,
//! and holds no state afterwards: no offsets are committed and nothing is
//! cached between calls, so each query costs a walk of the retained log
//! regardless of what was asked.

pub mod error;
pub mod kafka;
pub mod memory;
pub mod query;
pub mod scanner;
pub mod source;

pub use common::{Envelope, EventKind};
pub use error::{Result, ScanError};
pub use kafka::{BrokerConfig, KafkaCursor, KafkaEventSource};
pub use memory::{InMemoryCursor, InMemoryEventSource};
pub use query::{EventStats, collect_stats, event_at_index, random_event};
pub use scanner::EventScanner;
pub use source::{DecodePolicy, EventSource, RecordCursor, ScanOptions};
