use thiserror::Error;

/// Errors that can occur while scanning the event log.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The broker was unreachable or the consumer failed mid-scan.
    #[error("event broker error: {0}")]
    Connection(#[from] rdkafka::error::KafkaError),

    /// The requested topic does not exist on the broker.
    #[error("topic '{0}' not found")]
    TopicNotFound(String),

    /// A record body did not decode as an event envelope.
    ///
    /// `record` is the 1-based position of the record within this scan.
    #[error("malformed record {record}: {source}")]
    MalformedRecord {
        record: u64,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
