//! Kafka-backed event source.

use std::time::Duration;

use rdkafka::Offset;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{BaseConsumer, Consumer};
use rdkafka::message::Message;
use rdkafka::topic_partition_list::TopicPartitionList;

use crate::error::{Result, ScanError};
use crate::source::{EventSource, RecordCursor};

const METADATA_TIMEOUT: Duration = Duration::from_secs(10);

/// Broker address and topic, constructed once at startup.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub topic: String,
}

impl BrokerConfig {
    /// Returns the `"host:port"` bootstrap string.
    pub fn bootstrap(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Event source backed by a Kafka topic.
///
/// Each `open` builds an independent consumer with offset commits disabled
/// and every partition assigned at the earliest retained offset, so
/// concurrent queries never interfere with each other's read position.
#[derive(Clone)]
pub struct KafkaEventSource {
    config: BrokerConfig,
}

impl KafkaEventSource {
    pub fn new(config: &BrokerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl EventSource for KafkaEventSource {
    type Cursor = KafkaCursor;

    fn open(&self) -> Result<KafkaCursor> {
        // Manual partition assignment; the group id is a throwaway since
        // offsets are never committed.
        let consumer: BaseConsumer = ClientConfig::new()
            .set("bootstrap.servers", self.config.bootstrap())
            .set("group.id", format!("analyzer-{}", std::process::id()))
            .set("enable.auto.commit", "false")
            .create()?;

        let metadata = consumer.fetch_metadata(Some(&self.config.topic), METADATA_TIMEOUT)?;
        let topic = metadata
            .topics()
            .iter()
            .find(|t| t.name() == self.config.topic)
            .filter(|t| !t.partitions().is_empty())
            .ok_or_else(|| ScanError::TopicNotFound(self.config.topic.clone()))?;

        let mut assignment = TopicPartitionList::new();
        for partition in topic.partitions() {
            assignment.add_partition_offset(&self.config.topic, partition.id(), Offset::Beginning)?;
        }
        consumer.assign(&assignment)?;

        tracing::debug!(
            topic = %self.config.topic,
            partitions = topic.partitions().len(),
            "opened read cursor at earliest offset"
        );

        Ok(KafkaCursor { consumer })
    }
}

/// Cursor over an assigned consumer. Dropped (and the connection with it)
/// when the scan ends, on every exit path.
pub struct KafkaCursor {
    consumer: BaseConsumer,
}

impl RecordCursor for KafkaCursor {
    fn next_record(&mut self, idle_timeout: Duration) -> Result<Option<Vec<u8>>> {
        match self.consumer.poll(idle_timeout) {
            None => Ok(None),
            Some(Ok(message)) => Ok(Some(message.payload().unwrap_or_default().to_vec())),
            Some(Err(err)) => Err(ScanError::Connection(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_formatting() {
        let config = BrokerConfig {
            host: "kafka".to_string(),
            port: 9092,
            topic: "events".to_string(),
        };
        assert_eq!(config.bootstrap(), "kafka:9092");
    }
}
