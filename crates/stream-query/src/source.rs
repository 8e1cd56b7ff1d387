use std::str::FromStr;
use std::time::Duration;

use crate::Result;

/// A connection point into the event log.
///
/// Implementations must be thread-safe (Send + Sync); the HTTP layer shares
/// one source across requests and opens a fresh cursor per query. Cursors are
/// independent and uncommitted: no scan affects what a later scan will see,
/// beyond records appended to the log in the meantime.
pub trait EventSource: Send + Sync {
    type Cursor: RecordCursor;

    /// Opens a cursor positioned at the earliest retained record.
    ///
    /// Fails if the broker is unreachable or the topic does not exist.
    fn open(&self) -> Result<Self::Cursor>;
}

/// A read handle into a topic, advancing one record per pull.
pub trait RecordCursor {
    /// Blocks up to `idle_timeout` for the next raw record.
    ///
    /// Returns `Ok(None)` when the wait budget expires, which a scan treats
    /// as the end of available data. The log may receive more records
    /// immediately afterwards; this is a snapshot-by-timeout policy, not true
    /// end-of-topic detection.
    fn next_record(&mut self, idle_timeout: Duration) -> Result<Option<Vec<u8>>>;
}

/// What a scan does with a record that fails to decode as an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Terminate the scan with [`ScanError::MalformedRecord`](crate::ScanError).
    #[default]
    Abort,
    /// Log a warning and continue with the next record.
    Skip,
}

impl FromStr for DecodePolicy {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "abort" => Ok(DecodePolicy::Abort),
            "skip" => Ok(DecodePolicy::Skip),
            other => Err(format!("unknown decode policy '{other}'")),
        }
    }
}

/// Per-scan tuning, constructed once at startup and shared by all queries.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    /// Maximum wait for the next record before the scan is exhausted.
    pub idle_timeout: Duration,
    /// Handling of records that do not decode as envelopes.
    pub decode_policy: DecodePolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_millis(1000),
            decode_policy: DecodePolicy::Abort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_policy_parses_known_values() {
        assert_eq!("abort".parse::<DecodePolicy>(), Ok(DecodePolicy::Abort));
        assert_eq!("skip".parse::<DecodePolicy>(), Ok(DecodePolicy::Skip));
    }

    #[test]
    fn decode_policy_rejects_unknown_values() {
        assert!("lenient".parse::<DecodePolicy>().is_err());
    }

    #[test]
    fn scan_options_defaults() {
        let options = ScanOptions::default();
        assert_eq!(options.idle_timeout, Duration::from_millis(1000));
        assert_eq!(options.decode_policy, DecodePolicy::Abort);
    }
}
