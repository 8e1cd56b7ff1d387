//! Application configuration loaded from environment variables.

use std::time::Duration;

use stream_query::{BrokerConfig, DecodePolicy, ScanOptions};

/// Server and scan configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `8110`)
/// - `EVENTS_HOST` — event broker host (default: `"localhost"`)
/// - `EVENTS_PORT` — event broker port (default: `9092`)
/// - `EVENTS_TOPIC` — topic to scan (default: `"events"`)
/// - `SCAN_IDLE_TIMEOUT_MS` — wait budget for the next record (default: `1000`)
/// - `MALFORMED_RECORD_POLICY` — `"abort"` or `"skip"` (default: `"abort"`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub events_host: String,
    pub events_port: u16,
    pub events_topic: String,
    pub scan_idle_timeout: Duration,
    pub malformed_record_policy: DecodePolicy,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8110),
            events_host: std::env::var("EVENTS_HOST").unwrap_or_else(|_| "localhost".to_string()),
            events_port: std::env::var("EVENTS_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(9092),
            events_topic: std::env::var("EVENTS_TOPIC").unwrap_or_else(|_| "events".to_string()),
            scan_idle_timeout: Duration::from_millis(
                std::env::var("SCAN_IDLE_TIMEOUT_MS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(1000),
            ),
            malformed_record_policy: std::env::var("MALFORMED_RECORD_POLICY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_default(),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the broker connection settings.
    pub fn broker(&self) -> BrokerConfig {
        BrokerConfig {
            host: self.events_host.clone(),
            port: self.events_port,
            topic: self.events_topic.clone(),
        }
    }

    /// Returns the per-scan tuning.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            idle_timeout: self.scan_idle_timeout,
            decode_policy: self.malformed_record_policy,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8110,
            events_host: "localhost".to_string(),
            events_port: 9092,
            events_topic: "events".to_string(),
            scan_idle_timeout: Duration::from_millis(1000),
            malformed_record_policy: DecodePolicy::Abort,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8110);
        assert_eq!(config.events_topic, "events");
        assert_eq!(config.scan_idle_timeout, Duration::from_millis(1000));
        assert_eq!(config.malformed_record_policy, DecodePolicy::Abort);
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_broker_settings() {
        let config = Config {
            events_host: "kafka".to_string(),
            events_port: 29092,
            events_topic: "flights".to_string(),
            ..Config::default()
        };
        let broker = config.broker();
        assert_eq!(broker.bootstrap(), "kafka:29092");
        assert_eq!(broker.topic, "flights");
    }

    #[test]
    fn test_scan_options() {
        let config = Config {
            scan_idle_timeout: Duration::from_millis(250),
            malformed_record_policy: DecodePolicy::Skip,
            ..Config::default()
        };
        let options = config.scan_options();
        assert_eq!(options.idle_timeout, Duration::from_millis(250));
        assert_eq!(options.decode_policy, DecodePolicy::Skip);
    }
}
