use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub origin: OriginConfig,
    #[serde(default)]
    pub stream: StreamConfig,
}

/// Where the agent-side origin server lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginConfig {
    /// Scheme + host + optional path prefix (e.g., "http://127.0.0.1:8000").
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Timeouts and reconnect policy for the event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// TCP/TLS connect timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Time allowed for the stream's response head and for action posts (default: 30).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    /// Longest gap between stream chunks before reconnecting (default: 120).
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u32,
    /// First reconnect delay in milliseconds (default: 250).
    #[serde(default = "default_retry_backoff_base_ms")]
    pub retry_backoff_base_ms: u64,
    /// Upper bound for reconnect delays in milliseconds (default: 10000).
    #[serde(default = "default_retry_backoff_max_ms")]
    pub retry_backoff_max_ms: u64,
    /// Consecutive failed connects before giving up; 0 retries forever.
    #[serde(default)]
    pub max_reconnect_attempts: u32,
    /// Timeout for posting an error report in seconds (default: 5).
    #[serde(default = "default_report_timeout")]
    pub report_timeout_seconds: u32,
}

impl StreamConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds.into())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.into())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_seconds.into())
    }

    pub fn retry_backoff_base(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_base_ms)
    }

    pub fn retry_backoff_max(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_max_ms)
    }

    pub fn report_timeout(&self) -> Duration {
        Duration::from_secs(self.report_timeout_seconds.into())
    }

    /// `None` when reconnects are unlimited.
    pub fn reconnect_limit(&self) -> Option<u32> {
        (self.max_reconnect_attempts > 0).then_some(self.max_reconnect_attempts)
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_request_timeout() -> u32 {
    30
}

fn default_idle_timeout() -> u32 {
    120
}

fn default_retry_backoff_base_ms() -> u64 {
    250
}

fn default_retry_backoff_max_ms() -> u64 {
    10_000
}

fn default_report_timeout() -> u32 {
    5
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: default_connect_timeout(),
            request_timeout_seconds: default_request_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
            retry_backoff_base_ms: default_retry_backoff_base_ms(),
            retry_backoff_max_ms: default_retry_backoff_max_ms(),
            max_reconnect_attempts: 0,
            report_timeout_seconds: default_report_timeout(),
        }
    }
}
