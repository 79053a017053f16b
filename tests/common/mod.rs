//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_origin;

use a2ui_runtime::config::{Config, StreamConfig};
use a2ui_runtime::origin::OriginClient;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Config pointed at `base_url` with short timeouts and fast reconnects.
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.origin.base_url = base_url.to_string();
    config.stream = StreamConfig {
        connect_timeout_seconds: 2,
        request_timeout_seconds: 2,
        idle_timeout_seconds: 5,
        retry_backoff_base_ms: 20,
        retry_backoff_max_ms: 100,
        max_reconnect_attempts: 0,
        report_timeout_seconds: 2,
    };
    config
}

pub fn origin_client(config: &Config) -> OriginClient {
    OriginClient::new(config).expect("Failed to build origin client")
}

/// Write `content` to a fresh `config.toml` in a temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Poll `check` until it returns true or `timeout` elapses.
pub async fn wait_until<F, Fut>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
