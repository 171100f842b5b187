//! Delivery retry and timeout configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Retry policy and provider timeouts for notification delivery.
///
/// The engine treats these values as immutable for its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Maximum number of dispatch attempts before a row is evicted from
    /// retry selection.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base retry interval in seconds. The worker tick period, and the
    /// base of the exponential backoff schedule.
    #[serde(default = "default_retry_interval")]
    pub retry_interval_sec: u32,
    /// Provider connection timeout in seconds.
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_sec: u64,
    /// Per-dispatch operation timeout in seconds.
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_sec: u64,
}

impl DeliveryConfig {
    /// The worker tick period.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.retry_interval_sec))
    }

    /// The timeout applied around a single provider call.
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_sec)
    }

    /// The timeout applied when establishing provider connections.
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_sec)
    }
}

fn default_max_retries() -> u32 {
    5
}

fn default_retry_interval() -> u32 {
    30
}

fn default_connection_timeout() -> u64 {
    10
}

fn default_operation_timeout() -> u64 {
    30
}
