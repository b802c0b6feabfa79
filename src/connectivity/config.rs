//! Connectivity service configuration.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Settings for [`ConnectivityService`](super::ConnectivityService).
///
/// # Example
///
/// ```rust
/// use groundwork::connectivity::ConnectivityConfig;
/// use std::time::Duration;
///
/// let config = ConnectivityConfig::builder()
///     .poll_interval(Duration::from_secs(5))
///     .build()
///     .unwrap();
/// assert_eq!(config.poll_interval, Duration::from_secs(5));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    /// Delay between health checks after the immediate first one
    pub poll_interval: Duration,
    /// Buffered observations between producers and the consumer
    pub channel_capacity: usize,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl ConnectivityConfig {
    pub fn builder() -> ConnectivityConfigBuilder {
        ConnectivityConfigBuilder::new()
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "poll_interval must be greater than zero".to_string(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "channel_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fluent builder for [`ConnectivityConfig`].
#[derive(Clone, Debug, Default)]
pub struct ConnectivityConfigBuilder {
    config: ConnectivityConfig,
}

impl ConnectivityConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = capacity;
        self
    }

    pub fn build(self) -> Result<ConnectivityConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
