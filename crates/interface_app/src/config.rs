//! Application configuration

use chrono::NaiveDate;
use serde::Deserialize;

use core_kernel::{SimulatedLatency, Timezone};

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Fmt,
    /// One JSON object per event
    Json,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level or filter directive
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Delay the in-memory adapters wait before answering
    pub latency_ms: u64,
    /// Timezone used to decide what "today" is
    pub timezone: Timezone,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Fmt,
            latency_ms: 0,
            timezone: Timezone::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `VESTA_*` environment variables
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("VESTA").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Simulated backend latency for the in-memory adapters
    pub fn latency(&self) -> SimulatedLatency {
        SimulatedLatency::from_millis(self.latency_ms)
    }

    /// Today's date in the marketplace timezone
    pub fn today(&self) -> NaiveDate {
        self.timezone.today()
    }
}
