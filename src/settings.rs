use serde::{Deserialize, Serialize};

use crate::config::files::LOG_RETENTION_DAYS;
use crate::logging::LogLevel;

fn default_log_level() -> String {
    LogLevel::Info.to_string()
}

fn default_log_retention_days() -> u32 {
    LOG_RETENTION_DAYS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    // Logging
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_to_file: bool,
    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u32,

    // Profile last used, by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_profile: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_to_file: false,
            log_retention_days: default_log_retention_days(),
            active_profile: None,
        }
    }
}

impl Settings {
    /// Parsed log level; unknown strings fall back to `Info`.
    pub fn log_level(&self) -> LogLevel {
        self.log_level.parse().unwrap_or(LogLevel::Info)
    }
}
