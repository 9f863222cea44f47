use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Storage key the browser version used; kept so exported data lines up
pub const DEFAULT_STORAGE_KEY: &str = "chaosToDoTasks";

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store file. Absent = `<data dir>/chaos-todo/store.json`
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            path: None,
            key: default_storage_key(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Total length of a counter animation
    #[serde(default = "default_counter_duration_ms")]
    pub counter_duration_ms: u64,
    /// Number of discrete steps in a counter animation
    #[serde(default = "default_counter_steps")]
    pub counter_steps: u32,
    #[serde(default = "default_completing_ms")]
    pub completing_ms: u64,
    #[serde(default = "default_shake_ms")]
    pub shake_ms: u64,
    /// chrono format string for dates a week or more old
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Hex color overrides keyed by theme slot
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            counter_duration_ms: default_counter_duration_ms(),
            counter_steps: default_counter_steps(),
            completing_ms: default_completing_ms(),
            shake_ms: default_shake_ms(),
            date_format: default_date_format(),
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file. Absent = `<data dir>/chaos-todo/chaos-todo.log`
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_counter_duration_ms() -> u64 {
    300
}

fn default_counter_steps() -> u32 {
    15
}

fn default_completing_ms() -> u64 {
    400
}

fn default_shake_ms() -> u64 {
    500
}

fn default_date_format() -> String {
    "%-m/%-d/%Y".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
