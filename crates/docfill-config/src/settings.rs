//! Process-wide settings that do not affect synthesis output.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Log level filter (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    #[serde(default)]
    pub log_level: Option<String>,

    /// Worker threads for parallel analysis; `None` lets rayon decide.
    #[serde(default)]
    pub parallel_jobs: Option<usize>,
}

/// Log levels accepted in `settings.log_level`.
pub const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];
