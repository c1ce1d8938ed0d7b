use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_LOG_FILTER :&str = "info";

pub const DEFAULT_THREAD_PREFIX :&str = "graph-worker";

/// Logging options, see [`crate::logger::init_logger`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub filter: String,
    /// Append log lines to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: DEFAULT_LOG_FILTER.to_string(),
            file: None,
        }
    }
}

/// Settings of the algorithm executor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Worker threads of the pool, 0 means one per logical CPU.
    pub worker_threads: usize,
    pub thread_name_prefix: String,
    pub log: LogConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            worker_threads: 0,
            thread_name_prefix: DEFAULT_THREAD_PREFIX.to_string(),
            log: LogConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("invalid engine config")
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Resolved number of worker threads.
    pub fn worker_count(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus::get()
        } else {
            self.worker_threads
        }
    }
}
