/// Application configuration.
///
/// Read from the JSON file named by `EXPLORERLITE_CONFIG`, else from
/// `explorerlite.json` in the working directory when it exists. Every field is
/// optional in the file.
use crate::error::ConfigError;
use crate::navigation::DEFAULT_HISTORY_CAPACITY;
use crate::report::DEFAULT_TOP_EXTENSIONS;
use crate::scanner::WalkOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "EXPLORERLITE_CONFIG";

/// Config file looked up in the working directory when the variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "explorerlite.json";

const MIN_POLL_INTERVAL_MS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    /// Directory opened at startup. Defaults to the working directory.
    pub start_dir: Option<PathBuf>,
    /// How often the UI polls for scan results while any are outstanding.
    pub poll_interval_ms: u64,
    /// Extension rows listed in the details pane.
    pub histogram_top_k: usize,
    /// Navigation history bound.
    pub history_capacity: usize,
    /// Directory-walker threads per scan; 0 means one per CPU.
    pub walk_threads: usize,
    /// `tracing` max level: error, warn, info, debug, trace.
    pub log_level: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            start_dir: None,
            poll_interval_ms: 100,
            histogram_top_k: DEFAULT_TOP_EXTENSIONS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            walk_threads: 0,
            log_level: "info".to_string(),
        }
    }
}

impl ExplorerConfig {
    /// Resolve and load the config, falling back to defaults when no file is
    /// configured and the default file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            return Self::from_file(default_path);
        }
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            return Err(ConfigError::Invalid {
                message: format!(
                    "poll_interval_ms must be at least {MIN_POLL_INTERVAL_MS}, got {}",
                    self.poll_interval_ms
                ),
            });
        }
        if self.histogram_top_k == 0 {
            return Err(ConfigError::Invalid {
                message: "histogram_top_k must be at least 1".to_string(),
            });
        }
        if self.history_capacity < 2 {
            return Err(ConfigError::Invalid {
                message: format!(
                    "history_capacity must be at least 2, got {}",
                    self.history_capacity
                ),
            });
        }
        if self.log_level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::Invalid {
                message: format!("unknown log_level {:?}", self.log_level),
            });
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            threads: self.walk_threads,
        }
    }

    /// Parsed log level; INFO if the string is somehow invalid.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }

    /// The configured start directory, or the working directory.
    pub fn start_dir(&self) -> PathBuf {
        self.start_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
