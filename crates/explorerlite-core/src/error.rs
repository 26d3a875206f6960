/// Error types shared by listing, navigation, scanning, and configuration.
///
/// None of these are fatal to the session: every variant ends up rendered as
/// text in the status bar or the details pane.
use std::path::PathBuf;
use thiserror::Error;

/// A directory could not be opened for a single-level listing.
#[derive(Debug, Error)]
#[error("Could not access path: {}: {source}", path.display())]
pub struct AccessError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl AccessError {
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// Whole-scan failures. Per-entry problems never produce one of these; they
/// are counted in `ScanSummary::skipped_entries` instead.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root vanished or could not be read before any entry was obtained.
    #[error("Scan root unavailable: {}: {source}", path.display())]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scan root exists but is not a directory.
    #[error("Scan root is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// The worker thread could not be started.
    #[error("Could not start scan worker: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// The walk panicked; the panic payload is kept as text.
    #[error("Scan worker panicked: {0}")]
    WorkerPanicked(String),
}

/// A navigation request was rejected. The session state is left untouched.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("Path not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Already at the top of {}", path.display())]
    NoParent { path: PathBuf },

    #[error(transparent)]
    Access(#[from] AccessError),
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}
