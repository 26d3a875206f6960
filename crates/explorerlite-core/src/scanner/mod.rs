/// Scanner module -- background recursive folder statistics.
///
/// One scan is one worker thread running [`walk::scan_tree`] and sending
/// exactly one [`ScanResult`] down a shared channel. There is no cancellation:
/// a scan always runs to completion. Relevance is decided on the receiving
/// side by [`coordinator::ScanCoordinator`] comparing generation tokens, so a
/// superseded scan keeps using CPU until it finishes and its result is dropped.
pub mod coordinator;
pub mod walk;

use crate::error::ScanError;
use crate::model::ExtensionHistogram;
use crossbeam_channel::{Receiver, Sender};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub use coordinator::{DisplaySink, ScanCoordinator, ScanPhase};
pub use walk::{scan_tree, WalkOptions};

/// Monotonically increasing identity of one scan launch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One scan invocation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub path: PathBuf,
    /// Name shown to the user, usually the folder name.
    pub label: String,
    pub generation: Generation,
}

/// Aggregate statistics for everything below a scan root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Bytes of regular files; links are never sized.
    pub total_bytes: u64,
    pub file_count: u64,
    /// Directories below the root, the root itself excluded.
    pub folder_count: u64,
    pub extensions: ExtensionHistogram,
    /// Entries that could not be read (unreadable directories, failed stats).
    pub skipped_entries: u64,
}

/// Terminal outcome of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Success(ScanSummary),
    Failure { error_description: String },
}

/// The single message a scan worker sends.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub generation: Generation,
    pub label: String,
    pub path: PathBuf,
    pub outcome: ScanOutcome,
    /// Wall-clock walk time. Not part of the outcome.
    pub duration: Duration,
}

impl ScanResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ScanOutcome::Success(_))
    }
}

/// Create the result channel.
///
/// Unbounded: superseded scans still finishing must never block on a slow
/// consumer, and each scan sends exactly one small message.
pub fn result_channel() -> (Sender<ScanResult>, Receiver<ScanResult>) {
    crossbeam_channel::unbounded()
}

/// Start a scan on a background thread.
///
/// Exactly one [`ScanResult`] tagged with `request.generation` is sent on
/// `results`, including when the worker cannot be spawned or panics.
pub fn start_scan(request: ScanRequest, options: WalkOptions, results: Sender<ScanResult>) {
    let generation = request.generation;
    let worker_tx = results.clone();
    let worker_request = request.clone();

    let spawned = thread::Builder::new()
        .name(format!("explorerlite-scan-{}", generation.0))
        .spawn(move || run_scan(worker_request, options, worker_tx));

    if let Err(err) = spawned {
        warn!("Could not spawn scan worker for {}: {err}", request.path.display());
        let result = ScanResult {
            generation,
            label: request.label,
            path: request.path,
            outcome: failure(&ScanError::SpawnFailed(err)),
            duration: Duration::ZERO,
        };
        // The coordinator owns the receiver; it only disappears at shutdown.
        let _ = results.send(result);
    }
}

/// Worker body: walk, convert panics into failures, send once.
fn run_scan(request: ScanRequest, options: WalkOptions, results: Sender<ScanResult>) {
    info!(
        "Scan {} started for {}",
        request.generation,
        request.path.display()
    );
    let start = Instant::now();

    let walked = panic::catch_unwind(AssertUnwindSafe(|| scan_tree(&request.path, &options)));
    let outcome = match walked {
        Ok(Ok(summary)) => ScanOutcome::Success(summary),
        Ok(Err(err)) => failure(&err),
        Err(payload) => failure(&ScanError::WorkerPanicked(panic_message(payload.as_ref()))),
    };

    let duration = start.elapsed();
    debug!(
        "Scan {} finished in {duration:?} (success: {})",
        request.generation,
        matches!(outcome, ScanOutcome::Success(_))
    );

    let _ = results.send(ScanResult {
        generation: request.generation,
        label: request.label,
        path: request.path,
        outcome,
        duration,
    });
}

fn failure(err: &ScanError) -> ScanOutcome {
    ScanOutcome::Failure {
        error_description: err.to_string(),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
