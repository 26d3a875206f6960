/// Scan coordinator -- bridges background scan completion to the single
/// current selection.
///
/// The generation token is the only source of truth for relevance: a result
/// is shown if and only if its generation equals the generation of the most
/// recent selection. Arrival order and thread liveness are never consulted.
///
/// # Lifecycle per selection
///
/// ```text
/// Idle ──select dir──▶ Scanning ──matching result──▶ Rendered | Errored
///                         │
///                         └──newer selection──▶ (superseded, silent)
/// ```
///
/// A superseded scan still runs to completion; its result is received and
/// dropped by [`ScanCoordinator::poll`].
use super::{
    result_channel, start_scan, Generation, ScanOutcome, ScanRequest, ScanResult, WalkOptions,
};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::path::PathBuf;
use tracing::{debug, info};

/// Where the coordinator sends what the user should see.
///
/// Implemented by the frontend; every call happens on the thread that owns
/// the coordinator.
pub trait DisplaySink {
    /// A scan just started for the current selection.
    fn show_scanning(&mut self, request: &ScanRequest);
    /// The scan for the current selection finished. Called at most once per
    /// selection and never for a superseded scan.
    fn show_result(&mut self, result: &ScanResult);
    /// Cosmetic status-line text at each phase transition.
    fn set_status(&mut self, text: &str);
}

/// Starts the work for a request. The default launches a worker thread.
pub trait ScanLauncher: Send {
    /// Must eventually send exactly one result for `request` on `results`.
    fn launch(&self, request: ScanRequest, results: Sender<ScanResult>);
}

/// Launches each scan on its own named worker thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadLauncher {
    pub options: WalkOptions,
}

impl ScanLauncher for ThreadLauncher {
    fn launch(&self, request: ScanRequest, results: Sender<ScanResult>) {
        start_scan(request, self.options, results);
    }
}

/// Phase of the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// No folder selected, or the selection was invalidated.
    Idle,
    /// Waiting for the current generation's result.
    Scanning,
    /// The current generation succeeded and was shown.
    Rendered,
    /// The current generation failed and the error was shown.
    Errored,
}

pub struct ScanCoordinator {
    results_tx: Sender<ScanResult>,
    results_rx: Receiver<ScanResult>,
    launcher: Box<dyn ScanLauncher>,
    /// Last generation handed out; the next one is strictly greater.
    last_generation: u64,
    /// Request of the most recent selection, if it is still current.
    current: Option<ScanRequest>,
    phase: ScanPhase,
    /// Launched scans whose result has not been received yet, stale or not.
    outstanding: usize,
    last_rendered: Option<ScanResult>,
    discarded: u64,
}

impl ScanCoordinator {
    /// Coordinator that runs scans on worker threads.
    pub fn new(options: WalkOptions) -> Self {
        Self::with_launcher(Box::new(ThreadLauncher { options }))
    }

    pub fn with_launcher(launcher: Box<dyn ScanLauncher>) -> Self {
        let (results_tx, results_rx) = result_channel();
        Self {
            results_tx,
            results_rx,
            launcher,
            last_generation: 0,
            current: None,
            phase: ScanPhase::Idle,
            outstanding: 0,
            last_rendered: None,
            discarded: 0,
        }
    }

    /// A folder was selected: supersede whatever is current and scan `path`.
    ///
    /// The provisional display and status are emitted synchronously, before
    /// this returns.
    pub fn on_selection_changed(
        &mut self,
        path: PathBuf,
        label: impl Into<String>,
        sink: &mut dyn DisplaySink,
    ) -> Generation {
        let generation = self.next_generation();
        let request = ScanRequest {
            path,
            label: label.into(),
            generation,
        };

        if self.phase == ScanPhase::Scanning {
            if let Some(prev) = &self.current {
                debug!("Scan {} superseded by {generation}", prev.generation);
            }
        }

        self.current = Some(request.clone());
        self.phase = ScanPhase::Scanning;
        self.last_rendered = None;
        self.outstanding += 1;

        sink.show_scanning(&request);
        sink.set_status(&format!("Scanning folder: {}...", request.label));

        info!("Launching scan {generation} for {}", request.path.display());
        self.launcher.launch(request, self.results_tx.clone());
        generation
    }

    /// The selection moved to something that is not a folder (a file, nothing,
    /// another directory listing). Any in-flight scan becomes stale.
    pub fn invalidate(&mut self) {
        if self.current.is_some() {
            let generation = self.next_generation();
            debug!("Selection invalidated; current generation is now {generation}");
        }
        self.current = None;
        self.phase = ScanPhase::Idle;
        self.last_rendered = None;
    }

    /// Drain every available result without blocking.
    ///
    /// The result for the current generation is shown; all others are
    /// dropped. Returns `true` if something was shown.
    pub fn poll(&mut self, sink: &mut dyn DisplaySink) -> bool {
        let mut shown = false;
        loop {
            let result = match self.results_rx.try_recv() {
                Ok(r) => r,
                Err(TryRecvError::Empty) => break,
                // Unreachable while we hold a sender; treat as drained.
                Err(TryRecvError::Disconnected) => break,
            };
            self.outstanding = self.outstanding.saturating_sub(1);

            if self.is_current(result.generation) {
                self.accept(result, sink);
                shown = true;
            } else {
                self.discarded += 1;
                debug!(
                    "Discarding stale scan {} for {}",
                    result.generation,
                    result.path.display()
                );
            }
        }
        shown
    }

    fn accept(&mut self, result: ScanResult, sink: &mut dyn DisplaySink) {
        match &result.outcome {
            ScanOutcome::Success(summary) => {
                info!(
                    "Scan {} complete: {} files, {} folders, {} bytes in {:?}",
                    result.generation,
                    summary.file_count,
                    summary.folder_count,
                    summary.total_bytes,
                    result.duration
                );
                self.phase = ScanPhase::Rendered;
                sink.show_result(&result);
                sink.set_status(&format!("Scan complete for {}", result.label));
            }
            ScanOutcome::Failure { error_description } => {
                info!("Scan {} failed: {error_description}", result.generation);
                self.phase = ScanPhase::Errored;
                sink.show_result(&result);
                sink.set_status(&format!("Error scanning {}", result.label));
            }
        }
        self.last_rendered = Some(result);
    }

    fn is_current(&self, generation: Generation) -> bool {
        self.phase == ScanPhase::Scanning
            && self
                .current
                .as_ref()
                .is_some_and(|req| req.generation == generation)
    }

    fn next_generation(&mut self) -> Generation {
        self.last_generation += 1;
        Generation(self.last_generation)
    }

    /// Whether the caller should keep polling. `false` once every launched
    /// scan, stale ones included, has delivered its result.
    pub fn needs_polling(&self) -> bool {
        self.outstanding > 0
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Request of the current selection, if any.
    pub fn current(&self) -> Option<&ScanRequest> {
        self.current.as_ref()
    }

    pub fn current_generation(&self) -> Option<Generation> {
        self.current.as_ref().map(|r| r.generation)
    }

    /// The result last shown for the current selection, for redraws.
    pub fn last_rendered(&self) -> Option<&ScanResult> {
        self.last_rendered.as_ref()
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Results received and dropped as stale so far.
    pub fn discarded_count(&self) -> u64 {
        self.discarded
    }
}
