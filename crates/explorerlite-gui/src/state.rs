/// Application state management.
///
/// Centralises all mutable state that the UI reads and writes. Directory
/// listing and navigation are synchronous; folder scans run on worker threads
/// and their results are drained in `process_scan_results()` once per frame.
use explorerlite_core::config::ExplorerConfig;
use explorerlite_core::error::NavigationError;
use explorerlite_core::model::{EntryKind, ListedEntry};
use explorerlite_core::navigation::Browser;
use explorerlite_core::report;
use explorerlite_core::scanner::{DisplaySink, ScanCoordinator, ScanPhase, ScanRequest, ScanResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Status text shown when nothing is happening.
pub const STATUS_READY: &str = "Ready";

/// Details pane and status bar contents.
///
/// This is the coordinator's display sink: provisional and final scan bodies
/// land here, as do the file and unknown-entry bodies written by `AppState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub text: String,
    pub status: String,
    top_k: usize,
}

impl DetailsView {
    pub fn new(top_k: usize) -> Self {
        Self {
            text: String::new(),
            status: STATUS_READY.to_string(),
            top_k,
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

impl DisplaySink for DetailsView {
    fn show_scanning(&mut self, request: &ScanRequest) {
        self.text = report::scanning_text(request);
    }

    fn show_result(&mut self, result: &ScanResult) {
        self.text = report::result_text(result, self.top_k);
    }

    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
    }
}

/// All application state.
pub struct AppState {
    pub config: ExplorerConfig,
    pub browser: Browser,
    pub coordinator: ScanCoordinator,
    pub details: DetailsView,

    // ── UI state ───────────────────────────────────────
    /// Index into `browser.entries()` of the highlighted row.
    pub selected: Option<usize>,
    /// Contents of the path bar; reset to the current directory after every
    /// navigation attempt.
    pub path_input: String,
    /// Pending modal error, shown until dismissed.
    pub error_popup: Option<String>,
    pub dark_mode: bool,
}

impl AppState {
    /// Open the configured start directory (with fallbacks) and an idle
    /// coordinator.
    pub fn new(config: ExplorerConfig) -> Self {
        let coordinator = ScanCoordinator::new(config.walk_options());
        Self::with_coordinator(config, coordinator)
    }

    /// Same as [`AppState::new`] with a caller-supplied coordinator.
    pub fn with_coordinator(config: ExplorerConfig, coordinator: ScanCoordinator) -> Self {
        let (browser, open_err) = Browser::open(&config.start_dir(), config.history_capacity);
        let mut details = DetailsView::new(config.histogram_top_k);
        let mut error_popup = None;

        if let Some(err) = open_err {
            if browser.entries().is_empty() && !browser.current_path().is_dir() {
                details.status = "Error: Cannot access any valid path.".to_string();
            }
            error_popup = Some(format!("Could not open start directory: {err}"));
        }

        let path_input = browser.current_path().display().to_string();
        Self {
            config,
            browser,
            coordinator,
            details,
            selected: None,
            path_input,
            error_popup,
            dark_mode: true,
        }
    }

    // ── Selection ──────────────────────────────────────

    pub fn selected_entry(&self) -> Option<&ListedEntry> {
        self.selected.and_then(|i| self.browser.entries().get(i))
    }

    /// Highlight a listing row and show its details.
    ///
    /// A folder starts a background scan; anything else makes any running
    /// scan stale.
    pub fn select_entry(&mut self, index: usize) {
        let Some(entry) = self.browser.entries().get(index).cloned() else {
            self.clear_selection();
            return;
        };
        self.selected = Some(index);
        let path = self.browser.entry_path(&entry);
        let name = entry.name.as_str();

        match entry.kind {
            EntryKind::Dir => {
                self.coordinator
                    .on_selection_changed(path, name, &mut self.details);
            }
            EntryKind::File => {
                self.coordinator.invalidate();
                self.details.text = report::file_text(name, &path);
                self.details.status = format!("Selected file: {name}");
            }
            EntryKind::Unknown => {
                self.coordinator.invalidate();
                self.details.text = report::unknown_text(name);
                self.details.status = format!("Selected: {name} (Unknown/Inaccessible)");
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.coordinator.invalidate();
        self.details.clear();
    }

    /// Double-click: enter a folder. Files and unknown entries are ignored.
    pub fn activate_entry(&mut self, index: usize) {
        let Some(entry) = self.browser.entries().get(index) else {
            return;
        };
        if entry.is_dir() {
            let path = self.browser.entry_path(entry);
            self.navigate_to(&path);
        }
    }

    // ── Navigation ─────────────────────────────────────

    /// Navigate to the path typed into the path bar.
    pub fn navigate_to_input(&mut self) {
        let target = PathBuf::from(self.path_input.trim());
        self.navigate_to(&target);
    }

    pub fn navigate_to(&mut self, path: &Path) {
        let outcome = self.browser.navigate_to(path);
        self.after_navigation(outcome.map(|()| true));
    }

    pub fn go_back(&mut self) {
        let outcome = self.browser.go_back();
        self.after_navigation(outcome);
    }

    pub fn go_forward(&mut self) {
        let outcome = self.browser.go_forward();
        self.after_navigation(outcome);
    }

    pub fn go_up(&mut self) {
        let outcome = self.browser.go_up();
        self.after_navigation(outcome.map(|()| true));
    }

    pub fn refresh(&mut self) {
        let outcome = self.browser.refresh();
        self.after_navigation(outcome.map(|()| true));
    }

    /// `moved` is false when back/forward had nowhere to go.
    fn after_navigation(&mut self, outcome: Result<bool, NavigationError>) {
        self.path_input = self.browser.current_path().display().to_string();
        match outcome {
            Ok(false) => {}
            Ok(true) => {
                self.selected = None;
                self.coordinator.invalidate();
                self.details.clear();
                self.details.status = STATUS_READY.to_string();
            }
            Err(NavigationError::NoParent { .. }) => {}
            Err(err) => {
                tracing::warn!("Navigation failed: {err}");
                self.details.status = format!("Error: {err}");
                self.error_popup = Some(err.to_string());
            }
        }
    }

    // ── Scans ──────────────────────────────────────────

    /// Drain finished scans. Returns `true` if the details pane changed.
    pub fn process_scan_results(&mut self) -> bool {
        self.coordinator.poll(&mut self.details)
    }

    /// Whether any scan, current or stale, has yet to report back.
    pub fn needs_polling(&self) -> bool {
        self.coordinator.needs_polling()
    }

    pub fn is_scanning(&self) -> bool {
        self.coordinator.phase() == ScanPhase::Scanning
    }

    pub fn poll_interval(&self) -> Duration {
        self.config.poll_interval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorerlite_core::scanner::{Generation, ScanOutcome, ScanSummary};

    fn request(label: &str) -> ScanRequest {
        ScanRequest {
            path: PathBuf::from("/tmp").join(label),
            label: label.to_string(),
            generation: Generation(1),
        }
    }

    #[test]
    fn details_view_starts_ready_and_blank() {
        let view = DetailsView::new(10);
        assert_eq!(view.status, STATUS_READY);
        assert!(view.text.is_empty());
    }

    #[test]
    fn details_view_renders_scanning_then_result() {
        let mut view = DetailsView::new(10);
        view.show_scanning(&request("docs"));
        assert!(view.text.ends_with("Please wait."));

        view.show_result(&ScanResult {
            generation: Generation(1),
            label: "docs".into(),
            path: "/tmp/docs".into(),
            outcome: ScanOutcome::Success(ScanSummary::default()),
            duration: Duration::ZERO,
        });
        assert!(view.text.contains("Total Files: 0"), "{}", view.text);

        view.set_status("Scan complete for docs");
        assert_eq!(view.status, "Scan complete for docs");
    }
}
