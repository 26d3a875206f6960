/// End-to-end scanner tests.
///
/// These run real worker threads against real temporary directory trees and
/// receive results through the coordinator's channel, exactly as the GUI does.
use explorerlite_core::model::NO_EXTENSION;
use explorerlite_core::scanner::{
    result_channel, start_scan, DisplaySink, Generation, ScanCoordinator, ScanOutcome, ScanPhase,
    ScanRequest, ScanResult, ScanSummary, WalkOptions,
};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_bytes(path: &Path, n: usize) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![0u8; n]).unwrap();
}

/// ```text
/// root/
///   a.txt   (100 bytes)
///   b.TXT   (50 bytes)
///   c       (10 bytes)
///   sub/
///     d.txt (5 bytes)
/// ```
fn build_example_tree(root: &Path) {
    write_bytes(&root.join("a.txt"), 100);
    write_bytes(&root.join("b.TXT"), 50);
    write_bytes(&root.join("c"), 10);
    fs::create_dir(root.join("sub")).unwrap();
    write_bytes(&root.join("sub").join("d.txt"), 5);
}

/// Run one scan to completion on a worker thread and return its result.
fn scan_once(path: &Path, generation: u64) -> ScanResult {
    let (tx, rx) = result_channel();
    start_scan(
        ScanRequest {
            path: path.to_path_buf(),
            label: "root".into(),
            generation: Generation(generation),
        },
        WalkOptions::default(),
        tx,
    );
    rx.recv_timeout(Duration::from_secs(30))
        .expect("scan did not deliver a result within 30 seconds")
}

fn expect_success(result: &ScanResult) -> &ScanSummary {
    match &result.outcome {
        ScanOutcome::Success(summary) => summary,
        ScanOutcome::Failure { error_description } => {
            panic!("expected success, got failure: {error_description}")
        }
    }
}

#[derive(Default)]
struct RecordingSink {
    shown: Vec<ScanResult>,
    scanning: usize,
}

impl DisplaySink for RecordingSink {
    fn show_scanning(&mut self, _request: &ScanRequest) {
        self.scanning += 1;
    }
    fn show_result(&mut self, result: &ScanResult) {
        self.shown.push(result.clone());
    }
    fn set_status(&mut self, _text: &str) {}
}

/// Poll on a short interval until nothing is outstanding.
fn pump_until_idle(coord: &mut ScanCoordinator, sink: &mut RecordingSink) {
    let deadline = Instant::now() + Duration::from_secs(30);
    while coord.needs_polling() {
        assert!(
            Instant::now() < deadline,
            "scans did not finish within 30 seconds"
        );
        coord.poll(sink);
        std::thread::sleep(Duration::from_millis(10));
    }
}

// ── Engine ───────────────────────────────────────────────────────────────────

#[test]
fn example_tree_matches_expected_summary() {
    let tmp = TempDir::new().unwrap();
    build_example_tree(tmp.path());

    let result = scan_once(tmp.path(), 1);
    assert_eq!(result.generation, Generation(1));
    assert_eq!(result.label, "root");

    let summary = expect_success(&result);
    assert_eq!(summary.total_bytes, 165);
    assert_eq!(summary.file_count, 4);
    assert_eq!(summary.folder_count, 1);
    assert_eq!(summary.extensions.get(".txt"), 3);
    assert_eq!(summary.extensions.get(NO_EXTENSION), 1);
    assert_eq!(summary.extensions.len(), 2);
    assert_eq!(summary.skipped_entries, 0);
}

#[test]
fn scanning_twice_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    build_example_tree(tmp.path());
    fs::create_dir_all(tmp.path().join("x/y/z")).unwrap();
    write_bytes(&tmp.path().join("x/y/z/img.PNG"), 64);

    let first = scan_once(tmp.path(), 1);
    let second = scan_once(tmp.path(), 2);
    assert_eq!(first.outcome, second.outcome);
}

#[test]
fn folder_count_sums_subdirectories_at_every_level() {
    let tmp = TempDir::new().unwrap();
    // root: 3 direct, alpha: 2, alpha/one: 1 → 6
    for dir in ["alpha/one/deep", "alpha/two", "beta", "gamma"] {
        fs::create_dir_all(tmp.path().join(dir)).unwrap();
    }
    let summary_result = scan_once(tmp.path(), 1);
    let summary = expect_success(&summary_result);
    assert_eq!(summary.folder_count, 6);
    assert_eq!(summary.file_count, 0);
    assert!(summary.extensions.is_empty());
}

#[cfg(unix)]
#[test]
fn symlinked_files_are_counted_but_not_sized() {
    let tmp = TempDir::new().unwrap();
    write_bytes(&tmp.path().join("real.bin"), 1_000);
    std::os::unix::fs::symlink(tmp.path().join("real.bin"), tmp.path().join("link.bin")).unwrap();
    std::os::unix::fs::symlink(tmp.path().join("missing"), tmp.path().join("dangling.lnk"))
        .unwrap();

    let result = scan_once(tmp.path(), 1);
    let summary = expect_success(&result);
    assert_eq!(summary.file_count, 3);
    assert_eq!(summary.total_bytes, 1_000);
    assert_eq!(summary.extensions.get(".bin"), 2);
    assert_eq!(summary.extensions.get(".lnk"), 1);
}

/// A locked subdirectory must not turn the scan into a failure.
#[cfg(unix)]
#[test]
fn unreadable_subdirectory_still_succeeds() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    write_bytes(&tmp.path().join("open.txt"), 10);
    let locked = tmp.path().join("locked");
    fs::create_dir(&locked).unwrap();
    write_bytes(&locked.join("secret.txt"), 20);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let result = scan_once(tmp.path(), 1);

    // Restore so TempDir can clean up.
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let summary = expect_success(&result);
    assert_eq!(summary.folder_count, 1, "the locked folder itself is counted");
    // Privileged runs can still read the locked folder; either way the
    // readable part is covered.
    assert!(summary.file_count >= 1);
    assert!(summary.total_bytes >= 10);
}

#[test]
fn vanished_root_is_a_failure_result() {
    let tmp = TempDir::new().unwrap();
    let result = scan_once(&tmp.path().join("not-there"), 7);
    assert_eq!(result.generation, Generation(7));
    match result.outcome {
        ScanOutcome::Failure { error_description } => {
            assert!(error_description.contains("not-there"), "{error_description}");
        }
        ScanOutcome::Success(_) => panic!("missing root must fail"),
    }
}

/// Overlapping scans with default options must each report the full tree.
#[test]
fn concurrent_default_scans_agree() {
    let tmp = TempDir::new().unwrap();
    for i in 0..60 {
        for j in 0..10 {
            let dir = tmp.path().join(format!("d{i:02}")).join(format!("e{j:02}"));
            fs::create_dir_all(&dir).unwrap();
            write_bytes(&dir.join("f.txt"), 3);
        }
    }

    let (tx, rx) = result_channel();
    for generation in 0..12 {
        start_scan(
            ScanRequest {
                path: tmp.path().to_path_buf(),
                label: "tree".into(),
                generation: Generation(generation),
            },
            WalkOptions::default(),
            tx.clone(),
        );
    }

    let results: Vec<ScanResult> = (0..12)
        .map(|_| rx.recv_timeout(Duration::from_secs(60)).unwrap())
        .collect();
    for result in &results {
        let summary = expect_success(result);
        assert_eq!(summary.file_count, 600, "scan {}", result.generation);
        assert_eq!(summary.folder_count, 660, "scan {}", result.generation);
        assert_eq!(summary.total_bytes, 1_800);
        assert_eq!(summary.skipped_entries, 0);
    }
    assert!(results.windows(2).all(|w| w[0].outcome == w[1].outcome));
}

// ── Coordinator ──────────────────────────────────────────────────────────────

#[test]
fn coordinator_renders_only_the_latest_selection() {
    let big = TempDir::new().unwrap();
    for i in 0..20 {
        let dir = big.path().join(format!("d{i:02}"));
        fs::create_dir(&dir).unwrap();
        for j in 0..20 {
            write_bytes(&dir.join(format!("f{j:02}.dat")), 16);
        }
    }
    let small = TempDir::new().unwrap();
    build_example_tree(small.path());

    let mut coord = ScanCoordinator::new(WalkOptions::default());
    let mut sink = RecordingSink::default();

    let _stale = coord.on_selection_changed(big.path().to_path_buf(), "big", &mut sink);
    let current = coord.on_selection_changed(small.path().to_path_buf(), "small", &mut sink);
    assert_eq!(sink.scanning, 2);

    pump_until_idle(&mut coord, &mut sink);

    assert_eq!(sink.shown.len(), 1, "exactly one result is shown");
    assert_eq!(sink.shown[0].generation, current);
    assert_eq!(sink.shown[0].label, "small");
    assert_eq!(expect_success(&sink.shown[0]).total_bytes, 165);
    assert_eq!(coord.phase(), ScanPhase::Rendered);
    assert_eq!(coord.discarded_count(), 1);
}

#[test]
fn coordinator_shows_failure_for_missing_folder() {
    let tmp = TempDir::new().unwrap();
    let mut coord = ScanCoordinator::new(WalkOptions { threads: 1 });
    let mut sink = RecordingSink::default();

    coord.on_selection_changed(tmp.path().join("ghost"), "ghost", &mut sink);
    pump_until_idle(&mut coord, &mut sink);

    assert_eq!(coord.phase(), ScanPhase::Errored);
    assert_eq!(sink.shown.len(), 1);
    assert!(!sink.shown[0].is_success());
}

#[test]
fn polling_stops_once_everything_is_delivered() {
    let tmp = TempDir::new().unwrap();
    let mut coord = ScanCoordinator::new(WalkOptions::default());
    let mut sink = RecordingSink::default();
    assert!(!coord.needs_polling(), "nothing launched yet");

    for _ in 0..5 {
        coord.on_selection_changed(tmp.path().to_path_buf(), "tmp", &mut sink);
    }
    assert_eq!(coord.outstanding(), 5);
    pump_until_idle(&mut coord, &mut sink);

    assert_eq!(coord.outstanding(), 0);
    assert_eq!(sink.shown.len(), 1);
    assert_eq!(coord.discarded_count(), 4);
}
