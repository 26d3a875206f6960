/// Recursive subtree walk that produces a [`ScanSummary`].
///
/// Uses `jwalk` with `follow_links(false)`. Per-entry failures are counted in
/// `skipped_entries` and never abort the walk; only a root that cannot be
/// read at all turns into a [`ScanError`].
use crate::error::ScanError;
use crate::model::ExtensionHistogram;
use crate::scanner::ScanSummary;
use jwalk::Parallelism;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Walker tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Directory-reader threads per scan. `0` means one per CPU. Every scan
    /// gets its own pool, so overlapping scans never starve each other.
    pub threads: usize,
}

impl WalkOptions {
    fn parallelism(&self) -> Parallelism {
        match self.threads {
            0 => Parallelism::RayonNewPool(num_cpus::get()),
            1 => Parallelism::Serial,
            n => Parallelism::RayonNewPool(n),
        }
    }
}

/// One walker item, reduced to what the tally needs.
#[derive(Debug)]
enum WalkEvent {
    Folder,
    /// A regular file and its size, if it could be read.
    File { name: String, size: io::Result<u64> },
    /// A symbolic link that does not resolve to a directory. Never sized.
    Link { name: String },
    /// An unreadable entry or subdirectory.
    Skipped,
    /// The root itself could not be read, or the walker refused to start.
    RootFailed(io::Error),
}

/// Walk the tree under `root` and aggregate its statistics.
///
/// Counting rules:
/// - every directory below the root adds one to `folder_count`;
/// - every other entry adds one to `file_count` and one to its extension
///   bucket;
/// - only regular files add to `total_bytes`: symbolic links are never
///   sized, so a link cannot inflate the total or loop;
/// - a link whose target is a directory counts as a folder and is not
///   followed.
pub fn scan_tree(root: &Path, options: &WalkOptions) -> Result<ScanSummary, ScanError> {
    let walk_root = resolve_root(root)?;

    let walker = jwalk::WalkDir::new(&walk_root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(false)
        .parallelism(options.parallelism());

    let events = walker
        .into_iter()
        .filter_map(|item| classify(item, &walk_root));

    tally(events).map_err(|source| ScanError::RootUnavailable {
        path: root.to_path_buf(),
        source,
    })
}

fn classify(
    item: Result<jwalk::DirEntry<((), ())>, jwalk::Error>,
    walk_root: &Path,
) -> Option<WalkEvent> {
    let entry = match item {
        Ok(e) => e,
        // jwalk reports every failed directory read at depth 0, so the path
        // is what tells the root apart from a subdirectory.
        Err(err) if err.is_busy() || err.path() == Some(walk_root) => {
            return Some(WalkEvent::RootFailed(io::Error::from(err)));
        }
        Err(err) => {
            debug!("Skipping during scan of {}: {err}", walk_root.display());
            return Some(WalkEvent::Skipped);
        }
    };

    if entry.depth() == 0 {
        return None;
    }

    let file_type = entry.file_type();
    if file_type.is_dir() {
        return Some(WalkEvent::Folder);
    }

    let path = entry.path();
    let name = entry.file_name().to_string_lossy().into_owned();
    if file_type.is_symlink() {
        if fs::metadata(&path).is_ok_and(|m| m.is_dir()) {
            return Some(WalkEvent::Folder);
        }
        return Some(WalkEvent::Link { name });
    }

    let size = fs::symlink_metadata(&path).map(|meta| meta.len());
    if let Err(err) = &size {
        debug!("Size unavailable for {}: {err}", path.display());
    }
    Some(WalkEvent::File { name, size })
}

/// Fold walker events into a summary. A root failure aborts with its error.
fn tally(events: impl IntoIterator<Item = WalkEvent>) -> Result<ScanSummary, io::Error> {
    let mut summary = ScanSummary::default();
    let mut histogram = ExtensionHistogram::new();

    for event in events {
        match event {
            WalkEvent::Folder => summary.folder_count += 1,
            WalkEvent::File { name, size } => {
                summary.file_count += 1;
                histogram.record(&name);
                match size {
                    Ok(bytes) => summary.total_bytes += bytes,
                    Err(_) => summary.skipped_entries += 1,
                }
            }
            WalkEvent::Link { name } => {
                summary.file_count += 1;
                histogram.record(&name);
            }
            WalkEvent::Skipped => summary.skipped_entries += 1,
            WalkEvent::RootFailed(err) => return Err(err),
        }
    }

    summary.extensions = histogram;
    Ok(summary)
}

/// Check the root can be opened before walking, and resolve a root that is
/// itself a link so its target is what gets walked.
fn resolve_root(root: &Path) -> Result<PathBuf, ScanError> {
    let unavailable = |source| ScanError::RootUnavailable {
        path: root.to_path_buf(),
        source,
    };

    let meta = fs::metadata(root).map_err(unavailable)?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let is_link = fs::symlink_metadata(root)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    let walk_root = if is_link {
        fs::canonicalize(root).map_err(unavailable)?
    } else {
        root.to_path_buf()
    };

    // Probe once so an unreadable root is a failure rather than an empty success.
    fs::read_dir(&walk_root).map_err(unavailable)?;
    Ok(walk_root)
}
