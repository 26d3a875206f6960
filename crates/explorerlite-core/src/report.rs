/// Plain-text bodies for the details pane.
///
/// Kept here rather than in the GUI so the exact layout is testable without
/// a window.
use crate::model::entry::file_type_label;
use crate::model::size::format_size;
use crate::scanner::{ScanOutcome, ScanRequest, ScanResult};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::Path;
use std::time::SystemTime;

/// Default number of extension rows listed under "Document Types".
pub const DEFAULT_TOP_EXTENSIONS: usize = 10;

/// Provisional body while a folder scan runs.
pub fn scanning_text(request: &ScanRequest) -> String {
    format!(
        "Name: {}\nType: Folder\n\nScanning contents recursively...\nPlease wait.",
        request.label
    )
}

/// Body for a finished folder scan.
pub fn result_text(result: &ScanResult, top_k: usize) -> String {
    let mut out = format!("Name: {}\nType: Folder\n\n", result.label);
    match &result.outcome {
        ScanOutcome::Failure { error_description } => {
            let _ = write!(out, "Error scanning contents:\n{error_description}");
        }
        ScanOutcome::Success(summary) => {
            let _ = writeln!(
                out,
                "Total Size (Contents): {}",
                format_size(summary.total_bytes)
            );
            let _ = writeln!(out, "Total Files: {}", summary.file_count);
            let _ = writeln!(out, "Total Subfolders: {}", summary.folder_count);
            out.push('\n');

            if summary.extensions.is_empty() {
                out.push_str("No files found in contents.\n");
            } else {
                out.push_str("Document Types (by count):\n");
                for (ext, count) in summary.extensions.top(top_k) {
                    let _ = writeln!(out, "  {ext}: {count}");
                }
                let hidden = summary.extensions.len().saturating_sub(top_k);
                if hidden > 0 {
                    let _ = writeln!(out, "  ...and {hidden} more types.");
                }
            }

            if summary.skipped_entries > 0 {
                let _ = writeln!(
                    out,
                    "\n{} entries could not be read and were skipped.",
                    summary.skipped_entries
                );
            }
        }
    }
    out
}

/// Body for a selected regular file; stats `path` on the spot.
pub fn file_text(name: &str, path: &Path) -> String {
    match std::fs::metadata(path) {
        Ok(meta) => {
            let size = meta.len();
            let mut out = format!(
                "Name: {name}\nType: {}\nSize: {} ({size} bytes)",
                file_type_label(name),
                format_size(size)
            );
            if let Ok(modified) = meta.modified() {
                let _ = write!(out, "\nModified: {}", format_modified(modified));
            }
            out
        }
        Err(err) => format!("Name: {name}\nError: Could not access file properties.\n{err}"),
    }
}

/// Body for an entry whose type could not be determined.
pub fn unknown_text(name: &str) -> String {
    format!("Name: {name}\nType: Unknown or Inaccessible")
}

/// Local-time `YYYY-MM-DD HH:MM`.
pub fn format_modified(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
