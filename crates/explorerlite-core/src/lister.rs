/// Single-level directory listing for the visible list pane.
///
/// Synchronous: one `read_dir` plus one stat per entry. Recursive
/// totals come from the background scanner, never from here.
use crate::error::AccessError;
use crate::model::{EntryKind, ListedEntry};
use compact_str::CompactString;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use tracing::debug;

/// List `path`, directories first, then case-insensitive name order.
///
/// Entries whose stat fails are kept as [`EntryKind::Unknown`] and sort with
/// the directories. Links are followed for the per-entry stat, so a link to
/// a directory lists as a directory.
pub fn list_dir(path: &Path) -> Result<Vec<ListedEntry>, AccessError> {
    let reader = fs::read_dir(path).map_err(|e| AccessError::new(path, e))?;

    let mut entries = Vec::new();
    for dir_entry in reader {
        // An entry that cannot even be read has no name to show.
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(err) => {
                debug!("Skipping unreadable entry in {}: {err}", path.display());
                continue;
            }
        };
        let name = CompactString::new(dir_entry.file_name().to_string_lossy());

        let entry = match fs::metadata(dir_entry.path()) {
            Ok(meta) if meta.is_dir() => ListedEntry::new_dir(name, meta.modified().ok()),
            Ok(meta) => ListedEntry::new_file(name, meta.len(), meta.modified().ok()),
            Err(err) => {
                debug!("Stat failed for {}: {err}", dir_entry.path().display());
                ListedEntry::new_unknown(name)
            }
        };
        entries.push(entry);
    }

    sort_entries(&mut entries);
    Ok(entries)
}

/// Folders (and unknown entries) before files, then by lower-cased name.
pub fn sort_entries(entries: &mut [ListedEntry]) {
    entries.sort_by(compare_entries);
}

fn compare_entries(a: &ListedEntry, b: &ListedEntry) -> Ordering {
    let a_file = a.kind == EntryKind::File;
    let b_file = b.kind == EntryKind::File;
    a_file
        .cmp(&b_file)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn touch(path: &Path, n: usize) {
        let mut f = fs::File::create(path).unwrap();
        f.write_all(&vec![b'x'; n]).unwrap();
    }

    #[test]
    fn folders_first_then_case_insensitive_names() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("b.txt"), 3);
        touch(&tmp.path().join("A.txt"), 1);
        fs::create_dir(tmp.path().join("zeta")).unwrap();
        fs::create_dir(tmp.path().join("Alpha")).unwrap();

        let entries = list_dir(tmp.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "zeta", "A.txt", "b.txt"]);

        assert_eq!(entries[0].kind, EntryKind::Dir);
        assert_eq!(entries[0].size, None);
        assert_eq!(entries[3].size, Some(3));
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(list_dir(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_access_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let err = list_dir(&missing).unwrap_err();
        assert_eq!(err.path, missing);
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn broken_link_lists_as_unknown() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("file.bin"), 1);
        std::os::unix::fs::symlink(tmp.path().join("missing"), tmp.path().join("dangling"))
            .unwrap();

        let entries = list_dir(tmp.path()).unwrap();
        assert_eq!(entries.len(), 2);
        // Unknown sorts with the directories, ahead of files.
        assert_eq!(entries[0].name, "dangling");
        assert_eq!(entries[0].kind, EntryKind::Unknown);
        assert_eq!(entries[0].size, None);
        assert_eq!(entries[1].kind, EntryKind::File);
    }

    #[test]
    fn sort_is_stable_for_same_name_different_case() {
        let mut entries = vec![
            ListedEntry::new_file("readme", 1, None),
            ListedEntry::new_file("README", 1, None),
        ];
        sort_entries(&mut entries);
        assert_eq!(entries[0].name, "README");
    }
}
