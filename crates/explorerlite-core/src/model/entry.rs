/// A single row of a one-level directory listing.
use compact_str::CompactString;
use std::time::SystemTime;

/// What a listed entry turned out to be.
///
/// `Unknown` is used when the per-entry stat failed (permission denied,
/// broken link). Such entries stay in the listing so the user can see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Dir,
    File,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// File or directory name only (NOT the full path).
    pub name: CompactString,

    pub kind: EntryKind,

    /// Logical size in bytes. Always `None` for directories and unknown entries.
    pub size: Option<u64>,

    /// Last-modified timestamp when the stat succeeded.
    pub modified: Option<SystemTime>,
}

impl ListedEntry {
    pub fn new_dir(name: impl Into<CompactString>, modified: Option<SystemTime>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Dir,
            size: None,
            modified,
        }
    }

    pub fn new_file(
        name: impl Into<CompactString>,
        size: u64,
        modified: Option<SystemTime>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            size: Some(size),
            modified,
        }
    }

    pub fn new_unknown(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Unknown,
            size: None,
            modified: None,
        }
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Label for the "Type" column.
    pub fn type_label(&self) -> String {
        match self.kind {
            EntryKind::Dir => "Folder".to_string(),
            EntryKind::Unknown => "Unknown".to_string(),
            EntryKind::File => file_type_label(&self.name),
        }
    }
}

/// Upper-cased extension with its dot (`".TXT"`), or `"File"` when the name
/// has none. Agrees with [`normalize_extension`] on what the extension is, so
/// `file.` is labelled `"."`.
///
/// [`normalize_extension`]: crate::model::normalize_extension
pub fn file_type_label(name: &str) -> String {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    let rest = &name[stem_start..];
    match rest.rfind('.') {
        Some(dot) => rest[dot..].to_uppercase(),
        None => "File".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_labels() {
        assert_eq!(ListedEntry::new_dir("src", None).type_label(), "Folder");
        assert_eq!(ListedEntry::new_unknown("x").type_label(), "Unknown");
        assert_eq!(ListedEntry::new_file("a.txt", 1, None).type_label(), ".TXT");
        assert_eq!(ListedEntry::new_file("README", 1, None).type_label(), "File");
        assert_eq!(ListedEntry::new_file(".bashrc", 1, None).type_label(), "File");
        assert_eq!(ListedEntry::new_file("file.", 1, None).type_label(), ".");
    }

    #[test]
    fn type_label_matches_histogram_key() {
        use crate::model::{normalize_extension, NO_EXTENSION};
        for name in ["a.txt", "B.TAR.GZ", "file.", "notes..", ".bashrc", "README", ".x.md"] {
            let key = normalize_extension(name);
            let expected = if key == NO_EXTENSION {
                "File".to_string()
            } else {
                key.to_uppercase().to_string()
            };
            assert_eq!(file_type_label(name), expected, "{name}");
        }
    }

    #[test]
    fn directories_carry_no_size() {
        let dir = ListedEntry::new_dir("d", None);
        assert!(dir.is_dir());
        assert_eq!(dir.size, None);
    }
}
