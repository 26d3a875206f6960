/// Extension histogram -- file counts grouped by normalised extension.
///
/// Keys are lower-cased and keep their leading dot (`".txt"`). Files with no
/// extension are grouped under [`NO_EXTENSION`].
use compact_str::CompactString;
use std::collections::HashMap;

/// Key used for files whose name carries no extension.
pub const NO_EXTENSION: &str = ".no_ext";

/// Normalise a file name to its histogram key.
///
/// Leading dots belong to the stem, so `.bashrc` has no extension while
/// `archive.tar.gz` maps to `".gz"`. A trailing dot yields `"."`.
pub fn normalize_extension(file_name: &str) -> CompactString {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    let rest = &file_name[stem_start..];
    match rest.rfind('.') {
        Some(dot) => CompactString::from(rest[dot..].to_lowercase()),
        None => CompactString::new(NO_EXTENSION),
    }
}

/// Count of files per normalised extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionHistogram {
    counts: HashMap<CompactString, u64>,
}

impl ExtensionHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file by name.
    pub fn record(&mut self, file_name: &str) {
        self.increment(normalize_extension(file_name));
    }

    /// Increment an already-normalised key.
    pub fn increment(&mut self, key: CompactString) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Count for a normalised key (`".txt"`, [`NO_EXTENSION`]).
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct extensions.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// The `k` most common extensions, count descending, ties broken by
    /// extension ascending. Deterministic for equal histograms.
    pub fn top(&self, k: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(ext, &count)| (ext.as_str(), count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(k);
        entries
    }
}
