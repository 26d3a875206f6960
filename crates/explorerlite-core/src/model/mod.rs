/// Data model shared by the lister, the scanner, and the frontends.
pub mod entry;
pub mod histogram;
pub mod size;

pub use entry::{EntryKind, ListedEntry};
pub use histogram::{normalize_extension, ExtensionHistogram, NO_EXTENSION};
