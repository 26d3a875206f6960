/// ExplorerLite Core -- listing, navigation, and background folder scans.
///
/// This crate contains all business logic with zero UI dependencies.
/// The GUI crate drives it; tests drive it directly.
///
/// # Modules
///
/// - [`model`] -- Listed entries, the extension histogram, size formatting.
/// - [`lister`] -- Synchronous single-level directory listing.
/// - [`navigation`] -- Back/forward history and the browsing session.
/// - [`scanner`] -- Background recursive scans and the coordinator that
///   discards superseded results.
/// - [`report`] -- Text bodies for the details pane.
/// - [`config`] -- JSON configuration.
/// - [`error`] -- Error types.
pub mod config;
pub mod error;
pub mod lister;
pub mod model;
pub mod navigation;
pub mod report;
pub mod scanner;
