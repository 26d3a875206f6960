/// UI widgets for ExplorerLite.

pub mod status_bar;
pub mod toolbar;
