/// Content panels: the directory listing and the details pane.

pub mod details_panel;
pub mod listing_panel;
