//! ExplorerLite -- folder browser with background folder statistics.
//!
//! Thin binary entry point. All logic lives in the `explorerlite-core`
//! and `explorerlite-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use explorerlite_core::config::ExplorerConfig;

fn main() -> anyhow::Result<()> {
    // Config is read before logging exists, so a load failure is reported
    // once the subscriber is installed.
    let (config, config_err) = match ExplorerConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (ExplorerConfig::default(), Some(err)),
    };

    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    tracing::info!("ExplorerLite starting");
    if let Some(err) = config_err {
        tracing::warn!("{err}; using default configuration");
    }

    // Build state before the window exists so the first frame already has
    // the listing.
    let state = explorerlite_gui::ExplorerState::build(config);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("ExplorerLite")
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ExplorerLite",
        options,
        Box::new(|cc| Ok(Box::new(explorerlite_gui::ExplorerApp::with_state(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
