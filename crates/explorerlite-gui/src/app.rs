/// Main `eframe::App` implementation for ExplorerLite.
///
/// This is the top-level UI layout that composes all panels and widgets.
use crate::panels;
use crate::state::AppState;
use crate::widgets;
use explorerlite_core::config::ExplorerConfig;

/// Pre-built application state.
///
/// Construct this **before** calling `eframe::run_native` so the first
/// directory listing is ready when the window opens.
pub struct ExplorerState {
    pub(crate) inner: AppState,
}

impl ExplorerState {
    /// Open the configured start directory.
    pub fn build(config: ExplorerConfig) -> Self {
        let state = AppState::new(config);
        tracing::info!("Opened {}", state.browser.current_path().display());
        Self { inner: state }
    }
}

/// The ExplorerLite application.
pub struct ExplorerApp {
    state: AppState,
}

impl ExplorerApp {
    /// Create the application from pre-built state.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: ExplorerState) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self { state: state.inner }
    }
}

impl eframe::App for ExplorerApp {
    /// Match the GPU clear colour to the panel background so frames don't
    /// flash between themes.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        if self.state.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // ── Process background results ────────────────────────────────────
        self.state.process_scan_results();

        // Keep waking up while any scan, stale or not, is still out there.
        if self.state.needs_polling() {
            ctx.request_repaint_after(self.state.poll_interval());
        }

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(34.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── Error dialog ──────────────────────────────────────────────────
        if let Some(message) = self.state.error_popup.clone() {
            let mut open = true;
            let mut dismissed = false;
            egui::Window::new("Error")
                .open(&mut open)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            if !open || dismissed {
                self.state.error_popup = None;
            }
        }

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── Right details panel ───────────────────────────────────────────
        egui::SidePanel::right("details_panel")
            .default_width(320.0)
            .min_width(220.0)
            .max_width(600.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::details_panel::details_panel(ui, &self.state);
            });

        // ── Central panel (listing) ───────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::listing_panel::listing_panel(ui, &mut self.state);
        });
    }
}
