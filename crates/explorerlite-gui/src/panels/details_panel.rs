/// Details panel -- shows the text body for the selected entry.
use crate::state::AppState;
use egui::Ui;

/// Draw the details panel.
pub fn details_panel(ui: &mut Ui, state: &AppState) {
    let color_muted = ui.visuals().weak_text_color();

    ui.label(egui::RichText::new("Details").size(14.0).strong());
    ui.separator();

    if state.details.text.is_empty() {
        ui.label(egui::RichText::new("Select an item to see its details.").color(color_muted));
        return;
    }

    if let Some(entry) = state.selected_entry() {
        if ui.button("📋 Copy Path").clicked() {
            let path = state.browser.entry_path(entry);
            ui.ctx().copy_text(path.display().to_string());
        }
        ui.add_space(4.0);
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.label(egui::RichText::new(&state.details.text).monospace());
        });
}
