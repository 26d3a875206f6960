/// Directory listing -- one row per entry of the current folder.
use crate::state::AppState;
use egui::Ui;
use egui_extras::{Column, TableBuilder};
use explorerlite_core::model::size::format_size_opt;
use explorerlite_core::model::EntryKind;

const ROW_HEIGHT: f32 = 22.0;

/// Draw the listing table. A click selects, a double-click on a folder
/// enters it.
pub fn listing_panel(ui: &mut Ui, state: &mut AppState) {
    if state.browser.entries().is_empty() {
        ui.add_space(8.0);
        ui.label(egui::RichText::new("(empty)").color(ui.visuals().weak_text_color()));
        return;
    }

    let mut clicked = None;
    let mut activated = None;
    let selected = state.selected;
    let entries = state.browser.entries();
    let color_weak = ui.visuals().weak_text_color();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .sense(egui::Sense::click())
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(320.0).at_least(120.0).clip(true))
        .column(Column::initial(90.0).at_least(60.0))
        .column(Column::remainder().at_least(80.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Name");
            });
            header.col(|ui| {
                ui.strong("Type");
            });
            header.col(|ui| {
                ui.strong("Size");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, entries.len(), |mut row| {
                let index = row.index();
                let entry = &entries[index];
                row.set_selected(selected == Some(index));

                row.col(|ui| {
                    let icon = match entry.kind {
                        EntryKind::Dir => "📁",
                        EntryKind::File => "📄",
                        EntryKind::Unknown => "❔",
                    };
                    ui.label(format!("{icon} {}", entry.name));
                });
                row.col(|ui| {
                    ui.label(egui::RichText::new(entry.type_label()).color(color_weak));
                });
                row.col(|ui| {
                    // Folders have no size until scanned.
                    let text = match entry.kind {
                        EntryKind::File => format_size_opt(entry.size),
                        _ => String::new(),
                    };
                    ui.label(text);
                });

                let response = row.response();
                if response.double_clicked() {
                    activated = Some(index);
                } else if response.clicked() {
                    clicked = Some(index);
                }
            });
        });

    if let Some(index) = activated {
        state.activate_entry(index);
    } else if let Some(index) = clicked {
        if state.selected != Some(index) {
            state.select_entry(index);
        }
    }
}
