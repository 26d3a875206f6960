/// Bottom status bar -- current activity and listing statistics.
use crate::state::AppState;
use explorerlite_core::model::size::format_count;
use egui::Ui;

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    let color_weak = ui.visuals().weak_text_color();
    let color_normal = ui.visuals().text_color();

    ui.horizontal(|ui| {
        if state.is_scanning() {
            ui.spinner();
        }
        ui.label(
            egui::RichText::new(truncate_middle(&state.details.status, 90))
                .size(12.0)
                .color(color_normal),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let count = state.browser.entries().len() as u64;
            let noun = if count == 1 { "item" } else { "items" };
            ui.label(
                egui::RichText::new(format!("{} {noun}", format_count(count)))
                    .size(12.0)
                    .color(color_weak),
            );
        });
    });
}

/// Shorten `text` to at most `max_chars` characters by replacing the middle
/// with "...".
pub fn truncate_middle(text: &str, max_chars: usize) -> String {
    let len = text.chars().count();
    if len <= max_chars || max_chars < 5 {
        return text.to_string();
    }
    let keep = max_chars - 3;
    let head = keep.div_ceil(2);
    let tail = keep / 2;
    let start: String = text.chars().take(head).collect();
    let end: String = text.chars().skip(len - tail).collect();
    format!("{start}...{end}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_middle("Ready", 90), "Ready");
    }

    #[test]
    fn long_text_keeps_both_ends() {
        let out = truncate_middle("Scanning folder: abcdefghijklmnopqrstuvwxyz...", 20);
        assert_eq!(out.chars().count(), 20);
        assert!(out.starts_with("Scanning"));
        assert!(out.ends_with("xyz..."));
        assert!(out.contains("..."));
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundaries() {
        let out = truncate_middle(&"é".repeat(50), 11);
        assert_eq!(out, format!("{}...{}", "é".repeat(4), "é".repeat(4)));
    }
}
