/// Top navigation bar -- back/forward/up, the path bar, refresh, theme toggle.
use crate::state::AppState;
use egui::Ui;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        let nav_size = egui::vec2(32.0, 26.0);

        if ui
            .add_enabled(
                state.browser.can_go_back(),
                egui::Button::new("⬅").min_size(nav_size),
            )
            .on_hover_text("Back")
            .clicked()
        {
            state.go_back();
        }

        if ui
            .add_enabled(
                state.browser.can_go_forward(),
                egui::Button::new("➡").min_size(nav_size),
            )
            .on_hover_text("Forward")
            .clicked()
        {
            state.go_forward();
        }

        if ui
            .add_enabled(
                state.browser.can_go_up(),
                egui::Button::new("⬆").min_size(nav_size),
            )
            .on_hover_text("Up one level")
            .clicked()
        {
            state.go_up();
        }

        ui.separator();

        // Right-aligned controls are laid out first so the path bar can take
        // whatever width is left.
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }

            if ui
                .button("🔄")
                .on_hover_text("Reload this folder")
                .clicked()
            {
                state.refresh();
            }

            let go_clicked = ui.button("Go").clicked();

            let response = ui.add(
                egui::TextEdit::singleline(&mut state.path_input)
                    .desired_width(ui.available_width())
                    .hint_text("Path"),
            );
            let enter_pressed =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            if go_clicked || enter_pressed {
                state.navigate_to_input();
            }
        });
    });
}
