use crate::DoodleApp;

/// Centered notice that stays up until the user acknowledges it.
pub fn modal(app: &mut DoodleApp, ctx: &egui::Context) {
    let modal = app.state.modal();
    if !modal.is_open {
        return;
    }

    egui::Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.label(&modal.message);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    app.state.dismiss_modal();
                }
            });
        });
}
