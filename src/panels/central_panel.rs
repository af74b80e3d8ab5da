use egui::{pos2, Color32, Rect, Sense};

use crate::DoodleApp;
use crate::panels::result_panel;
use crate::texture::color_image_from_raster;

/// Vertical space kept free under the canvas for the status line and result.
const RESULT_AREA_HEIGHT: f32 = 300.0;

pub fn central_panel(app: &mut DoodleApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_size();
        let container = egui::vec2(available.x, (available.y - RESULT_AREA_HEIGHT).max(0.0));
        app.canvas.fit_to(container);

        let raster_size = egui::vec2(app.canvas.width() as f32, app.canvas.height() as f32);
        let (rect, _response) = ui.allocate_exact_size(raster_size, Sense::drag());
        app.input.set_canvas_rect(rect, raster_size);

        // Handle input
        let canvas = &mut app.canvas;
        for event in app.input.process_input(ctx) {
            app.state.with_drawing(|drawing| canvas.handle_input(&event, drawing));
        }

        // Render the canvas
        let version = app.canvas.version();
        let raster = app.canvas.raster();
        match app
            .canvas_texture
            .get_or_update(ctx, version, || color_image_from_raster(raster))
        {
            Ok(texture_id) => {
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                ui.painter().image(texture_id, rect, uv, Color32::WHITE);
            }
            Err(e) => log::trace!("Canvas not drawn: {}", e),
        }

        ui.add_space(8.0);
        result_panel(app, ui);
    });
}
