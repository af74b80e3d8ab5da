use egui::{Button, Color32, Sense, Slider, Stroke};

use crate::DoodleApp;
use crate::style::{CharacterStyle, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE, PALETTE};

const SWATCH_SIZE: f32 = 24.0;
const SELECTED_OUTLINE: Color32 = Color32::from_rgb(0x63, 0x66, 0xF1);

pub fn controls_panel(app: &mut DoodleApp, ctx: &egui::Context) {
    egui::SidePanel::left("controls_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            let snapshot = app.state.snapshot();
            let drawing = *snapshot.drawing();
            let generation = snapshot.generation();

            ui.heading("Doodle to Character");
            ui.separator();

            ui.label("Brush Color:");
            ui.horizontal_wrapped(|ui| {
                for color in PALETTE {
                    if color_swatch(ui, color, drawing.current_color == color).clicked() {
                        log::debug!("Brush color selected: {:?}", color);
                        app.state.set_brush_color(color);
                    }
                }
            });
            ui.add_space(8.0);

            ui.label("Character Style:");
            let selected_style = snapshot.selected_style();
            egui::ComboBox::from_id_salt("style_selector")
                .selected_text(selected_style.label())
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for style in CharacterStyle::ALL {
                        if ui.selectable_label(style == selected_style, style.label()).clicked() {
                            log::info!("Style selected from UI: {}", style);
                            app.state.set_selected_style(style);
                        }
                    }
                });
            ui.add_space(8.0);

            ui.label("Brush Size:");
            let mut brush_size = drawing.current_brush_size;
            if ui
                .add(Slider::new(&mut brush_size, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).suffix("px"))
                .changed()
            {
                app.state.set_brush_size(brush_size);
            }
            ui.separator();

            let generate_label = if generation.is_generating {
                "Generating..."
            } else {
                "Generate Character"
            };
            let full_width = egui::vec2(ui.available_width(), 28.0);
            if ui
                .add_enabled(!generation.is_generating, Button::new(generate_label).min_size(full_width))
                .clicked()
            {
                app.generate_character();
            }

            if ui.add(Button::new("Clear Doodle").min_size(full_width)).clicked() {
                app.clear_canvas();
            }

            let has_image = generation.generated_image.is_some();
            if ui
                .add_enabled(has_image, Button::new("Download Character").min_size(full_width))
                .clicked()
            {
                app.download_character();
            }
        });
}

fn color_swatch(ui: &mut egui::Ui, color: Color32, selected: bool) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE), Sense::click());

    if ui.is_rect_visible(rect) {
        ui.painter().rect_filled(rect, 4.0, color);

        // Draw border when selected
        let outline = if selected {
            Stroke::new(2.0, SELECTED_OUTLINE)
        } else if response.hovered() {
            Stroke::new(1.0, Color32::from_gray(160))
        } else {
            Stroke::new(1.0, Color32::from_gray(60))
        };
        ui.painter().rect_stroke(rect, 4.0, outline);
    }

    response
}
