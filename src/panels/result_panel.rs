use egui::{Color32, RichText};

use crate::DoodleApp;
use crate::state::StatusType;
use crate::texture::decode_color_image;

/// Tallest the generated character is shown.
const MAX_RESULT_HEIGHT: f32 = 240.0;

fn status_color(status_type: StatusType) -> Color32 {
    match status_type {
        StatusType::Success => Color32::from_rgb(0x22, 0xC5, 0x5E),
        StatusType::Error => Color32::from_rgb(0xEF, 0x44, 0x44),
        StatusType::Warning | StatusType::Info => Color32::from_rgb(0xFA, 0xCC, 0x15),
    }
}

/// Status line followed by the generated character (or a placeholder).
pub fn result_panel(app: &mut DoodleApp, ui: &mut egui::Ui) {
    let generation = app.state.generation();

    ui.vertical_centered(|ui| {
        if !generation.status_message.is_empty() {
            ui.label(
                RichText::new(&generation.status_message).color(status_color(generation.status_type)),
            );
        }
    });
    ui.add_space(8.0);

    let Some(image) = generation.generated_image else {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Your generated character will appear here.").weak());
        });
        return;
    };

    if app.undisplayable_image == Some(image.id()) {
        return;
    }

    let ctx = ui.ctx().clone();
    match app
        .result_texture
        .get_or_update(&ctx, image.id() as u64, || decode_color_image(image.bytes()))
    {
        Ok(texture_id) => {
            let [width, height] = app.result_texture.size().unwrap_or([1, 1]);
            let scale = (MAX_RESULT_HEIGHT / height.max(1) as f32)
                .min(ui.available_width() / width.max(1) as f32)
                .min(1.0);
            let size = egui::vec2(width as f32 * scale, height as f32 * scale);
            ui.vertical_centered(|ui| {
                ui.add(egui::Image::new((texture_id, size)).rounding(6.0));
            });
        }
        Err(e) => {
            log::error!("Generated image could not be displayed: {}", e);
            app.undisplayable_image = Some(image.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color(StatusType::Warning), status_color(StatusType::Info));
        assert_ne!(status_color(StatusType::Success), status_color(StatusType::Error));
    }
}
