use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::style::{CharacterStyle, DEFAULT_BRUSH_SIZE, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE, PALETTE};

/// Brush parameters and whether a path is being drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingState {
    pub is_drawing: bool,
    pub current_color: Color32,
    pub current_brush_size: u32,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            is_drawing: false,
            current_color: PALETTE[0],
            current_brush_size: DEFAULT_BRUSH_SIZE,
        }
    }
}

impl DrawingState {
    pub fn set_color(&mut self, color: Color32) {
        self.current_color = color;
    }

    /// Brush size is clamped into the slider range.
    pub fn set_brush_size(&mut self, size: u32) {
        self.current_brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }
}

/// The part of the session that survives a restart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPreferences {
    pub brush_color: Color32,
    pub brush_size: u32,
    pub style: CharacterStyle,
}

impl Default for UiPreferences {
    fn default() -> Self {
        let drawing = DrawingState::default();
        Self {
            brush_color: drawing.current_color,
            brush_size: drawing.current_brush_size,
            style: CharacterStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brush_size_is_clamped() {
        let mut drawing = DrawingState::default();
        drawing.set_brush_size(0);
        assert_eq!(drawing.current_brush_size, 1);
        drawing.set_brush_size(80);
        assert_eq!(drawing.current_brush_size, 50);
        drawing.set_brush_size(12);
        assert_eq!(drawing.current_brush_size, 12);
    }

    #[test]
    fn test_preferences_tolerate_missing_fields() {
        let prefs: UiPreferences = serde_json::from_str(r#"{"brush_size": 9}"#).unwrap();
        assert_eq!(prefs.brush_size, 9);
        assert_eq!(prefs.style, CharacterStyle::Classic2dCartoon);
        assert_eq!(prefs.brush_color, Color32::WHITE);
    }
}
