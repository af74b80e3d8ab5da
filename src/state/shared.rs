use std::sync::Arc;

use egui::Color32;
use parking_lot::Mutex;

use super::{DrawingState, GeneratedImage, GenerationState, ModalState, Stage, StatusType, UiPreferences};
use crate::api::StatusReporter;
use crate::style::CharacterStyle;

/// Everything the UI renders from.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AppState {
    drawing: DrawingState,
    generation: GenerationState,
    modal: ModalState,
    selected_style: CharacterStyle,
}

impl AppState {
    pub fn drawing(&self) -> &DrawingState {
        &self.drawing
    }

    pub fn generation(&self) -> &GenerationState {
        &self.generation
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn selected_style(&self) -> CharacterStyle {
        self.selected_style
    }
}

/// Handle to the application state shared by the UI and the pipeline task.
///
/// All mutation goes through the setters below. Each one takes the lock for
/// the duration of the update only and asks egui for a repaint afterwards.
#[derive(Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<AppState>>,
    repaint: Option<egui::Context>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a repaint on `ctx` after every change.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn snapshot(&self) -> AppState {
        self.inner.lock().clone()
    }

    pub fn generation(&self) -> GenerationState {
        self.inner.lock().generation.clone()
    }

    pub fn modal(&self) -> ModalState {
        self.inner.lock().modal.clone()
    }

    pub fn drawing(&self) -> DrawingState {
        self.inner.lock().drawing
    }

    pub fn selected_style(&self) -> CharacterStyle {
        self.inner.lock().selected_style
    }

    pub fn generated_image(&self) -> Option<GeneratedImage> {
        self.inner.lock().generation.generated_image.clone()
    }

    pub fn is_generating(&self) -> bool {
        self.inner.lock().generation.is_generating
    }

    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let result = f(&mut *self.inner.lock());
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
        result
    }

    /// Run `f` against the drawing state, used by canvas input handling.
    pub fn with_drawing<R>(&self, f: impl FnOnce(&mut DrawingState) -> R) -> R {
        self.update(|state| f(&mut state.drawing))
    }

    pub fn set_brush_color(&self, color: Color32) {
        self.update(|state| state.drawing.set_color(color));
    }

    pub fn set_brush_size(&self, size: u32) {
        self.update(|state| state.drawing.set_brush_size(size));
    }

    pub fn set_selected_style(&self, style: CharacterStyle) {
        self.update(|state| state.selected_style = style);
    }

    pub fn preferences(&self) -> UiPreferences {
        let state = self.inner.lock();
        UiPreferences {
            brush_color: state.drawing.current_color,
            brush_size: state.drawing.current_brush_size,
            style: state.selected_style,
        }
    }

    pub fn apply_preferences(&self, preferences: UiPreferences) {
        self.update(|state| {
            state.drawing.set_color(preferences.brush_color);
            state.drawing.set_brush_size(preferences.brush_size);
            state.selected_style = preferences.style;
        });
    }

    /// Mark a generation as started. Returns false when one is already running.
    pub fn try_begin_generation(&self) -> bool {
        self.update(|state| {
            if state.generation.is_generating {
                return false;
            }
            state.generation.is_generating = true;
            true
        })
    }

    pub fn finish_generation(&self) {
        self.update(|state| {
            state.generation.is_generating = false;
            state.generation.stage = Stage::Idle;
        });
    }

    pub fn set_stage(&self, stage: Stage) {
        self.update(|state| state.generation.stage = stage);
    }

    pub fn set_status(&self, message: impl Into<String>, status_type: StatusType) {
        let message = message.into();
        self.update(|state| {
            state.generation.status_message = message;
            state.generation.status_type = status_type;
        });
    }

    pub fn clear_status(&self) {
        self.update(|state| state.generation.status_message.clear());
    }

    pub fn set_generated_image(&self, image: GeneratedImage) {
        self.update(|state| state.generation.generated_image = Some(image));
    }

    /// Drop the last result and its status text, as the Clear action does.
    pub fn clear_result(&self) {
        self.update(|state| {
            state.generation.generated_image = None;
            state.generation.status_message.clear();
        });
    }

    pub fn open_modal(&self, message: impl Into<String>) {
        let message = message.into();
        self.update(|state| {
            state.modal.is_open = true;
            state.modal.message = message;
        });
    }

    pub fn dismiss_modal(&self) {
        self.update(|state| {
            state.modal.is_open = false;
            state.modal.message.clear();
        });
    }
}

impl StatusReporter for SharedState {
    fn report(&self, message: &str, status_type: StatusType) {
        self.set_status(message, status_type);
    }
}
