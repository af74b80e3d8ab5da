mod drawing;
mod generation;
mod shared;

pub use drawing::{DrawingState, UiPreferences};
pub use generation::{GeneratedImage, GenerationState, ModalState, Stage, StatusType};
pub use shared::{AppState, SharedState};
