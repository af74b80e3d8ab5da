#![warn(clippy::all, rust_2018_idioms)]

pub mod api;
pub mod app;
pub mod canvas;
pub mod config;
pub mod download;
pub mod error;
pub mod input;
pub mod panels;
pub mod pipeline;
pub mod state;
pub mod stroke;
pub mod style;
pub mod texture;

pub use app::DoodleApp;
pub use canvas::Canvas;
pub use config::Config;
pub use error::GenerationError;
pub use input::{InputEvent, InputHandler};
pub use pipeline::GenerationPipeline;
pub use state::SharedState;
pub use style::CharacterStyle;
