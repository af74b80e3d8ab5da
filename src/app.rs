use std::sync::Arc;

use crate::api::ReqwestTransport;
use crate::canvas::Canvas;
use crate::config::Config;
use crate::download::{self, DOWNLOAD_FILE_NAME};
use crate::input::InputHandler;
use crate::panels;
use crate::pipeline::GenerationPipeline;
use crate::state::{SharedState, UiPreferences};
use crate::texture::TextureSlot;

pub type AppResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub struct DoodleApp {
    pub(crate) state: SharedState,
    pub(crate) canvas: Canvas,
    pub(crate) input: InputHandler,
    pub(crate) canvas_texture: TextureSlot,
    pub(crate) result_texture: TextureSlot,
    /// Generated image that failed to decode, so it is not retried every frame
    pub(crate) undisplayable_image: Option<usize>,
    pipeline: Arc<GenerationPipeline>,
    runtime: Arc<tokio::runtime::Runtime>,
}

impl DoodleApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> AppResult<Self> {
        let state = SharedState::new().with_repaint(cc.egui_ctx.clone());

        // Load previous brush and style choices (if any).
        if let Some(storage) = cc.storage {
            if let Some(preferences) = eframe::get_value::<UiPreferences>(storage, eframe::APP_KEY) {
                state.apply_preferences(preferences);
            }
        }

        let runtime = Arc::new(
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?,
        );
        let transport = Arc::new(ReqwestTransport::new()?);
        log::info!("Using {:?}", config);
        let pipeline = Arc::new(GenerationPipeline::new(&config, transport, state.clone()));

        Ok(Self {
            state,
            canvas: Canvas::default(),
            input: InputHandler::new(egui::Rect::NOTHING, egui::Vec2::ZERO),
            canvas_texture: TextureSlot::new("doodle_canvas", egui::TextureOptions::NEAREST),
            result_texture: TextureSlot::new("generated_character", egui::TextureOptions::LINEAR),
            undisplayable_image: None,
            pipeline,
            runtime,
        })
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Snapshot the canvas and run the pipeline in the background.
    pub fn generate_character(&mut self) {
        if self.state.is_generating() {
            return;
        }
        let doodle = self.canvas.snapshot();
        let style = self.state.selected_style();
        let pipeline = Arc::clone(&self.pipeline);
        self.runtime.spawn(async move {
            if let Err(e) = pipeline.generate(doodle, style).await {
                log::debug!("Generation ended with: {}", e);
            }
        });
    }

    pub fn clear_canvas(&mut self) {
        self.canvas.clear();
        self.state.clear_result();
        self.result_texture.clear();
        self.undisplayable_image = None;
    }

    pub fn download_character(&mut self) {
        let image = match download::downloadable(&self.state) {
            Ok(image) => image,
            Err(e) => {
                self.state.open_modal(e.to_string());
                return;
            }
        };

        // Awaited on the runtime so the UI keeps repainting behind the dialog
        let dialog = rfd::AsyncFileDialog::new()
            .set_file_name(DOWNLOAD_FILE_NAME)
            .add_filter("PNG image", &["png"])
            .save_file();
        let state = self.state.clone();
        self.runtime.spawn(async move {
            let target = dialog.await;
            download::complete(&image, target.as_ref().map(|handle| handle.path()), &state);
        });
    }
}

impl eframe::App for DoodleApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.state.preferences());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::controls_panel(self, ctx);
        panels::central_panel(self, ctx);
        panels::modal(self, ctx);
    }
}
