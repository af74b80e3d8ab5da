//! Doodle to character generation.
//!
//! A run goes `Validating -> Describing -> Rendering`. The outcome is the
//! returned `Result` together with the final status line. Whatever happens,
//! the shared state is back at `Idle` with `is_generating == false` when
//! [`GenerationPipeline::generate`] returns.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{ImageFormat, RgbaImage};
use uuid::Uuid;

use crate::api::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::api::{HttpTransport, RetryingClient};
use crate::canvas;
use crate::config::Config;
use crate::error::GenerationError;
use crate::state::{GeneratedImage, SharedState, Stage, StatusType};
use crate::style::{CharacterStyle, BACKGROUND};

pub const DESCRIBE_PROMPT: &str = "Describe this doodle. Focus on the main subject, key shapes, and any distinct features. The description will be used to generate a cartoon character. For example, 'A simple drawing of a round character with spiky hair and big eyes'. Be concise, aim for 1-2 sentences.";

/// Used when the description call gives back nothing usable.
pub const FALLBACK_DESCRIPTION: &str = "A doodle of a character";

/// Characters of the description echoed in the status line
const DESCRIPTION_PREVIEW_CHARS: usize = 50;

pub fn render_prompt(style: CharacterStyle, description: &str) -> String {
    format!(
        "Generate a single, well-defined {} style cartoon character. The character is based on this description: \"{}\". The character should be the main focus, clear, vibrant, and artistically rendered in the chosen style. No text, no multiple characters, just one central character.",
        style.label(),
        description
    )
}

pub struct GenerationPipeline {
    client: RetryingClient,
    state: SharedState,
    describe_url: String,
    render_url: String,
}

impl GenerationPipeline {
    pub fn new(config: &Config, transport: Arc<dyn HttpTransport>, state: SharedState) -> Self {
        let client = RetryingClient::new(transport, Arc::new(state.clone()), config.retry_policy());
        Self {
            client,
            state,
            describe_url: config.describe_url(),
            render_url: config.render_url(),
        }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Turn a doodle into a character in the given style.
    ///
    /// Returns [`GenerationError::Busy`] without side effects when another run
    /// is in flight.
    pub async fn generate(
        &self,
        doodle: RgbaImage,
        style: CharacterStyle,
    ) -> Result<GeneratedImage, GenerationError> {
        if !self.state.try_begin_generation() {
            log::warn!("Generate requested while a run is in flight, ignoring");
            return Err(GenerationError::Busy);
        }

        let run_id = Uuid::new_v4();
        log::info!("[{}] Generating a {} character", run_id, style);

        let result = self.run(run_id, &doodle, style).await;
        match &result {
            Ok(_) => log::info!("[{}] Character generated", run_id),
            Err(e) => {
                log::error!("[{}] Generation failed: {}", run_id, e);
                self.report_failure(e);
            }
        }

        self.state.finish_generation();
        result
    }

    async fn run(
        &self,
        run_id: Uuid,
        doodle: &RgbaImage,
        style: CharacterStyle,
    ) -> Result<GeneratedImage, GenerationError> {
        self.state.set_stage(Stage::Validating);
        self.state.set_status("Preparing your doodle for AI...", StatusType::Info);
        let png = validate(doodle)?;
        log::debug!("[{}] Doodle encoded, {} PNG bytes", run_id, png.len());

        self.state.set_stage(Stage::Describing);
        self.state.set_status("AI is analyzing your doodle...", StatusType::Info);
        let description = self.describe(run_id, &png).await?;
        let preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        self.state.set_status(format!("Doodle described as: \"{}...\"", preview), StatusType::Info);

        self.state.set_stage(Stage::Rendering);
        self.state.set_status("AI is rendering your character...", StatusType::Info);
        let image = self.render(run_id, style, &description).await?;

        self.state.set_generated_image(image.clone());
        self.state.set_status("Character generated successfully!", StatusType::Success);
        Ok(image)
    }

    async fn describe(&self, run_id: Uuid, png: &[u8]) -> Result<String, GenerationError> {
        let request = GenerateContentRequest::text_with_png(DESCRIBE_PROMPT, BASE64.encode(png));
        let value = self.client.post(&self.describe_url, &request.to_value()).await?;

        let description = serde_json::from_value::<GenerateContentResponse>(value)
            .ok()
            .and_then(|response| response.first_text().map(|text| text.trim().to_owned()))
            .filter(|text| !text.is_empty());

        Ok(description.unwrap_or_else(|| {
            log::warn!("[{}] Could not get a good description, using fallback", run_id);
            FALLBACK_DESCRIPTION.to_owned()
        }))
    }

    async fn render(
        &self,
        run_id: Uuid,
        style: CharacterStyle,
        description: &str,
    ) -> Result<GeneratedImage, GenerationError> {
        let request = GenerateContentRequest::text(render_prompt(style, description));
        let value = self.client.post(&self.render_url, &request.to_value()).await?;

        let response: GenerateContentResponse = serde_json::from_value(value)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
        let encoded = response.first_image_base64().ok_or(GenerationError::NoImageData)?;
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| GenerationError::InvalidImageData(e.to_string()))?;
        // Only bytes the result panel can show and download as PNG count
        image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .map_err(|e| GenerationError::InvalidImageData(e.to_string()))?;
        log::debug!("[{}] Received {} image bytes", run_id, bytes.len());

        Ok(GeneratedImage::new(encoded, bytes))
    }

    fn report_failure(&self, error: &GenerationError) {
        if error.is_validation() {
            self.state.clear_status();
            self.state.open_modal(error.to_string());
            return;
        }
        self.state.set_status(format!("Error: {}", error), StatusType::Error);
        self.state.open_modal(format!("An error occurred: {}", error));
    }
}

/// PNG bytes of the doodle, or `EmptyDoodle` when there is nothing to send.
pub fn validate(doodle: &RgbaImage) -> Result<Vec<u8>, GenerationError> {
    let png = canvas::encode_png(doodle).map_err(|e| GenerationError::Encode(e.to_string()))?;
    if png.is_empty() {
        return Err(GenerationError::EmptyDoodle);
    }
    let blank = canvas::blank_raster(doodle.width(), doodle.height(), BACKGROUND);
    let blank_png = canvas::encode_png(&blank).map_err(|e| GenerationError::Encode(e.to_string()))?;
    if png == blank_png {
        return Err(GenerationError::EmptyDoodle);
    }
    Ok(png)
}
