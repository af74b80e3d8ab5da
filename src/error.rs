use thiserror::Error;

use crate::api::ApiError;

/// Reasons a generation run ends without a character.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// Another run is still in flight
    #[error("A character is already being generated. Please wait for it to finish.")]
    Busy,

    /// Nothing has been drawn yet
    #[error("The doodle area is empty. Please draw something first!")]
    EmptyDoodle,

    #[error("Could not encode the doodle as PNG: {0}")]
    Encode(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The rendering response does not have the expected shape
    #[error("Unexpected response from the image service: {0}")]
    MalformedResponse(String),

    #[error("Image generation failed: No image data in response.")]
    NoImageData,

    #[error("Image generation failed: invalid image data ({0}).")]
    InvalidImageData(String),
}

impl GenerationError {
    /// Errors the user can fix without retrying later.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyDoodle)
    }
}
