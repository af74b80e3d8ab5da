use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// Static counter for generating unique IDs
static NEXT_IMAGE_ID: AtomicUsize = AtomicUsize::new(1);

/// How a status line should be presented.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

/// Where the generation pipeline currently is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Idle,
    Validating,
    Describing,
    Rendering,
}

/// A rendered character, kept both as a data URL and as raw PNG bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    id: usize,
    data_url: String,
    bytes: Arc<[u8]>,
}

impl GeneratedImage {
    /// `base64` must be the encoding of `bytes`.
    pub fn new(base64: &str, bytes: Vec<u8>) -> Self {
        Self {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::SeqCst),
            data_url: format!("data:image/png;base64,{}", base64),
            bytes: bytes.into(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct GenerationState {
    pub is_generating: bool,
    pub status_message: String,
    pub status_type: StatusType,
    pub generated_image: Option<GeneratedImage>,
    pub stage: Stage,
}

impl GenerationState {
    pub fn generated_image_url(&self) -> Option<&str> {
        self.generated_image.as_ref().map(GeneratedImage::data_url)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ModalState {
    pub is_open: bool,
    pub message: String,
}
