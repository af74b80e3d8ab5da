use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::state::{GeneratedImage, SharedState};

/// Suggested name for the saved character.
pub const DOWNLOAD_FILE_NAME: &str = "my-ai-character.png";

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("No character has been generated yet to download.")]
    NothingToDownload,

    #[error("Failed to save the character: {0}")]
    Io(#[from] std::io::Error),
}

/// The image the Download action would save.
pub fn downloadable(state: &SharedState) -> Result<GeneratedImage, DownloadError> {
    state.generated_image().ok_or(DownloadError::NothingToDownload)
}

/// Write the PNG bytes of `image` to `path`.
pub fn save_png(image: &GeneratedImage, path: &Path) -> Result<(), DownloadError> {
    fs::write(path, image.bytes())?;
    log::info!("Saved character to {}", path.display());
    Ok(())
}

/// Finish a download once the save dialog has answered. `None` means the
/// user cancelled. Failures end up in the modal.
pub fn complete(image: &GeneratedImage, target: Option<&Path>, state: &SharedState) {
    let Some(path) = target else {
        log::debug!("Download cancelled");
        return;
    };
    if let Err(e) = save_png(image, path) {
        log::error!("{}", e);
        state.open_modal(e.to_string());
    }
}
