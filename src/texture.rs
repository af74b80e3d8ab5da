use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use image::RgbaImage;
use thiserror::Error;

/// Errors that can occur during texture generation
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Invalid texture dimensions")]
    InvalidDimensions,
}

/// One GPU texture that is re-uploaded only when its source version changes.
pub struct TextureSlot {
    name: String,
    handle: Option<TextureHandle>,
    version: Option<u64>,
    options: TextureOptions,
}

impl TextureSlot {
    pub fn new(name: impl Into<String>, options: TextureOptions) -> Self {
        Self {
            name: name.into(),
            handle: None,
            version: None,
            options,
        }
    }

    /// Texture for `version`, running `generator` only on a miss.
    pub fn get_or_update<F>(
        &mut self,
        ctx: &Context,
        version: u64,
        generator: F,
    ) -> Result<TextureId, TextureError>
    where
        F: FnOnce() -> Result<ColorImage, TextureError>,
    {
        if let (Some(handle), Some(cached)) = (&self.handle, self.version) {
            if cached == version {
                return Ok(handle.id());
            }
        }

        let image = generator()?;
        match self.handle.as_mut() {
            Some(handle) => handle.set(image, self.options),
            None => self.handle = Some(ctx.load_texture(&self.name, image, self.options)),
        }
        self.version = Some(version);

        self.handle
            .as_ref()
            .map(TextureHandle::id)
            .ok_or(TextureError::InvalidDimensions)
    }

    /// Forget the texture, e.g. when its source is gone.
    pub fn clear(&mut self) {
        self.handle = None;
        self.version = None;
    }

    /// Size in pixels of the uploaded texture.
    pub fn size(&self) -> Option<[usize; 2]> {
        self.handle.as_ref().map(TextureHandle::size)
    }
}

pub fn color_image_from_raster(raster: &RgbaImage) -> Result<ColorImage, TextureError> {
    if raster.width() == 0 || raster.height() == 0 {
        return Err(TextureError::InvalidDimensions);
    }
    Ok(ColorImage::from_rgba_unmultiplied(
        [raster.width() as usize, raster.height() as usize],
        raster.as_raw(),
    ))
}

/// Decode encoded image bytes (PNG, ...) for display.
pub fn decode_color_image(bytes: &[u8]) -> Result<ColorImage, TextureError> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    color_image_from_raster(&decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn mock_texture_generator() -> Result<ColorImage, TextureError> {
        Ok(ColorImage::new([10, 10], egui::Color32::WHITE))
    }

    #[test]
    fn test_same_version_hits_cache() {
        let ctx = Context::default();
        let mut slot = TextureSlot::new("canvas", TextureOptions::NEAREST);
        let calls = Cell::new(0);
        let generator = || {
            calls.set(calls.get() + 1);
            mock_texture_generator()
        };

        let first = slot.get_or_update(&ctx, 1, generator).unwrap();
        let second = slot.get_or_update(&ctx, 1, generator).unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_new_version_reuploads_in_place() {
        let ctx = Context::default();
        let mut slot = TextureSlot::new("canvas", TextureOptions::NEAREST);
        let calls = Cell::new(0);
        let generator = || {
            calls.set(calls.get() + 1);
            mock_texture_generator()
        };
        let first = slot.get_or_update(&ctx, 1, generator).unwrap();
        let second = slot.get_or_update(&ctx, 2, generator).unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_clear_forces_reupload() {
        let ctx = Context::default();
        let mut slot = TextureSlot::new("result", TextureOptions::LINEAR);
        let calls = Cell::new(0);
        let generator = || {
            calls.set(calls.get() + 1);
            mock_texture_generator()
        };
        slot.get_or_update(&ctx, 7, generator).unwrap();
        slot.clear();
        assert_eq!(slot.size(), None);
        slot.get_or_update(&ctx, 7, generator).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_decode_png_bytes() {
        let raster = RgbaImage::from_pixel(4, 3, image::Rgba([1, 2, 3, 255]));
        let png = crate::canvas::encode_png(&raster).unwrap();
        let image = decode_color_image(&png).unwrap();
        assert_eq!(image.size, [4, 3]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(decode_color_image(b"not an image"), Err(TextureError::Decode(_))));
    }
}
