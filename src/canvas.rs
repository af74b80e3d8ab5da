use std::io::Cursor;

use egui::{Color32, Pos2, Vec2};
use image::{ImageError, ImageFormat, Rgba, RgbaImage};

use crate::input::InputEvent;
use crate::state::DrawingState;
use crate::stroke::ActiveStroke;
use crate::style::BACKGROUND;

/// Width over height of the drawing surface.
pub const ASPECT_RATIO: f32 = 4.0 / 3.0;

/// The raster the user doodles on.
///
/// Pixel coordinates are canvas-local: `(0, 0)` is the top-left pixel.
pub struct Canvas {
    raster: RgbaImage,
    background: Color32,
    active_stroke: Option<ActiveStroke>,
    /// Bumped on every pixel mutation
    version: u64,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            raster: blank_raster(width, height, BACKGROUND),
            background: BACKGROUND,
            active_stroke: None,
            version: 0,
        }
    }

    /// Largest 4:3 size that fits inside `container`, truncated to whole pixels.
    pub fn fit_size(container: Vec2) -> [u32; 2] {
        let mut width = container.x.max(0.0);
        let mut height = width / ASPECT_RATIO;
        if height > container.y {
            height = container.y.max(0.0);
            width = height * ASPECT_RATIO;
        }
        [width as u32, height as u32]
    }

    /// Resize to fill `container`. Returns true when the raster was rebuilt.
    pub fn fit_to(&mut self, container: Vec2) -> bool {
        let [width, height] = Self::fit_size(container);
        if width == self.width() && height == self.height() {
            return false;
        }
        self.resize(width, height);
        true
    }

    /// Rebuild the raster at a new size. Existing pixels are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!("Resizing canvas to {}x{}", width, height);
        self.raster = blank_raster(width, height, self.background);
        self.active_stroke = None;
        self.version += 1;
    }

    /// Repaint the whole raster with the background color.
    pub fn clear(&mut self) {
        let fill = to_rgba(self.background);
        for pixel in self.raster.pixels_mut() {
            *pixel = fill;
        }
        self.active_stroke = None;
        self.version += 1;
    }

    pub fn handle_input(&mut self, event: &InputEvent, drawing: &mut DrawingState) {
        match event {
            InputEvent::PointerDown { position } => self.begin_path(*position, drawing),
            InputEvent::PointerMove { position } => self.extend_path(*position, drawing),
            InputEvent::PointerUp | InputEvent::PointerLeave => self.end_path(drawing),
        }
    }

    pub fn begin_path(&mut self, position: Pos2, drawing: &mut DrawingState) {
        drawing.is_drawing = true;
        self.active_stroke = Some(ActiveStroke::begin(
            position,
            drawing.current_color,
            drawing.current_brush_size as f32,
        ));
    }

    pub fn extend_path(&mut self, position: Pos2, drawing: &DrawingState) {
        if !drawing.is_drawing {
            return;
        }
        let Some(stroke) = self.active_stroke.as_mut() else {
            return;
        };
        let color = stroke.color();
        let thickness = stroke.thickness();
        if let Some((from, to)) = stroke.extend_to(position) {
            self.paint_segment(from, to, color, thickness);
        }
    }

    pub fn end_path(&mut self, drawing: &mut DrawingState) {
        if drawing.is_drawing {
            self.active_stroke = None;
            drawing.is_drawing = false;
        }
    }

    /// Paint a straight segment with round caps.
    ///
    /// A pixel is covered when its center lies within `thickness / 2` of the segment.
    pub fn paint_segment(&mut self, from: Pos2, to: Pos2, color: Color32, thickness: f32) {
        let (width, height) = self.raster.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        let radius = (thickness / 2.0).max(0.5);
        let min_x = (from.x.min(to.x) - radius).floor().max(0.0) as u32;
        let min_y = (from.y.min(to.y) - radius).floor().max(0.0) as u32;
        let max_x = ((from.x.max(to.x) + radius).ceil().max(0.0) as u32).min(width - 1);
        let max_y = ((from.y.max(to.y) + radius).ceil().max(0.0) as u32).min(height - 1);
        if min_x > max_x || min_y > max_y {
            return;
        }

        let fill = to_rgba(color);
        let mut painted = false;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_to_segment(center, from, to) <= radius {
                    self.raster.put_pixel(x, y, fill);
                    painted = true;
                }
            }
        }
        if painted {
            self.version += 1;
        }
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    /// Copy of the raster handed to the generation pipeline.
    pub fn snapshot(&self) -> RgbaImage {
        self.raster.clone()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, ImageError> {
        encode_png(&self.raster)
    }

    pub fn is_blank(&self) -> Result<bool, ImageError> {
        is_blank(&self.raster, self.background)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

pub fn blank_raster(width: u32, height: u32, background: Color32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, to_rgba(background))
}

/// PNG bytes for a raster. A zero-sized raster has no payload.
pub fn encode_png(raster: &RgbaImage) -> Result<Vec<u8>, ImageError> {
    if raster.width() == 0 || raster.height() == 0 {
        return Ok(Vec::new());
    }
    let mut bytes = Cursor::new(Vec::new());
    raster.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// True when `raster` encodes to exactly the same bytes as a freshly cleared
/// raster of the same size.
pub fn is_blank(raster: &RgbaImage, background: Color32) -> Result<bool, ImageError> {
    let encoded = encode_png(raster)?;
    let blank = encode_png(&blank_raster(raster.width(), raster.height(), background))?;
    Ok(encoded == blank)
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_array())
}

fn distance_to_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}
