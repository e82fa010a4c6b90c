//! Immediate-mode drawing contract shared by every rendering backend.
//!
//! A `Canvas` exposes a fixed logical size; backends are free to stretch it
//! onto whatever physical surface they own. Draw calls within a frame are
//! composited in call order, later calls on top.

use crate::geometry::{Color, Rect};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("texture '{label}' has zero size ({width}x{height})")]
    EmptyTexture {
        label: String,
        width: u32,
        height: u32,
    },
    #[error("texture '{label}' is {width}x{height}, larger than the {max}px limit")]
    TextureTooLarge {
        label: String,
        width: u32,
        height: u32,
        max: u32,
    },
    #[error("texture '{label}' expected {expected} bytes of RGBA data, got {actual}")]
    PixelDataLength {
        label: String,
        expected: usize,
        actual: usize,
    },
}

pub trait Canvas {
    /// Backend handle for an uploaded texture. Dropping the last handle
    /// releases the texture.
    type Texture;

    /// Logical size in pixels.
    fn size(&self) -> (u32, u32);

    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Single-pixel outline along the inside edge of `rect`.
    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Draw the whole texture stretched into `dst`.
    fn draw_texture(&mut self, texture: &Self::Texture, dst: Rect);

    /// Upload tightly packed RGBA8 pixels.
    fn create_texture(
        &mut self,
        rgba: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Result<Self::Texture, CanvasError>;

    fn bounds(&self) -> Rect {
        let (w, h) = self.size();
        Rect::new(0, 0, w, h)
    }
}

/// Checks an upload against the rules every backend enforces.
pub fn validate_rgba(
    rgba: &[u8],
    width: u32,
    height: u32,
    max_dimension: u32,
    label: &str,
) -> Result<(), CanvasError> {
    if width == 0 || height == 0 {
        return Err(CanvasError::EmptyTexture {
            label: label.to_string(),
            width,
            height,
        });
    }
    if width > max_dimension || height > max_dimension {
        return Err(CanvasError::TextureTooLarge {
            label: label.to_string(),
            width,
            height,
            max: max_dimension,
        });
    }
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(CanvasError::PixelDataLength {
            label: label.to_string(),
            expected,
            actual: rgba.len(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Clear(Color),
    FillRect(Rect, Color),
    DrawRect(Rect, Color),
    Texture { texture_id: usize, dst: Rect },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTexture {
    pub id: usize,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct TextureUpload {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureUpload {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Headless canvas that records draw calls instead of rasterizing them.
pub struct RecordingCanvas {
    size: (u32, u32),
    max_texture_dimension: u32,
    ops: Vec<DrawOp>,
    uploads: Vec<TextureUpload>,
}

impl RecordingCanvas {
    pub const DEFAULT_MAX_TEXTURE_DIMENSION: u32 = 8192;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            max_texture_dimension: Self::DEFAULT_MAX_TEXTURE_DIMENSION,
            ops: Vec::new(),
            uploads: Vec::new(),
        }
    }

    pub fn with_max_texture_dimension(mut self, max: u32) -> Self {
        self.max_texture_dimension = max;
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Returns the ops recorded since the last call.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn uploads(&self) -> &[TextureUpload] {
        &self.uploads
    }

    pub fn upload(&self, texture: &RecordedTexture) -> Option<&TextureUpload> {
        self.uploads.get(texture.id)
    }
}

impl Canvas for RecordingCanvas {
    type Texture = RecordedTexture;

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect(rect, color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::DrawRect(rect, color));
    }

    fn draw_texture(&mut self, texture: &RecordedTexture, dst: Rect) {
        self.ops.push(DrawOp::Texture {
            texture_id: texture.id,
            dst,
        });
    }

    fn create_texture(
        &mut self,
        rgba: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Result<RecordedTexture, CanvasError> {
        validate_rgba(rgba, width, height, self.max_texture_dimension, label)?;
        let id = self.uploads.len();
        self.uploads.push(TextureUpload {
            label: label.to_string(),
            width,
            height,
            rgba: rgba.to_vec(),
        });
        log::trace!("Recorded texture upload '{}' ({}x{})", label, width, height);
        Ok(RecordedTexture { id, width, height })
    }
}
