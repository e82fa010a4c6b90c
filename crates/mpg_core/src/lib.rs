pub mod canvas;
pub mod geometry;
pub mod input;
pub mod time;

pub use canvas::{
    validate_rgba, Canvas, CanvasError, DrawOp, RecordedTexture, RecordingCanvas, TextureUpload,
};
pub use geometry::{Color, Rect};
pub use input::{Key, MouseBtn, PlatformEvent};
pub use time::{FramePacer, FRAME_DELAY};
