//! The platform seam: everything the application loop needs from a
//! windowing/graphics backend.

use mpg_core::{Canvas, PlatformEvent};

use crate::window::PlatformConfig;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("failed to create event loop: {0}")]
    EventLoop(String),
    #[error("window creation failed: {0}")]
    Window(String),
    #[error("window was not created after {0} event-loop pumps")]
    WindowNotCreated(u32),
    #[error("event loop exited during startup (code {0})")]
    ExitedDuringStartup(i32),
    #[error("renderer creation failed: {0}")]
    Renderer(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Creates surfaces. One surface is one window plus its renderer.
pub trait Platform {
    type Surface: PlatformSurface;

    fn create_surface(&mut self, config: &PlatformConfig) -> Result<Self::Surface, PlatformError>;
}

/// A live window/renderer pair. Dropping it releases the renderer first,
/// then the window.
pub trait PlatformSurface {
    type Canvas: Canvas;

    /// Next pending input event, or `None` once the queue is drained.
    fn poll_event(&mut self) -> Option<PlatformEvent>;

    fn canvas(&mut self) -> &mut Self::Canvas;

    /// Show everything drawn on the canvas since the last present.
    fn present(&mut self);
}

/// Texture handle type of a surface's canvas.
pub type SurfaceTexture<S> = <<S as PlatformSurface>::Canvas as Canvas>::Texture;
