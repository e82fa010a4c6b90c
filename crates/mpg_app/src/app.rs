//! Application loop.
//!
//! Lifecycle: `initialize()` acquires the surface and panel, `run()` polls,
//! updates and renders until something stops it, `cleanup()` releases the
//! panel and then the surface. Each frame:
//!
//!   1. drain pending events (quit, left click, escape)
//!   2. stop if the panel asked to exit
//!   3. update (nothing to do yet)
//!   4. clear, draw the panel, present
//!   5. sleep the fixed frame delay

use std::time::Duration;

use mpg_core::{Canvas, Color, FramePacer, Key, PlatformEvent};
use mpg_gui::{image_loading_supported, Panel, PanelError};
use mpg_platform::{Platform, PlatformConfig, PlatformError, PlatformSurface, SurfaceTexture};

pub const DEFAULT_BUILD_TOOL: &str = "Unknown";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error("failed to load GUI resources: {0}")]
    Resources(#[from] PanelError),
}

pub struct App<P: Platform> {
    platform: P,
    config: PlatformConfig,
    build_tool: String,
    running: bool,
    pacer: FramePacer,
    // Declared before `surface`: the panel's texture must go first.
    panel: Option<Panel<SurfaceTexture<P::Surface>>>,
    surface: Option<P::Surface>,
}

impl<P: Platform> App<P> {
    pub fn new(platform: P, build_tool: &str) -> Self {
        Self {
            platform,
            config: PlatformConfig::default(),
            build_tool: build_tool.to_string(),
            running: false,
            pacer: FramePacer::default(),
            panel: None,
            surface: None,
        }
    }

    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.pacer = FramePacer::new(delay);
        self
    }

    pub fn with_config(mut self, config: PlatformConfig) -> Self {
        self.config = config;
        self
    }

    pub fn initialize(&mut self) -> Result<(), AppError> {
        if self.surface.is_some() {
            log::warn!("initialize() called on an initialized application");
            return Ok(());
        }

        if !image_loading_supported() {
            log::warn!("Image loading support unavailable");
            log::info!("Continuing without image loading support...");
        }

        let mut surface = self.platform.create_surface(&self.config)?;
        let mut panel = Panel::new(&self.build_tool);
        // On failure both locals drop here, panel first.
        panel.load_resources(surface.canvas())?;

        self.surface = Some(surface);
        self.panel = Some(panel);

        log::info!("Application initialized successfully");
        log::info!("Built with: {}", self.build_tool);

        self.running = true;
        Ok(())
    }

    pub fn run(&mut self) {
        if self.surface.is_none() || self.panel.is_none() {
            log::error!("run() called without a successful initialize()");
            return;
        }

        self.pacer.reset_clock();
        while self.running {
            self.handle_events();
            self.update();
            self.render();
            self.pacer.end_frame();
        }

        log::info!(
            "Main loop finished after {} frames ({:.2}ms average frame time)",
            self.pacer.frame_count,
            self.pacer.smoothed_frame_time_ms
        );
    }

    fn handle_events(&mut self) {
        let (Some(surface), Some(panel)) = (self.surface.as_mut(), self.panel.as_mut()) else {
            return;
        };

        while let Some(event) = surface.poll_event() {
            match event {
                PlatformEvent::Quit => {
                    log::info!("Quit requested");
                    self.running = false;
                }
                PlatformEvent::KeyDown(Key::Escape) => {
                    log::info!("Escape pressed");
                    self.running = false;
                }
                _ => {
                    if let Some((x, y)) = event.left_click_position() {
                        panel.handle_click(x, y);
                    }
                }
            }
        }

        if panel.should_exit() {
            self.running = false;
        }
    }

    fn update(&mut self) {}

    fn render(&mut self) {
        let (Some(surface), Some(panel)) = (self.surface.as_mut(), self.panel.as_ref()) else {
            return;
        };
        let canvas = surface.canvas();
        canvas.clear(Color::BLACK);
        panel.render(canvas);
        surface.present();
    }

    /// Release the panel, then the surface. Safe to call any number of times,
    /// including after a failed `initialize()`.
    pub fn cleanup(&mut self) {
        self.running = false;
        let had_resources = self.panel.is_some() || self.surface.is_some();
        self.panel = None;
        self.surface = None;
        if had_resources {
            log::info!("Application cleaned up");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    pub fn build_tool(&self) -> &str {
        &self.build_tool
    }

    pub fn panel(&self) -> Option<&Panel<SurfaceTexture<P::Surface>>> {
        self.panel.as_ref()
    }

    pub fn surface(&self) -> Option<&P::Surface> {
        self.surface.as_ref()
    }

    pub fn frame_count(&self) -> u64 {
        self.pacer.frame_count
    }
}

impl<P: Platform> Drop for App<P> {
    fn drop(&mut self) {
        self.cleanup();
    }
}
