//! Desktop/mobile surface: a winit window driven by explicit event pumping,
//! rendered with wgpu.
//!
//! winit normally owns the main loop through `run_app`. The application loop
//! here is a plain poll/update/render cycle, so the event loop is pumped with
//! a zero timeout whenever the loop wants more input, and the handler only
//! translates and queues events.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use mpg_core::{MouseBtn, PlatformEvent};
use mpg_platform::events::{canvas_point, map_key, map_mouse_button};
use mpg_platform::window::create_window;
use mpg_platform::{Platform, PlatformConfig, PlatformError, PlatformSurface};
use mpg_render::GpuCanvas;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

/// Pumps allowed before giving up on the platform ever resuming us.
const STARTUP_PUMP_LIMIT: u32 = 100;

#[derive(Debug, Default)]
pub struct WinitPlatform;

impl Platform for WinitPlatform {
    type Surface = WinitSurface;

    fn create_surface(&mut self, config: &PlatformConfig) -> Result<WinitSurface, PlatformError> {
        WinitSurface::new(config)
    }
}

struct EventCollector {
    config: PlatformConfig,
    window: Option<Arc<Window>>,
    creation_error: Option<PlatformError>,
    pending: VecDeque<PlatformEvent>,
    cursor: PhysicalPosition<f64>,
    surface_size: (u32, u32),
    pending_resize: Option<(u32, u32)>,
}

impl EventCollector {
    fn new(config: PlatformConfig) -> Self {
        Self {
            config,
            window: None,
            creation_error: None,
            pending: VecDeque::new(),
            cursor: PhysicalPosition::new(0.0, 0.0),
            surface_size: (0, 0),
            pending_resize: None,
        }
    }

    fn push_button_down(&mut self, button: MouseBtn, position: PhysicalPosition<f64>) {
        let (x, y) = canvas_point(
            position.x,
            position.y,
            self.surface_size,
            (self.config.width, self.config.height),
        );
        self.pending
            .push_back(PlatformEvent::MouseButtonDown { button, x, y });
    }
}

impl ApplicationHandler for EventCollector {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match create_window(event_loop, &self.config) {
            Ok(window) => {
                let size = window.inner_size();
                self.surface_size = (size.width, size.height);
                log::info!(
                    "Window created: {}x{} ({}x{} physical)",
                    self.config.width,
                    self.config.height,
                    size.width,
                    size.height
                );
                self.window = Some(window);
            }
            Err(err) => self.creation_error = Some(err),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                self.pending.push_back(PlatformEvent::Quit);
            }

            WindowEvent::Resized(size) => {
                self.surface_size = (size.width, size.height);
                self.pending_resize = Some((size.width, size.height));
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = position;
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                if let Some(button) = map_mouse_button(button) {
                    self.push_button_down(button, self.cursor);
                }
            }

            // Touch screens report taps as left clicks.
            WindowEvent::Touch(touch) if touch.phase == TouchPhase::Started => {
                self.push_button_down(MouseBtn::Left, touch.location);
            }

            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    self.pending
                        .push_back(PlatformEvent::KeyDown(map_key(key_code)));
                }
            }

            _ => {}
        }
    }
}

/// Window, renderer and event loop. Fields drop in declaration order:
/// renderer, then window, then event loop.
pub struct WinitSurface {
    canvas: GpuCanvas,
    collector: EventCollector,
    event_loop: EventLoop<()>,
    exit_reported: bool,
}

impl WinitSurface {
    pub fn new(config: &PlatformConfig) -> Result<Self, PlatformError> {
        let mut event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        // The window can only be created from inside the handler, once the
        // platform has resumed the app.
        let mut collector = EventCollector::new(config.clone());
        let mut pumps = 0;
        let window = loop {
            if let Some(window) = &collector.window {
                break Arc::clone(window);
            }
            if pumps == STARTUP_PUMP_LIMIT {
                return Err(PlatformError::WindowNotCreated(pumps));
            }
            pumps += 1;
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut collector)
            {
                return Err(PlatformError::ExitedDuringStartup(code));
            }
            if let Some(err) = collector.creation_error.take() {
                return Err(err);
            }
        };

        let canvas = GpuCanvas::new(window, config.width, config.height)
            .map_err(|e| PlatformError::Renderer(Box::new(e)))?;
        // The renderer was configured from the current window size.
        collector.pending_resize = None;

        Ok(Self {
            canvas,
            collector,
            event_loop,
            exit_reported: false,
        })
    }

    fn pump(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.collector);

        if let Some((width, height)) = self.collector.pending_resize.take() {
            self.canvas.resize(width, height);
        }

        if let PumpStatus::Exit(code) = status {
            if !self.exit_reported {
                log::info!("Event loop exited with code {}", code);
                self.exit_reported = true;
                self.collector.pending.push_back(PlatformEvent::Quit);
            }
        }
    }
}

impl PlatformSurface for WinitSurface {
    type Canvas = GpuCanvas;

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        if self.collector.pending.is_empty() {
            self.pump();
        }
        self.collector.pending.pop_front()
    }

    fn canvas(&mut self) -> &mut GpuCanvas {
        &mut self.canvas
    }

    fn present(&mut self) {
        self.canvas.present();
    }
}
