use std::sync::Arc;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use crate::surface::PlatformError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Multi-Platform GUI App".to_string(),
            width: 800,
            height: 600,
            resizable: false,
        }
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, PlatformError> {
    let mut attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable);

    if let Some(monitor) = event_loop.primary_monitor() {
        let window_size: PhysicalSize<u32> =
            LogicalSize::new(config.width, config.height).to_physical(monitor.scale_factor());
        attrs = attrs.with_position(centered_position(
            monitor.position(),
            monitor.size(),
            window_size,
        ));
    }

    let window = event_loop
        .create_window(attrs)
        .map_err(|e| PlatformError::Window(e.to_string()))?;
    Ok(Arc::new(window))
}

/// Top-left position that centers `window` on a monitor. Windows larger than
/// the monitor are pinned to the monitor's origin.
pub fn centered_position(
    monitor_origin: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let dx = monitor_size.width.saturating_sub(window.width) / 2;
    let dy = monitor_size.height.saturating_sub(window.height) / 2;
    PhysicalPosition::new(monitor_origin.x + dx as i32, monitor_origin.y + dy as i32)
}
