//! Application loop, winit surface and host bridge for the multi-platform
//! GUI demo.

pub mod app;
pub mod bridge;
pub mod winit_surface;

pub use app::{App, AppError, DEFAULT_BUILD_TOOL};
pub use bridge::HostBridge;
pub use winit_surface::{WinitPlatform, WinitSurface};

/// Label of the build system that produced this binary, taken from the
/// `BUILD_TOOL` environment variable at compile time.
pub fn build_tool_label() -> &'static str {
    option_env!("BUILD_TOOL").unwrap_or(DEFAULT_BUILD_TOOL)
}
