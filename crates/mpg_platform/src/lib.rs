pub mod events;
pub mod headless;
pub mod surface;
pub mod window;

pub use headless::{HeadlessPlatform, HeadlessStats, HeadlessSurface};
pub use surface::{Platform, PlatformError, PlatformSurface, SurfaceTexture};
pub use window::PlatformConfig;
