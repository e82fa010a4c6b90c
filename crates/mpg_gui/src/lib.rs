pub mod background;
pub mod button;
pub mod panel;

pub use background::{image_loading_supported, BackgroundSource, BACKGROUND_PATH};
pub use button::Button;
pub use panel::{Panel, PanelError, ABOUT_TEXT};
