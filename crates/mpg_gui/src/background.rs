//! Background asset: a decoded image when one is available, otherwise a
//! generated vertical gradient.

use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgba, RgbaImage};
use mpg_core::Color;

pub const BACKGROUND_PATH: &str = "resources/background.png";
pub const GRADIENT_WIDTH: u32 = 800;
pub const GRADIENT_HEIGHT: u32 = 600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundSource {
    Image(PathBuf),
    Generated,
}

/// Whether this build can decode the background image at all.
pub fn image_loading_supported() -> bool {
    cfg!(feature = "png")
}

/// Color of row `y` in a gradient of `height` rows. Integer division
/// truncates, and `y` must be below `height`.
pub fn gradient_row_color(y: u32, height: u32) -> Color {
    let blue = 50 + (y as u64 * 150 / height as u64) as u8;
    let green = 30 + (y as u64 * 100 / height as u64) as u8;
    Color::rgba(20, green, blue, 255)
}

/// Dark blue at the top ramping to a lighter blue-green at the bottom; every
/// pixel in a row is identical.
pub fn generate_gradient(width: u32, height: u32) -> RgbaImage {
    ImageBuffer::from_fn(width, height, |_, y| {
        Rgba(gradient_row_color(y, height).to_rgba8())
    })
}

#[derive(Debug)]
pub enum ImageLoadFailure {
    Missing,
    Unreadable(image::ImageError),
}

pub fn load_image(path: &Path) -> Result<RgbaImage, ImageLoadFailure> {
    if !path.exists() {
        return Err(ImageLoadFailure::Missing);
    }
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(ImageLoadFailure::Unreadable)
}
