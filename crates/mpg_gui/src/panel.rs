//! The interactive panel: two buttons, a background and the about overlay.
//!
//! Overlay state machine:
//!
//!   Normal --info click--> OverlayShown
//!   OverlayShown --info click | click outside both buttons--> Normal
//!
//! The exit request is a separate absorbing flag; it can be raised from
//! either state and never clears.
//!
//! The panel holds no renderer. The canvas is lent to `load_resources` and
//! `render`, and the only GPU-side object the panel keeps is the background
//! texture handle, which the owner must drop before the surface.

use std::path::{Path, PathBuf};

use mpg_core::{Canvas, CanvasError, Color, Rect};

use crate::background::{
    generate_gradient, image_loading_supported, load_image, BackgroundSource, ImageLoadFailure,
    BACKGROUND_PATH, GRADIENT_HEIGHT, GRADIENT_WIDTH,
};
use crate::button::Button;

pub const ABOUT_TEXT: &str = "Multi-Platform GUI App v1.0";

const BORDER_COLOR: Color = Color::WHITE;
const OVERLAY_COLOR: Color = Color::rgba(0, 0, 0, 180);
const DIALOG_RECT: Rect = Rect::new(200, 200, 400, 200);
const DIALOG_COLOR: Color = Color::rgb(240, 240, 240);
const DIALOG_BORDER_COLOR: Color = Color::rgb(100, 100, 100);

#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("failed to create generated background: {0}")]
    GeneratedBackground(#[source] CanvasError),
}

struct Background<T> {
    texture: T,
    source: BackgroundSource,
}

pub struct Panel<T> {
    exit_button: Button,
    info_button: Button,
    background: Option<Background<T>>,
    background_path: PathBuf,
    exit_requested: bool,
    show_overlay: bool,
    build_tool: String,
}

impl<T> Panel<T> {
    pub fn new(build_tool: &str) -> Self {
        Self {
            exit_button: Button::exit(),
            info_button: Button::info(),
            background: None,
            background_path: PathBuf::from(BACKGROUND_PATH),
            exit_requested: false,
            show_overlay: false,
            build_tool: build_tool.to_string(),
        }
    }

    pub fn with_background_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.background_path = path.into();
        self
    }

    /// Load the background image, falling back to a generated gradient.
    ///
    /// Only a failure to upload the gradient itself is an error; a missing or
    /// broken image is logged and replaced.
    pub fn load_resources<C>(&mut self, canvas: &mut C) -> Result<(), PanelError>
    where
        C: Canvas<Texture = T>,
    {
        if image_loading_supported() {
            if let Some(background) = self.load_image_background(canvas) {
                self.background = Some(background);
                return Ok(());
            }
        } else {
            log::debug!("Image decoding not compiled in, skipping background image");
        }

        let gradient = generate_gradient(GRADIENT_WIDTH, GRADIENT_HEIGHT);
        let texture = canvas
            .create_texture(
                gradient.as_raw(),
                gradient.width(),
                gradient.height(),
                "generated_background",
            )
            .map_err(PanelError::GeneratedBackground)?;
        self.background = Some(Background {
            texture,
            source: BackgroundSource::Generated,
        });
        Ok(())
    }

    fn load_image_background<C>(&self, canvas: &mut C) -> Option<Background<T>>
    where
        C: Canvas<Texture = T>,
    {
        let path = &self.background_path;
        let image = match load_image(path) {
            Ok(image) => image,
            Err(ImageLoadFailure::Missing) => {
                log::info!("Background image not found, creating default background");
                return None;
            }
            Err(ImageLoadFailure::Unreadable(err)) => {
                log::warn!(
                    "Failed to decode background '{}': {}. Creating default background.",
                    path.display(),
                    err
                );
                return None;
            }
        };

        let label = path.to_string_lossy();
        match canvas.create_texture(image.as_raw(), image.width(), image.height(), &label) {
            Ok(texture) => {
                log::info!("Loaded background image: {}", path.display());
                Some(Background {
                    texture,
                    source: BackgroundSource::Image(path.clone()),
                })
            }
            Err(err) => {
                log::warn!(
                    "Failed to create texture from {}: {}. Creating default background.",
                    path.display(),
                    err
                );
                None
            }
        }
    }

    /// Exit button wins over info; a click on neither dismisses the overlay.
    pub fn handle_click(&mut self, x: i32, y: i32) {
        if self.exit_button.contains(x, y) {
            log::info!("Exit button clicked");
            self.exit_requested = true;
            return;
        }

        if self.info_button.contains(x, y) {
            log::info!("Info button clicked");
            self.show_overlay = !self.show_overlay;
            if self.show_overlay {
                log::info!("About Dialog: {} - Built with {}", ABOUT_TEXT, self.build_tool);
            }
            return;
        }

        if self.show_overlay {
            self.show_overlay = false;
        }
    }

    pub fn render<C>(&self, canvas: &mut C)
    where
        C: Canvas<Texture = T>,
    {
        let bounds = canvas.bounds();
        if let Some(background) = &self.background {
            canvas.draw_texture(&background.texture, bounds);
        }

        render_button(canvas, &self.exit_button);
        render_button(canvas, &self.info_button);

        if self.show_overlay {
            canvas.fill_rect(bounds, OVERLAY_COLOR);
            canvas.fill_rect(DIALOG_RECT, DIALOG_COLOR);
            canvas.draw_rect(DIALOG_RECT, DIALOG_BORDER_COLOR);
        }
    }

    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    pub fn is_showing_overlay(&self) -> bool {
        self.show_overlay
    }

    pub fn exit_button(&self) -> &Button {
        &self.exit_button
    }

    pub fn info_button(&self) -> &Button {
        &self.info_button
    }

    pub fn background_source(&self) -> Option<&BackgroundSource> {
        self.background.as_ref().map(|bg| &bg.source)
    }

    pub fn background_path(&self) -> &Path {
        &self.background_path
    }

    pub fn build_tool(&self) -> &str {
        &self.build_tool
    }
}

fn render_button<C: Canvas>(canvas: &mut C, button: &Button) {
    canvas.fill_rect(button.rect(), button.color());
    canvas.draw_rect(button.rect(), BORDER_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpg_core::{DrawOp, RecordedTexture, RecordingCanvas};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "mpg_panel_test_{}_{}_{}.png",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn panel_without_image() -> Panel<RecordedTexture> {
        Panel::new("Cargo").with_background_path(temp_file_path("absent"))
    }

    fn loaded_panel() -> (Panel<RecordedTexture>, RecordingCanvas) {
        let mut canvas = RecordingCanvas::new(800, 600);
        let mut panel = panel_without_image();
        panel
            .load_resources(&mut canvas)
            .expect("gradient fallback should load");
        (panel, canvas)
    }

    #[test]
    fn exit_button_area_requests_exit_only() {
        for (x, y) in [(750, 10), (789, 49), (770, 30)] {
            let mut panel = panel_without_image();
            panel.handle_click(x, y);
            assert!(panel.should_exit(), "({x}, {y}) should hit exit");
            assert!(!panel.is_showing_overlay());
        }
    }

    #[test]
    fn exit_click_leaves_visible_overlay_alone() {
        let mut panel = panel_without_image();
        panel.handle_click(720, 30);
        panel.handle_click(760, 30);
        assert!(panel.should_exit());
        assert!(panel.is_showing_overlay());
    }

    #[test]
    fn exit_request_is_monotonic() {
        let mut panel = panel_without_image();
        panel.handle_click(760, 30);
        panel.handle_click(760, 30);
        assert!(panel.should_exit());
        panel.handle_click(10, 500);
        panel.handle_click(720, 30);
        assert!(panel.should_exit());
    }

    #[test]
    fn info_button_area_toggles_overlay() {
        for (x, y) in [(700, 10), (739, 49), (720, 30)] {
            let mut panel = panel_without_image();
            panel.handle_click(x, y);
            assert!(panel.is_showing_overlay(), "({x}, {y}) should hit info");
            panel.handle_click(x, y);
            assert!(!panel.is_showing_overlay());
            assert!(!panel.should_exit());
        }
    }

    #[test]
    fn click_outside_dismisses_overlay() {
        let mut panel = panel_without_image();
        panel.handle_click(720, 30);
        assert!(panel.is_showing_overlay());
        // The gap between the buttons belongs to neither.
        panel.handle_click(745, 30);
        assert!(!panel.is_showing_overlay());
        assert!(!panel.should_exit());
    }

    #[test]
    fn click_outside_without_overlay_changes_nothing() {
        let mut panel = panel_without_image();
        for (x, y) in [(0, 0), (740, 30), (790, 30), (720, 50), (720, 9), (-5, -5), (400, 300)] {
            panel.handle_click(x, y);
            assert!(!panel.is_showing_overlay(), "({x}, {y})");
            assert!(!panel.should_exit(), "({x}, {y})");
        }
    }

    #[test]
    fn missing_image_falls_back_to_gradient() {
        let (panel, canvas) = loaded_panel();
        assert_eq!(panel.background_source(), Some(&BackgroundSource::Generated));

        let upload = &canvas.uploads()[0];
        assert_eq!(upload.label, "generated_background");
        assert_eq!((upload.width, upload.height), (800, 600));
        assert_eq!(upload.pixel(0, 0), Some([20, 30, 50, 255]));
        assert_eq!(upload.pixel(799, 300), Some([20, 80, 125, 255]));
        assert_eq!(upload.pixel(123, 599), Some([20, 129, 199, 255]));
    }

    #[test]
    fn undecodable_image_falls_back_to_gradient() {
        let path = temp_file_path("garbage");
        std::fs::write(&path, b"definitely not a png").expect("failed to write temp file");

        let mut canvas = RecordingCanvas::new(800, 600);
        let mut panel = Panel::new("Cargo").with_background_path(&path);
        panel.load_resources(&mut canvas).expect("fallback should load");
        assert_eq!(panel.background_source(), Some(&BackgroundSource::Generated));

        let _ = std::fs::remove_file(path);
    }

    #[cfg(feature = "png")]
    #[test]
    fn valid_image_is_used_as_background() {
        let path = temp_file_path("valid");
        let image = image::RgbaImage::from_pixel(4, 2, image::Rgba([9, 8, 7, 255]));
        image.save(&path).expect("failed to write temp png");

        let mut canvas = RecordingCanvas::new(800, 600);
        let mut panel = Panel::new("Cargo").with_background_path(&path);
        panel.load_resources(&mut canvas).expect("image should load");

        assert_eq!(
            panel.background_source(),
            Some(&BackgroundSource::Image(path.clone()))
        );
        let upload = &canvas.uploads()[0];
        assert_eq!((upload.width, upload.height), (4, 2));
        assert_eq!(upload.pixel(3, 1), Some([9, 8, 7, 255]));

        let _ = std::fs::remove_file(path);
    }

    #[cfg(feature = "png")]
    #[test]
    fn rejected_image_upload_falls_back_to_gradient() {
        let path = temp_file_path("too_big");
        let image = image::RgbaImage::from_pixel(900, 1, image::Rgba([1, 1, 1, 255]));
        image.save(&path).expect("failed to write temp png");

        let mut canvas = RecordingCanvas::new(800, 600).with_max_texture_dimension(800);
        let mut panel = Panel::new("Cargo").with_background_path(&path);
        panel.load_resources(&mut canvas).expect("fallback should load");

        assert_eq!(panel.background_source(), Some(&BackgroundSource::Generated));
        assert_eq!(canvas.uploads().len(), 1);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn failed_gradient_upload_is_an_error() {
        let mut canvas = RecordingCanvas::new(800, 600).with_max_texture_dimension(100);
        let mut panel = panel_without_image();
        let err = panel
            .load_resources(&mut canvas)
            .expect_err("gradient exceeds texture limit");
        assert!(matches!(
            err,
            PanelError::GeneratedBackground(CanvasError::TextureTooLarge { .. })
        ));
        assert!(panel.background_source().is_none());
    }

    #[test]
    fn render_draws_background_then_buttons() {
        let (panel, mut canvas) = loaded_panel();
        panel.render(&mut canvas);

        assert_eq!(
            canvas.take_ops(),
            vec![
                DrawOp::Texture {
                    texture_id: 0,
                    dst: Rect::new(0, 0, 800, 600),
                },
                DrawOp::FillRect(Rect::new(750, 10, 40, 40), Color::rgb(255, 0, 0)),
                DrawOp::DrawRect(Rect::new(750, 10, 40, 40), Color::WHITE),
                DrawOp::FillRect(Rect::new(700, 10, 40, 40), Color::rgb(0, 120, 255)),
                DrawOp::DrawRect(Rect::new(700, 10, 40, 40), Color::WHITE),
            ]
        );
    }

    #[test]
    fn render_draws_overlay_last() {
        let (mut panel, mut canvas) = loaded_panel();
        panel.handle_click(720, 30);
        panel.render(&mut canvas);

        let ops = canvas.take_ops();
        assert_eq!(ops.len(), 8);
        assert_eq!(
            &ops[5..],
            &[
                DrawOp::FillRect(Rect::new(0, 0, 800, 600), Color::rgba(0, 0, 0, 180)),
                DrawOp::FillRect(Rect::new(200, 200, 400, 200), Color::rgb(240, 240, 240)),
                DrawOp::DrawRect(Rect::new(200, 200, 400, 200), Color::rgb(100, 100, 100)),
            ]
        );
    }

    #[test]
    fn render_before_load_skips_background() {
        let mut canvas = RecordingCanvas::new(800, 600);
        let panel = panel_without_image();
        panel.render(&mut canvas);
        assert_eq!(canvas.ops().len(), 4);
        assert!(matches!(canvas.ops()[0], DrawOp::FillRect(..)));
    }
}
