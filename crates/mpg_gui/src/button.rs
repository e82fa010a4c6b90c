use mpg_core::{Color, Rect};

/// A clickable rectangle. The label is kept for callers but is never
/// rasterized; buttons draw as a filled rect with a white border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    rect: Rect,
    label: String,
    color: Color,
}

impl Button {
    pub fn new(rect: Rect, label: &str, color: Color) -> Self {
        Self {
            rect,
            label: label.to_string(),
            color,
        }
    }

    /// Red "X" in the top-right corner.
    pub fn exit() -> Self {
        Self::new(Rect::new(750, 10, 40, 40), "X", Color::rgb(255, 0, 0))
    }

    /// Blue "i" immediately left of the exit button.
    pub fn info() -> Self {
        Self::new(Rect::new(700, 10, 40, 40), "i", Color::rgb(0, 120, 255))
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rect.contains(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_buttons_do_not_overlap() {
        let exit = Button::exit();
        let info = Button::info();
        assert!(info.rect().right() <= exit.rect().x as i64);
        for x in 700..790 {
            for y in 10..50 {
                assert!(!(exit.contains(x, y) && info.contains(x, y)), "overlap at ({x}, {y})");
            }
        }
    }

    #[test]
    fn default_buttons_keep_labels_and_colors() {
        assert_eq!(Button::exit().label(), "X");
        assert_eq!(Button::exit().color(), Color::rgba(255, 0, 0, 255));
        assert_eq!(Button::info().label(), "i");
        assert_eq!(Button::info().color(), Color::rgba(0, 120, 255, 255));
    }
}
