/// Axis-aligned rectangle in canvas pixels. The origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.w as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.h as i64
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let (px, py) = (px as i64, py as i64);
        px >= self.x as i64 && px < self.right() && py >= self.y as i64 && py < self.bottom()
    }

    /// The strips covered by a single-pixel outline of this rect.
    ///
    /// Top and bottom span the full width; left and right fill the rows in
    /// between so no pixel is covered twice. Rects thinner than three pixels
    /// in either axis are entirely border and come back as one strip.
    pub fn outline_edges(&self) -> Vec<Rect> {
        if self.is_empty() {
            return Vec::new();
        }
        if self.w < 3 || self.h < 3 {
            return vec![*self];
        }
        let inner_h = self.h - 2;
        vec![
            Rect::new(self.x, self.y, self.w, 1),
            Rect::new(self.x, self.y + self.h as i32 - 1, self.w, 1),
            Rect::new(self.x, self.y + 1, 1, inner_h),
            Rect::new(self.x + self.w as i32 - 1, self.y + 1, 1, inner_h),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Normalized channels, no gamma conversion.
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(750, 10, 40, 40);
        assert!(rect.contains(750, 10));
        assert!(rect.contains(789, 49));
        assert!(!rect.contains(790, 30));
        assert!(!rect.contains(760, 50));
        assert!(!rect.contains(749, 30));
        assert!(!rect.contains(760, 9));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let rect = Rect::new(5, 5, 0, 10);
        assert!(rect.is_empty());
        assert!(!rect.contains(5, 5));
    }

    #[test]
    fn contains_handles_extreme_coordinates() {
        let rect = Rect::new(i32::MAX - 1, 0, u32::MAX, 1);
        assert!(rect.contains(i32::MAX, 0));
        assert!(!rect.contains(i32::MIN, 0));
    }

    #[test]
    fn outline_edges_cover_border_without_overlap() {
        let rect = Rect::new(200, 200, 400, 200);
        let edges = rect.outline_edges();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], Rect::new(200, 200, 400, 1));
        assert_eq!(edges[1], Rect::new(200, 399, 400, 1));
        assert_eq!(edges[2], Rect::new(200, 201, 1, 198));
        assert_eq!(edges[3], Rect::new(599, 201, 1, 198));

        let covered: u32 = edges.iter().map(|e| e.w * e.h).sum();
        assert_eq!(covered, 2 * 400 + 2 * 198);
    }

    #[test]
    fn outline_of_thin_rect_is_the_rect() {
        let rect = Rect::new(0, 0, 2, 40);
        assert_eq!(rect.outline_edges(), vec![rect]);
        assert!(Rect::new(0, 0, 0, 0).outline_edges().is_empty());
    }

    #[test]
    fn color_normalizes_without_gamma() {
        let c = Color::rgba(255, 0, 0, 180);
        let f = c.to_f32_array();
        assert_eq!(f[0], 1.0);
        assert_eq!(f[1], 0.0);
        assert!((f[3] - 180.0 / 255.0).abs() < f32::EPSILON);
        assert_eq!(Color::rgb(1, 2, 3).a, 255);
    }
}
