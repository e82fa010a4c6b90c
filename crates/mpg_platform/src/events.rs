//! Translation from winit input to `PlatformEvent` pieces.

use mpg_core::{Key, MouseBtn};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

pub fn map_key(key_code: KeyCode) -> Key {
    match key_code {
        KeyCode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

pub fn map_mouse_button(button: MouseButton) -> Option<MouseBtn> {
    match button {
        MouseButton::Left => Some(MouseBtn::Left),
        MouseButton::Right => Some(MouseBtn::Right),
        MouseButton::Middle => Some(MouseBtn::Middle),
        _ => None,
    }
}

/// Map a physical surface position onto the logical canvas, which is
/// stretched over the whole surface.
pub fn canvas_point(x: f64, y: f64, surface: (u32, u32), canvas: (u32, u32)) -> (i32, i32) {
    let scale_x = if surface.0 > 0 {
        canvas.0 as f64 / surface.0 as f64
    } else {
        1.0
    };
    let scale_y = if surface.1 > 0 {
        canvas.1 as f64 / surface.1 as f64
    } else {
        1.0
    };
    ((x * scale_x).floor() as i32, (y * scale_y).floor() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_is_the_only_bound_key() {
        assert_eq!(map_key(KeyCode::Escape), Key::Escape);
        assert_eq!(map_key(KeyCode::KeyQ), Key::Other);
        assert_eq!(map_key(KeyCode::Enter), Key::Other);
    }

    #[test]
    fn extra_mouse_buttons_are_dropped() {
        assert_eq!(map_mouse_button(MouseButton::Left), Some(MouseBtn::Left));
        assert_eq!(map_mouse_button(MouseButton::Right), Some(MouseBtn::Right));
        assert_eq!(map_mouse_button(MouseButton::Back), None);
        assert_eq!(map_mouse_button(MouseButton::Other(7)), None);
    }

    #[test]
    fn canvas_point_is_identity_at_native_size() {
        assert_eq!(canvas_point(720.4, 30.9, (800, 600), (800, 600)), (720, 30));
    }

    #[test]
    fn canvas_point_scales_hidpi_surfaces() {
        // 2x scale factor: physical 1600x1200 surface showing an 800x600 canvas.
        assert_eq!(canvas_point(1520.0, 60.0, (1600, 1200), (800, 600)), (760, 30));
    }

    #[test]
    fn canvas_point_tolerates_zero_sized_surface() {
        assert_eq!(canvas_point(12.0, 34.0, (0, 0), (800, 600)), (12, 34));
    }
}
