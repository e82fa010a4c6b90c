//! Backend-neutral input events.
//!
//! Platform backends translate their native events into `PlatformEvent` before
//! the application loop sees them. Pointer coordinates are always in logical
//! canvas pixels, so hit-testing never has to know about DPI scaling or the
//! physical size of the window.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    /// Any key the application has no binding for.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The window was closed or the platform asked the app to stop.
    Quit,
    MouseButtonDown { button: MouseBtn, x: i32, y: i32 },
    KeyDown(Key),
}

impl PlatformEvent {
    pub fn left_click(x: i32, y: i32) -> Self {
        Self::MouseButtonDown {
            button: MouseBtn::Left,
            x,
            y,
        }
    }

    /// Position of a left-button press, if this is one.
    pub fn left_click_position(&self) -> Option<(i32, i32)> {
        match *self {
            Self::MouseButtonDown {
                button: MouseBtn::Left,
                x,
                y,
            } => Some((x, y)),
            _ => None,
        }
    }
}
