//! Raw, backend-neutral input events

use glam::Vec2;

/// One raw event from the platform, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum RawEvent {
    /// The user asked to close the application
    Quit,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Mouse button pressed (1 = left, 2 = wheel, 3 = right)
    MouseDown(u8),
    /// Mouse button released (1 = left, 2 = wheel, 3 = right)
    MouseUp(u8),
    /// Signed vertical wheel movement, positive away from the user
    MouseWheel(f32),
    /// Window resized to a new logical size
    Resized(Vec2),
    /// Committed text, possibly several characters
    TextInput(String),
}

/// Pointer state sampled from the platform after event ingestion
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    /// Absolute position in screen space
    pub position: Vec2,
    /// Movement since the previous frame
    pub delta: Vec2,
}

impl PointerSample {
    pub fn new(position: Vec2, delta: Vec2) -> Self {
        Self { position, delta }
    }

    /// A pointer resting at `position`
    pub fn at(position: Vec2) -> Self {
        Self::new(position, Vec2::ZERO)
    }
}

/// Key code independent of the windowing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Editing and control keys
    Escape,
    Enter,
    Space,
    Backspace,
    Delete,
    Tab,

    // Modifiers
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    // Arrows
    Left,
    Right,
    Up,
    Down,

    // Numbers
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    /// Any key no control binds; letters arrive as text input
    Other,
}

/// Convert from winit key code
impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as WK;
        match key {
            WK::Escape => Self::Escape,
            WK::Enter | WK::NumpadEnter => Self::Enter,
            WK::Space => Self::Space,
            WK::Backspace => Self::Backspace,
            WK::Delete => Self::Delete,
            WK::Tab => Self::Tab,

            WK::ShiftLeft => Self::ShiftLeft,
            WK::ShiftRight => Self::ShiftRight,
            WK::ControlLeft => Self::ControlLeft,
            WK::ControlRight => Self::ControlRight,
            WK::AltLeft => Self::AltLeft,
            WK::AltRight => Self::AltRight,

            WK::ArrowLeft => Self::Left,
            WK::ArrowRight => Self::Right,
            WK::ArrowUp => Self::Up,
            WK::ArrowDown => Self::Down,

            WK::Digit0 => Self::Num0,
            WK::Digit1 => Self::Num1,
            WK::Digit2 => Self::Num2,
            WK::Digit3 => Self::Num3,
            WK::Digit4 => Self::Num4,
            WK::Digit5 => Self::Num5,
            WK::Digit6 => Self::Num6,
            WK::Digit7 => Self::Num7,
            WK::Digit8 => Self::Num8,
            WK::Digit9 => Self::Num9,

            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode as WK;

    #[test]
    fn test_winit_keys_map_to_neutral_codes() {
        assert_eq!(KeyCode::from(WK::NumpadEnter), KeyCode::Enter);
        assert_eq!(KeyCode::from(WK::AltRight), KeyCode::AltRight);
        assert_eq!(KeyCode::from(WK::Digit7), KeyCode::Num7);
        assert_eq!(KeyCode::from(WK::F5), KeyCode::Other);
        assert_eq!(KeyCode::from(WK::KeyQ), KeyCode::Other);
    }
}
