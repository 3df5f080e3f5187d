//! Tracked logical controls and the key code lookup table

use super::events::KeyCode;

/// A logical control whose status is tracked every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Escape,
    Return,
    Space,
    Backspace,
    Delete,
    Tab,
    Shift,
    Ctrl,
    Alt,
    Left,
    Right,
    Up,
    Down,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    MouseLeft,
    MouseWheel,
    MouseRight,
}

/// Platform key codes bound to tracked controls. Both sides of a modifier
/// drive the same control.
const KEY_BINDINGS: [(KeyCode, Control); 26] = [
    (KeyCode::Escape, Control::Escape),
    (KeyCode::Enter, Control::Return),
    (KeyCode::Space, Control::Space),
    (KeyCode::Backspace, Control::Backspace),
    (KeyCode::Delete, Control::Delete),
    (KeyCode::Tab, Control::Tab),
    (KeyCode::ShiftLeft, Control::Shift),
    (KeyCode::ShiftRight, Control::Shift),
    (KeyCode::ControlLeft, Control::Ctrl),
    (KeyCode::ControlRight, Control::Ctrl),
    (KeyCode::AltLeft, Control::Alt),
    (KeyCode::AltRight, Control::Alt),
    (KeyCode::Left, Control::Left),
    (KeyCode::Right, Control::Right),
    (KeyCode::Up, Control::Up),
    (KeyCode::Down, Control::Down),
    (KeyCode::Num0, Control::Digit0),
    (KeyCode::Num1, Control::Digit1),
    (KeyCode::Num2, Control::Digit2),
    (KeyCode::Num3, Control::Digit3),
    (KeyCode::Num4, Control::Digit4),
    (KeyCode::Num5, Control::Digit5),
    (KeyCode::Num6, Control::Digit6),
    (KeyCode::Num7, Control::Digit7),
    (KeyCode::Num8, Control::Digit8),
    (KeyCode::Num9, Control::Digit9),
];

impl Control {
    /// Number of tracked controls
    pub const COUNT: usize = 26;

    /// Every tracked control, in index order
    pub const ALL: [Control; Self::COUNT] = [
        Self::Escape,
        Self::Return,
        Self::Space,
        Self::Backspace,
        Self::Delete,
        Self::Tab,
        Self::Shift,
        Self::Ctrl,
        Self::Alt,
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::Digit0,
        Self::Digit1,
        Self::Digit2,
        Self::Digit3,
        Self::Digit4,
        Self::Digit5,
        Self::Digit6,
        Self::Digit7,
        Self::Digit8,
        Self::Digit9,
        Self::MouseLeft,
        Self::MouseWheel,
        Self::MouseRight,
    ];

    /// Slot of this control in per-control storage
    pub fn index(self) -> usize {
        self as usize
    }

    /// Looks up the control bound to a key code; unbound keys yield `None`
    pub fn from_key(key: KeyCode) -> Option<Self> {
        KEY_BINDINGS
            .iter()
            .find(|(code, _)| *code == key)
            .map(|(_, control)| *control)
    }

    /// Maps mouse button numbers 1/2/3 to left/wheel/right
    pub fn from_mouse_button(button: u8) -> Option<Self> {
        match button {
            1 => Some(Self::MouseLeft),
            2 => Some(Self::MouseWheel),
            3 => Some(Self::MouseRight),
            _ => None,
        }
    }

    pub fn is_mouse(self) -> bool {
        matches!(self, Self::MouseLeft | Self::MouseWheel | Self::MouseRight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_match_table_order() {
        for (i, control) in Control::ALL.iter().enumerate() {
            assert_eq!(control.index(), i);
        }
    }

    #[test]
    fn test_both_modifier_sides_share_a_control() {
        assert_eq!(Control::from_key(KeyCode::ShiftLeft), Some(Control::Shift));
        assert_eq!(Control::from_key(KeyCode::ShiftRight), Some(Control::Shift));
        assert_eq!(Control::from_key(KeyCode::AltRight), Some(Control::Alt));
        assert_eq!(Control::from_key(KeyCode::ControlRight), Some(Control::Ctrl));
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        assert_eq!(Control::from_key(KeyCode::Other), None);
        assert_eq!(Control::from_mouse_button(4), None);
        assert_eq!(Control::from_mouse_button(2), Some(Control::MouseWheel));
    }
}
