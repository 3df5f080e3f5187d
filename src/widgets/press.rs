use crate::input::KeyStatus;

/// Press lifecycle shared by clickable widgets
///
/// ```text
/// Up -(click while hovered)-> Pressed -(next frame)-> Down
/// Down -(button released)-> Released -(next frame)-> Up
/// ```
///
/// The release is tracked even when the pointer has left the widget, so a
/// drag that started on it always ends with a Released frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressState {
    status: KeyStatus,
}

impl PressState {
    /// Advances one frame from the pointer button status
    ///
    /// Returns true if a press or release edge fired this frame.
    pub fn update(&mut self, button: KeyStatus, hovered: bool) -> bool {
        self.status = self.status.decay();

        if button.is_pressed() && hovered {
            self.status = KeyStatus::Pressed;
            true
        } else if self.status.is_down() && button.is_released() {
            self.status = KeyStatus::Released;
            true
        } else {
            false
        }
    }

    pub fn status(&self) -> KeyStatus {
        self.status
    }

    /// True only on the frame the press edge fired
    pub fn is_pressed(&self) -> bool {
        self.status.is_pressed()
    }

    /// True only on the frame the release edge fired
    pub fn is_released(&self) -> bool {
        self.status.is_released()
    }

    /// Pressed or Down
    pub fn is_held(&self) -> bool {
        self.status.is_held()
    }

    pub fn reset(&mut self) {
        self.status = KeyStatus::Up;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_click_cycle() {
        let mut press = PressState::default();
        assert!(press.update(KeyStatus::Pressed, true));
        assert!(press.is_pressed());

        assert!(!press.update(KeyStatus::Down, false));
        assert_eq!(press.status(), KeyStatus::Down);

        assert!(press.update(KeyStatus::Released, false));
        assert!(press.is_released());

        assert!(!press.update(KeyStatus::Up, true));
        assert_eq!(press.status(), KeyStatus::Up);
    }

    #[test]
    fn test_click_outside_is_ignored() {
        let mut press = PressState::default();
        assert!(!press.update(KeyStatus::Pressed, false));
        assert!(!press.update(KeyStatus::Released, true));
        assert_eq!(press.status(), KeyStatus::Up);
    }
}
