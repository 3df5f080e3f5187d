//! Per-control key status with edge detection

/// Press lifecycle of a single control
///
/// A control always passes through exactly one edge frame when it changes
/// between held and idle: `Up -> Pressed -> Down` and `Down -> Released -> Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyStatus {
    /// Not held
    #[default]
    Up,
    /// Pressed this frame (edge)
    Pressed,
    /// Held down (multiple frames)
    Down,
    /// Released this frame (edge)
    Released,
}

/// Raw edge reported by the event source for one control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Press,
    Release,
}

impl KeyStatus {
    /// Ages edge statuses into their steady states for the next frame
    #[must_use]
    pub fn decay(self) -> Self {
        match self {
            Self::Pressed => Self::Down,
            Self::Released => Self::Up,
            status => status,
        }
    }

    /// Applies a raw edge; the last edge of a frame wins
    #[must_use]
    pub fn apply_edge(self, edge: Edge) -> Self {
        match edge {
            Edge::Press => Self::Pressed,
            Edge::Release => Self::Released,
        }
    }

    pub fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns true if the control was pressed this frame
    pub fn is_pressed(self) -> bool {
        matches!(self, Self::Pressed)
    }

    /// Returns true if the control has been held since an earlier frame
    pub fn is_down(self) -> bool {
        matches!(self, Self::Down)
    }

    /// Returns true if the control was released this frame
    pub fn is_released(self) -> bool {
        matches!(self, Self::Released)
    }

    /// Returns true if the control is currently held (pressed this frame or earlier)
    pub fn is_held(self) -> bool {
        matches!(self, Self::Pressed | Self::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_turns_edges_into_steady_states() {
        assert_eq!(KeyStatus::Pressed.decay(), KeyStatus::Down);
        assert_eq!(KeyStatus::Released.decay(), KeyStatus::Up);
        assert_eq!(KeyStatus::Down.decay(), KeyStatus::Down);
        assert_eq!(KeyStatus::Up.decay(), KeyStatus::Up);
    }

    #[test]
    fn test_edges_override_any_prior_status() {
        for status in [
            KeyStatus::Up,
            KeyStatus::Pressed,
            KeyStatus::Down,
            KeyStatus::Released,
        ] {
            assert_eq!(status.apply_edge(Edge::Press), KeyStatus::Pressed);
            assert_eq!(status.apply_edge(Edge::Release), KeyStatus::Released);
        }
    }

    #[test]
    fn test_press_never_reverts_without_release() {
        let mut status = KeyStatus::Up.apply_edge(Edge::Press);
        assert!(status.is_pressed());
        for _ in 0..50 {
            status = status.decay();
            assert!(status.is_down());
            assert!(status.is_held());
        }
    }

    #[test]
    fn test_release_lasts_one_frame() {
        let status = KeyStatus::Down.apply_edge(Edge::Release);
        assert!(status.is_released());
        assert!(!status.is_held());
        assert!(status.decay().is_up());
    }
}
