//! Key repeat timing for held keys

use std::time::Duration;

use super::state::KeyStatus;

/// Turns a held key into a stream of repeated actions
///
/// The first action fires on the press edge. Once the key has been held
/// longer than `threshold`, one more action fires per elapsed `interval`.
/// Repeats are derived from the total held time, so the count does not
/// depend on how the time was split across frames.
#[derive(Debug, Clone)]
pub struct KeyRepeat {
    threshold: Duration,
    interval: Duration,
    held: Duration,
    fired: u128,
}

impl KeyRepeat {
    /// Creates a repeat timer
    ///
    /// # Panics
    /// Panics if `interval` is zero.
    pub fn new(threshold: Duration, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "key repeat interval must be non-zero");
        Self {
            threshold,
            interval,
            held: Duration::ZERO,
            fired: 0,
        }
    }

    /// Advances the timer and returns how many actions to perform this frame
    pub fn tick(&mut self, status: KeyStatus, delta: Duration) -> u32 {
        match status {
            KeyStatus::Pressed => {
                self.reset();
                1
            }
            KeyStatus::Down => {
                self.held += delta;
                if self.held <= self.threshold {
                    return 0;
                }
                let past = (self.held - self.threshold).as_nanos();
                let total = past / self.interval.as_nanos() + 1;
                let due = total - self.fired;
                self.fired = total;
                u32::try_from(due).unwrap_or(u32::MAX)
            }
            KeyStatus::Up | KeyStatus::Released => {
                self.reset();
                0
            }
        }
    }

    /// Disarms the timer
    pub fn reset(&mut self) {
        self.held = Duration::ZERO;
        self.fired = 0;
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
