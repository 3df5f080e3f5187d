//! Per-frame input snapshot built from the raw event queue

use glam::Vec2;
use tracing::{debug, trace};

use super::control::Control;
use super::events::{PointerSample, RawEvent};
use super::state::{Edge, KeyStatus};

/// Input state for one frame
///
/// `refresh` is the only mutator and must run exactly once per frame, before
/// any camera or widget update reads the snapshot.
#[derive(Debug, Clone)]
pub struct InputSnapshot {
    statuses: [KeyStatus; Control::COUNT],
    text: String,
    mouse_position: Vec2,
    mouse_delta: Vec2,
    scroll: f32,
    resized: Option<Vec2>,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSnapshot {
    /// Creates a snapshot with every control up and the pointer at the origin
    pub fn new() -> Self {
        Self {
            statuses: [KeyStatus::Up; Control::COUNT],
            text: String::new(),
            mouse_position: Vec2::ZERO,
            mouse_delta: Vec2::ZERO,
            scroll: 0.0,
            resized: None,
        }
    }

    /// Advances the snapshot by one frame
    ///
    /// Clears frame-local state, decays edge statuses, then applies `events`
    /// in order. Returns `false` as soon as a quit event is seen; the
    /// remaining events and the pointer sample are not applied.
    pub fn refresh<I>(&mut self, events: I, pointer: PointerSample) -> bool
    where
        I: IntoIterator<Item = RawEvent>,
    {
        self.text.clear();
        self.scroll = 0.0;
        self.resized = None;

        for status in &mut self.statuses {
            *status = status.decay();
        }

        for event in events {
            match event {
                RawEvent::Quit => {
                    debug!("Quit requested");
                    return false;
                }
                RawEvent::KeyDown(key) => {
                    if let Some(control) = Control::from_key(key) {
                        self.apply(control, Edge::Press);
                    }
                }
                RawEvent::KeyUp(key) => {
                    if let Some(control) = Control::from_key(key) {
                        self.apply(control, Edge::Release);
                    }
                }
                RawEvent::MouseDown(button) => {
                    if let Some(control) = Control::from_mouse_button(button) {
                        self.apply(control, Edge::Press);
                    }
                }
                RawEvent::MouseUp(button) => {
                    if let Some(control) = Control::from_mouse_button(button) {
                        self.apply(control, Edge::Release);
                    }
                }
                RawEvent::MouseWheel(amount) => self.scroll = amount,
                RawEvent::Resized(size) => {
                    debug!(width = size.x, height = size.y, "Window resized");
                    self.resized = Some(size);
                }
                RawEvent::TextInput(text) => self.text.push_str(&text),
            }
        }

        self.mouse_position = pointer.position;
        self.mouse_delta = pointer.delta;
        true
    }

    fn apply(&mut self, control: Control, edge: Edge) {
        let slot = &mut self.statuses[control.index()];
        *slot = slot.apply_edge(edge);
        trace!(?control, status = ?*slot, "Control edge");
    }

    /// Status of a tracked control
    pub fn status(&self, control: Control) -> KeyStatus {
        self.statuses[control.index()]
    }

    /// Text typed this frame
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Pointer movement since the previous frame
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Wheel movement this frame (last wheel event wins)
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// New window size if a resize happened this frame
    pub fn resized(&self) -> Option<Vec2> {
        self.resized
    }

    /// Returns true while the control modifier is held
    pub fn modifier_held(&self) -> bool {
        self.status(Control::Ctrl).is_held()
    }
}
