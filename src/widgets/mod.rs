//! Immediate-mode style widgets
//!
//! Every widget is updated once per frame from a [`FrameContext`] and drawn
//! on demand. `changed` reports whether the last update altered anything
//! visible, so the caller can skip redraws on idle frames.
//!
//! Widgets placed in the world get the camera in their context: pointer
//! positions are mapped to world space before hit testing, and drawing goes
//! through the same camera.

mod button;
mod multi_box;
mod pad;
mod press;
mod rolling_list;
mod slider;
mod text_box;

use std::any::Any;
use std::time::Duration;

use glam::Vec2;

use crate::camera::Camera;
use crate::draw::{Surface, TextMetrics};
use crate::input::{Control, InputSnapshot, KeyStatus};

pub use button::Button;
pub use multi_box::MultiBox;
pub use pad::CircularPad;
pub use press::PressState;
pub use rolling_list::RollingList;
pub use slider::Slider;
pub use text_box::TextBox;

/// Inputs shared by every widget update in a frame
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    pub input: &'a InputSnapshot,
    /// Present for widgets placed in world space
    pub camera: Option<&'a Camera>,
    /// Time elapsed since the previous frame
    pub delta: Duration,
    pub metrics: &'a dyn TextMetrics,
}

impl<'a> FrameContext<'a> {
    pub fn new(input: &'a InputSnapshot, delta: Duration, metrics: &'a dyn TextMetrics) -> Self {
        Self {
            input,
            camera: None,
            delta,
            metrics,
        }
    }

    /// Same frame seen through a camera
    pub fn with_camera(self, camera: &'a Camera) -> Self {
        Self {
            camera: Some(camera),
            ..self
        }
    }

    /// Same frame in screen space
    pub fn without_camera(self) -> Self {
        Self {
            camera: None,
            ..self
        }
    }

    /// Pointer position in the widget's coordinate space
    pub fn pointer(&self) -> Vec2 {
        let position = self.input.mouse_position();
        self.camera
            .map_or(position, |camera| camera.screen_to_world(position))
    }

    /// Pointer movement since the last frame in the widget's coordinate space
    pub fn pointer_delta(&self) -> Vec2 {
        let delta = self.input.mouse_delta();
        self.camera.map_or(delta, |camera| delta / camera.scale())
    }

    /// Status of the left mouse button
    pub fn click(&self) -> KeyStatus {
        self.input.status(Control::MouseLeft)
    }

    pub fn status(&self, control: Control) -> KeyStatus {
        self.input.status(control)
    }
}

/// Common contract of every interactive element
pub trait Widget {
    /// Advances the widget by one frame
    fn update(&mut self, ctx: &FrameContext<'_>);

    /// Draws the widget in screen space, through `camera` when given
    fn draw(&self, surface: &mut dyn Surface, camera: Option<&Camera>);

    /// Returns true if the last update changed anything visible
    fn changed(&self) -> bool;

    fn visible(&self) -> bool {
        true
    }

    /// Returns self as Any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Returns self as mutable Any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
