use std::any::Any;

use glam::Vec2;
use tracing::debug;

use super::{FrameContext, PressState, Widget};
use crate::camera::Camera;
use crate::draw::{Color, Projection, Surface, color};
use crate::geometry::Rect;

/// Dot radius as a fraction of the pad radius
const DOT_RATIO: f32 = 0.3;

/// Virtual analog stick
///
/// While held, [`CircularPad::value`] is the stick deflection inside the
/// unit disk with Y pointing up.
#[derive(Debug, Clone)]
pub struct CircularPad {
    position: Vec2,
    radius: f32,
    color: Color,
    dot_color: Color,
    border: f32,
    border_color: Color,
    dot_border_color: Color,
    value: Option<Vec2>,
    press: PressState,
    visible: bool,
    changed: bool,
}

impl CircularPad {
    /// Creates a pad centered on `position`
    pub fn new(position: Vec2, radius: f32, color: Color, dot_color: Color) -> Self {
        assert!(radius > 0.0, "pad radius must be positive");
        Self {
            position,
            radius,
            color: color::with_alpha(color, 127),
            dot_color,
            border: 3.0,
            border_color: color::darker(color, 0.7),
            dot_border_color: color::darker(dot_color, 0.7),
            value: None,
            press: PressState::default(),
            visible: true,
            changed: true,
        }
    }

    pub fn with_border(mut self, width: f32) -> Self {
        self.border = width;
        self
    }

    /// Stick deflection, `None` while the pad is not held
    pub fn value(&self) -> Option<Vec2> {
        self.value
    }

    pub fn dot_radius(&self) -> f32 {
        (self.radius * DOT_RATIO).floor()
    }

    /// Returns true if `point` grabs the pad
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.position) <= self.radius + self.dot_radius()
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.changed |= self.visible != visible;
        self.visible = visible;
    }
}

impl Widget for CircularPad {
    fn update(&mut self, ctx: &FrameContext<'_>) {
        self.changed = false;
        if !self.visible {
            return;
        }

        let pointer = ctx.pointer();
        if self.press.update(ctx.click(), self.contains(pointer)) {
            debug!(status = ?self.press.status(), "Pad edge");
            self.changed = true;
            if self.press.is_released() {
                self.value = None;
            }
        }

        if self.press.is_held() {
            let mut value = (pointer - self.position) / (self.radius - self.dot_radius() / 2.0);
            value.y = -value.y;
            if value.length() > 1.0 {
                value = value.normalize();
            }
            self.value = Some(value);
            self.changed = true;
        }
    }

    fn draw(&self, surface: &mut dyn Surface, camera: Option<&Camera>) {
        let projection = Projection::new(camera);
        let bounds = Rect::from_center(self.position, Vec2::splat(self.radius * 2.0));
        if !self.visible || !projection.sees(bounds) {
            return;
        }

        let center = projection.point(self.position);
        let radius = projection.length(self.radius);
        let border = projection.stroke(self.border);
        surface.circle(center, radius, self.color, 0.0);
        surface.circle(center, radius, self.border_color, border);

        if let Some(value) = self.value {
            let offset = Vec2::new(value.x, -value.y) * (self.radius - self.dot_radius());
            let dot = projection.point(self.position + offset);
            let dot_radius = projection.length(self.dot_radius());
            surface.circle(dot, dot_radius, self.dot_color, 0.0);
            surface.circle(dot, dot_radius, self.dot_border_color, border);
        }
    }

    fn changed(&self) -> bool {
        self.changed
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
