use std::any::Any;

use glam::Vec2;
use tracing::debug;

use super::{FrameContext, PressState, Widget};
use crate::camera::Camera;
use crate::draw::{Color, CornerRadii, Projection, Surface, TextAlign, TextStyle, color};
use crate::geometry::Rect;

/// Clickable rectangle with an optional label
#[derive(Debug, Clone)]
pub struct Button {
    rect: Rect,
    color: Color,
    border: f32,
    border_color: Color,
    corner_radius: f32,
    label: Option<String>,
    label_style: TextStyle,
    press: PressState,
    hovered: bool,
    visible: bool,
    changed: bool,
}

impl Button {
    /// Creates a button with its top-left corner at `position`
    pub fn new(position: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            rect: Rect::new(position, size),
            color,
            border: 2.0,
            border_color: color::BLACK,
            corner_radius: 4.0,
            label: None,
            label_style: TextStyle::new(28.0),
            press: PressState::default(),
            hovered: false,
            visible: true,
            changed: true,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_label_style(mut self, style: TextStyle) -> Self {
        self.label_style = style;
        self
    }

    pub fn with_border(mut self, width: f32, color: Color) -> Self {
        self.border = width;
        self.border_color = color;
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_position(&mut self, position: Vec2) {
        if self.rect.origin != position {
            self.rect.origin = position;
            self.changed = true;
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.changed |= self.visible != visible;
        self.visible = visible;
        if !visible {
            self.press.reset();
            self.hovered = false;
        }
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    /// True only on the frame the button was clicked
    pub fn is_pressed(&self) -> bool {
        self.press.is_pressed()
    }

    /// True only on the frame the button was let go
    pub fn is_released(&self) -> bool {
        self.press.is_released()
    }

    pub fn is_held(&self) -> bool {
        self.press.is_held()
    }

    fn fill_color(&self) -> Color {
        if self.press.is_held() {
            color::darker(self.color, 0.8 * 0.7)
        } else if self.hovered {
            color::darker(self.color, 0.8)
        } else {
            self.color
        }
    }
}

impl Widget for Button {
    fn update(&mut self, ctx: &FrameContext<'_>) {
        self.changed = false;
        if !self.visible {
            return;
        }

        let hovered = self.rect.contains(ctx.pointer());
        if hovered != self.hovered {
            self.hovered = hovered;
            self.changed = true;
        }

        if self.press.update(ctx.click(), self.hovered) {
            debug!(label = ?self.label, status = ?self.press.status(), "Button edge");
            self.changed = true;
        }
    }

    fn draw(&self, surface: &mut dyn Surface, camera: Option<&Camera>) {
        let projection = Projection::new(camera);
        if !self.visible || !projection.sees(self.rect) {
            return;
        }

        let rect = projection.rect(self.rect);
        let radii = projection.radii(CornerRadii::uniform(self.corner_radius));
        surface.fill_rect(rect, self.fill_color(), radii);
        if self.border > 0.0 {
            surface.stroke_rect(rect, self.border_color, projection.stroke(self.border), radii);
        }

        if let Some(label) = &self.label {
            let style = self.label_style.scaled(projection.scale());
            surface.text(label, rect.center(), TextAlign::Center, &style);
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
