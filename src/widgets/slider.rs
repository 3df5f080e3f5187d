use std::any::Any;

use glam::Vec2;
use tracing::debug;

use super::{FrameContext, PressState, Widget};
use crate::camera::Camera;
use crate::draw::{Color, CornerRadii, Projection, Surface, color};
use crate::geometry::Rect;

/// Extra grab distance around the track
const GRAB_MARGIN: f32 = 20.0;

/// Dot radius beyond half the track thickness
const DOT_EXTRA_RADIUS: f32 = 10.0;

/// Draggable value picker over a closed range
///
/// The slider lies along its longer side. Values snap to multiples of
/// `step` above the range minimum, rounding half away from zero; vertical
/// sliders grow upwards.
#[derive(Debug, Clone)]
pub struct Slider {
    /// Center of the track
    position: Vec2,
    size: Vec2,
    span: (f32, f32),
    step: f32,
    /// Dot position along the track in [0, 1]
    raw: f32,
    last_value: f32,
    color: Color,
    other_color: Color,
    dot_color: Color,
    border: f32,
    border_color: Color,
    press: PressState,
    visible: bool,
    changed: bool,
}

impl Slider {
    /// Creates a slider centered on `position`, starting at the range minimum
    ///
    /// # Panics
    /// Panics if the span is empty or `step` is not positive.
    pub fn new(position: Vec2, size: Vec2, span: (f32, f32), step: f32) -> Self {
        assert!(span.0 != span.1, "slider span must not be empty");
        assert!(step > 0.0, "slider step must be positive");
        let color = color::SKY_BLUE;
        Self {
            position,
            size,
            span,
            step,
            raw: 0.0,
            last_value: span.0,
            color,
            other_color: color::darker(color, 0.7),
            dot_color: color::LIGHT_GREY,
            border: 2.0,
            border_color: color::BLACK,
            press: PressState::default(),
            visible: true,
            changed: true,
        }
    }

    /// Builder method to set the initial value
    pub fn with_value(mut self, value: f32) -> Self {
        self.raw = self.raw_for(value);
        self.last_value = self.value();
        self
    }

    /// Builder method to set the filled and unfilled track colors
    pub fn with_colors(mut self, filled: Color, unfilled: Color) -> Self {
        self.color = filled;
        self.other_color = unfilled;
        self
    }

    pub fn with_dot_color(mut self, color: Color) -> Self {
        self.dot_color = color;
        self
    }

    pub fn with_border(mut self, width: f32, color: Color) -> Self {
        self.border = width;
        self.border_color = color;
        self
    }

    /// Snapped value
    pub fn value(&self) -> f32 {
        let (min, max) = self.span;
        min + (self.raw * (max - min) / self.step).round() * self.step
    }

    /// Moves the dot to `value`, clipped to the span and snapped
    ///
    /// Marks the slider changed only when the snapped value differs.
    pub fn set_value(&mut self, value: f32) {
        self.raw = self.raw_for(value);
        self.commit();
    }

    /// Moves the value by whole steps
    pub fn nudge(&mut self, steps: i32) {
        self.set_value(self.value() + steps as f32 * self.step);
    }

    /// Dot position along the track in [0, 1]
    pub fn raw(&self) -> f32 {
        self.raw
    }

    pub fn set_raw(&mut self, raw: f32) {
        self.raw = raw.clamp(0.0, 1.0);
        self.commit();
    }

    pub fn span(&self) -> (f32, f32) {
        self.span
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn is_held(&self) -> bool {
        self.press.is_held()
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.changed |= self.visible != visible;
        self.visible = visible;
    }

    /// Area that grabs the dot when clicked
    pub fn hit_box(&self) -> Rect {
        self.track().inflate(GRAB_MARGIN)
    }

    pub fn is_horizontal(&self) -> bool {
        self.size.x > self.size.y
    }

    /// Center of the dot
    pub fn dot_position(&self) -> Vec2 {
        let offset = (self.raw - 0.5) * self.length();
        if self.is_horizontal() {
            self.position + Vec2::new(offset, 0.0)
        } else {
            self.position - Vec2::new(0.0, offset)
        }
    }

    fn raw_for(&self, value: f32) -> f32 {
        let (min, max) = self.span;
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }

    fn commit(&mut self) {
        let value = self.value();
        if value != self.last_value {
            self.last_value = value;
            self.changed = true;
        }
    }

    fn track(&self) -> Rect {
        Rect::from_center(self.position, self.size)
    }

    fn length(&self) -> f32 {
        if self.is_horizontal() {
            self.size.x
        } else {
            self.size.y
        }
    }

    fn thickness(&self) -> f32 {
        if self.is_horizontal() {
            self.size.y
        } else {
            self.size.x
        }
    }

    fn radius(&self) -> f32 {
        (self.thickness() / 2.0).floor()
    }

    fn dot_radius(&self) -> f32 {
        DOT_EXTRA_RADIUS + self.radius()
    }

    /// Filled part, unfilled part and outline of the track
    fn track_parts(&self) -> (Rect, Rect, Rect) {
        let top_left = self.track().origin;
        let (length, thickness, radius) = (self.length(), self.thickness(), self.radius());
        let filled = self.raw * length;
        let unfilled = (1.0 - self.raw) * length;

        if self.is_horizontal() {
            (
                Rect::new(
                    top_left - Vec2::new(radius, 0.0),
                    Vec2::new(filled + radius, thickness),
                ),
                Rect::new(
                    top_left + Vec2::new(filled, 0.0),
                    Vec2::new(unfilled + radius, thickness),
                ),
                Rect::new(
                    top_left - Vec2::new(radius, 0.0),
                    Vec2::new(length + 2.0 * radius, thickness),
                ),
            )
        } else {
            (
                Rect::new(
                    top_left + Vec2::new(0.0, unfilled),
                    Vec2::new(thickness, filled + radius),
                ),
                Rect::new(
                    top_left - Vec2::new(0.0, radius),
                    Vec2::new(thickness, unfilled + radius),
                ),
                Rect::new(
                    top_left - Vec2::new(0.0, radius),
                    Vec2::new(thickness, length + 2.0 * radius),
                ),
            )
        }
    }
}

impl Widget for Slider {
    fn update(&mut self, ctx: &FrameContext<'_>) {
        self.changed = false;
        if !self.visible {
            return;
        }

        let pointer = ctx.pointer();
        if self.press.update(ctx.click(), self.hit_box().contains(pointer)) {
            debug!(status = ?self.press.status(), value = self.value(), "Slider edge");
            self.changed = true;
        }

        if self.press.is_held() {
            let relative = (pointer - self.track().origin) / self.length();
            let raw = if self.is_horizontal() {
                relative.x
            } else {
                1.0 - relative.y
            };
            self.set_raw(raw);
        }
    }

    fn draw(&self, surface: &mut dyn Surface, camera: Option<&Camera>) {
        let projection = Projection::new(camera);
        if !self.visible || !projection.sees(self.hit_box()) {
            return;
        }

        let (filled, unfilled, outline) = self.track_parts();
        let radii = projection.radii(CornerRadii::uniform(self.radius()));
        surface.fill_rect(projection.rect(filled), self.color, radii);
        surface.fill_rect(projection.rect(unfilled), self.other_color, radii);
        surface.stroke_rect(
            projection.rect(outline),
            self.border_color,
            projection.stroke(self.border),
            radii,
        );

        let dot_color = if self.press.is_held() {
            color::darker(self.dot_color, 0.7)
        } else {
            self.dot_color
        };
        let center = projection.point(self.dot_position());
        let radius = projection.length(self.dot_radius());
        surface.circle(center, radius, dot_color, 0.0);
        surface.circle(center, radius, self.border_color, projection.stroke(self.border));
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::MonospaceMetrics;
    use crate::input::{InputSnapshot, RawEvent};
    use crate::widgets::testing::{FRAME, step};

    fn slider() -> Slider {
        // Track spans x in [100, 200]
        Slider::new(Vec2::new(150.0, 50.0), Vec2::new(100.0, 10.0), (0.0, 10.0), 2.0)
    }

    #[test]
    fn test_snapping_rounds_half_away_from_zero() {
        let mut slider = slider();
        slider.set_raw(0.53);
        // 0.53 * 10 / 2 = 2.65 -> 3 steps
        assert_eq!(slider.value(), 6.0);
        slider.set_raw(0.5);
        // 2.5 steps rounds up
        assert_eq!(slider.value(), 6.0);
        slider.set_raw(0.49);
        assert_eq!(slider.value(), 4.0);
    }

    #[test]
    fn test_set_value_clips_and_is_idempotent() {
        let mut slider = slider();
        slider.set_value(42.0);
        assert_eq!(slider.value(), 10.0);
        assert_eq!(slider.raw(), 1.0);

        slider.update(&FrameContext::new(
            &InputSnapshot::new(),
            FRAME,
            &MonospaceMetrics,
        ));
        assert!(!slider.changed());
        slider.set_value(4.0);
        assert!(slider.changed());

        slider.update(&FrameContext::new(
            &InputSnapshot::new(),
            FRAME,
            &MonospaceMetrics,
        ));
        slider.set_value(4.0);
        assert!(!slider.changed());
        // Sub-step jitter keeps the snapped value
        slider.set_value(4.4);
        assert!(!slider.changed());

        slider.set_value(-3.0);
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn test_drag_follows_pointer_along_track() {
        let mut slider = slider();
        let mut input = InputSnapshot::new();
        step(&mut input, vec![RawEvent::MouseDown(1)], Vec2::new(153.0, 60.0));
        slider.update(&FrameContext::new(&input, FRAME, &MonospaceMetrics));
        assert!((slider.raw() - 0.53).abs() < 1e-4);
        assert_eq!(slider.value(), 6.0);
        assert!(slider.changed());

        // Dragging past the end clips
        step(&mut input, vec![], Vec2::new(400.0, 60.0));
        slider.update(&FrameContext::new(&input, FRAME, &MonospaceMetrics));
        assert_eq!(slider.value(), 10.0);

        step(&mut input, vec![RawEvent::MouseUp(1)], Vec2::new(120.0, 60.0));
        slider.update(&FrameContext::new(&input, FRAME, &MonospaceMetrics));
        assert!(!slider.is_held());
        assert_eq!(slider.value(), 10.0);
    }

    #[test]
    fn test_vertical_slider_grows_upwards() {
        // Track spans y in [0, 100]
        let mut slider = Slider::new(Vec2::new(50.0, 50.0), Vec2::new(10.0, 100.0), (0.0, 1.0), 0.1);
        let mut input = InputSnapshot::new();
        step(&mut input, vec![RawEvent::MouseDown(1)], Vec2::new(50.0, 20.0));
        slider.update(&FrameContext::new(&input, FRAME, &MonospaceMetrics));
        assert!((slider.value() - 0.8).abs() < 1e-4);
        assert!(slider.dot_position().y < 50.0);
    }

    #[test]
    fn test_nudge_moves_by_steps() {
        let mut slider = slider().with_value(4.0);
        slider.nudge(2);
        assert_eq!(slider.value(), 8.0);
        slider.nudge(5);
        assert_eq!(slider.value(), 10.0);
    }

    #[test]
    #[should_panic(expected = "slider span must not be empty")]
    fn test_empty_span_panics() {
        Slider::new(Vec2::ZERO, Vec2::new(10.0, 1.0), (3.0, 3.0), 1.0);
    }
}
