//! 2D camera mapping world space to screen space
//!
//! The transform is a translation plus a uniform scale:
//! `screen = (world - position) * scale`. World Y grows downwards, like
//! screen Y.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::geometry::Rect;
use crate::input::{Control, InputSnapshot};

/// Vertical pan applied per wheel notch in vertical-scroll mode, in pixels
const SCROLL_PAN_PIXELS: f32 = 20.0;

/// Optional world-space bounds for the visible area
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisLimits {
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
}

/// Camera settings loaded from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial world-to-screen scale
    pub scale: f32,
    /// Scale multiplier per wheel notch
    pub zoom_speed: f32,
    /// Mouse buttons (1 = left, 2 = wheel, 3 = right) that pan while held
    pub drag_buttons: Vec<u8>,
    /// Wheel pans vertically; zooming then needs the control modifier
    pub vertical_scroll: bool,
    /// Zoom around the pointer instead of the viewport center
    pub zoom_on_mouse: bool,
    pub min_scale: Option<f32>,
    pub max_scale: Option<f32>,
    pub limits: AxisLimits,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            zoom_speed: 2f32.powf(0.25),
            drag_buttons: vec![1],
            vertical_scroll: false,
            zoom_on_mouse: true,
            min_scale: None,
            max_scale: None,
            limits: AxisLimits::default(),
        }
    }
}

/// Camera defines a view into world space
#[derive(Debug, Clone)]
pub struct Camera {
    /// World point shown at the screen origin
    position: Vec2,
    scale: f32,
    resolution: Vec2,
    drag_buttons: Vec<Control>,
    limits: AxisLimits,
    min_scale: Option<f32>,
    max_scale: Option<f32>,
    zoom_speed: f32,
    vertical_scroll: bool,
    zoom_on_mouse: bool,
    changed: bool,
    size_changed: bool,
}

impl Camera {
    /// Creates a camera centered on the world origin at scale 1
    ///
    /// # Panics
    /// Panics if either resolution component is not positive.
    pub fn new(resolution: Vec2) -> Self {
        Self::from_config(resolution, &CameraConfig::default())
    }

    /// Creates a camera from configuration, centered on the world origin
    pub fn from_config(resolution: Vec2, config: &CameraConfig) -> Self {
        assert_resolution(resolution);
        assert!(config.scale > 0.0, "camera scale must be positive");
        assert!(config.zoom_speed > 0.0, "camera zoom speed must be positive");

        let mut camera = Self {
            position: -resolution / config.scale / 2.0,
            scale: config.scale,
            resolution,
            drag_buttons: config
                .drag_buttons
                .iter()
                .filter_map(|b| Control::from_mouse_button(*b))
                .collect(),
            limits: config.limits,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            zoom_speed: config.zoom_speed,
            vertical_scroll: config.vertical_scroll,
            zoom_on_mouse: config.zoom_on_mouse,
            changed: true,
            size_changed: false,
        };
        camera.clamp_to_limits();
        camera
    }

    /// Builder method to set the world point shown at the screen origin
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self.clamp_to_limits();
        self
    }

    /// Builder method to set the scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        assert!(scale > 0.0, "camera scale must be positive");
        self.scale = scale;
        self
    }

    /// Builder method to set the axis limits
    pub fn with_limits(mut self, limits: AxisLimits) -> Self {
        self.limits = limits;
        self.clamp_to_limits();
        self
    }

    /// Builder method to set the scale limits
    pub fn with_scale_limits(mut self, min: Option<f32>, max: Option<f32>) -> Self {
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    /// Builder method to set the mouse buttons that pan the view
    pub fn with_drag_buttons(mut self, buttons: &[Control]) -> Self {
        self.drag_buttons = buttons.iter().copied().filter(|c| c.is_mouse()).collect();
        self
    }

    /// Builder method to set the per-notch zoom multiplier
    pub fn with_zoom_speed(mut self, zoom_speed: f32) -> Self {
        assert!(zoom_speed > 0.0, "camera zoom speed must be positive");
        self.zoom_speed = zoom_speed;
        self
    }

    /// Builder method to make the wheel pan vertically
    pub fn with_vertical_scroll(mut self, enabled: bool) -> Self {
        self.vertical_scroll = enabled;
        self
    }

    /// Builder method to choose the zoom anchor
    pub fn with_zoom_on_mouse(mut self, enabled: bool) -> Self {
        self.zoom_on_mouse = enabled;
        self
    }

    /// Pans and zooms from this frame's input
    pub fn update(&mut self, input: &InputSnapshot) {
        self.changed = false;
        self.size_changed = false;

        if self
            .drag_buttons
            .iter()
            .any(|button| input.status(*button).is_down())
        {
            self.move_by(-input.mouse_delta() / self.scale);
        } else if input.scroll() != 0.0 {
            if self.vertical_scroll && !input.modifier_held() {
                self.move_by(Vec2::new(0.0, -SCROLL_PAN_PIXELS * input.scroll() / self.scale));
            } else {
                let center = if self.zoom_on_mouse {
                    input.mouse_position()
                } else {
                    self.resolution / 2.0
                };
                self.zoom(input.scroll(), center);
            }
        }
    }

    /// Moves the view by `delta` world units, clamped to the axis limits
    ///
    /// A zero delta is a no-op and leaves the change flags untouched.
    pub fn move_by(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.changed = true;
        self.position += delta;
        self.clamp_to_limits();
    }

    /// Zooms by `zoom_speed ^ level`, keeping the world point under the
    /// screen point `center` in place
    pub fn zoom(&mut self, level: f32, center: Vec2) {
        if level == 0.0 {
            return;
        }
        self.changed = true;
        self.size_changed = true;

        let factor = self.zoom_speed.powf(level);
        let target = self.scale * factor;

        if let Some(min) = self.min_scale
            && target < min
        {
            debug!(scale = min, "Camera zoom clamped to min");
            self.move_by(center / self.scale * (1.0 - self.scale / min));
            self.scale = min;
        } else if let Some(max) = self.max_scale
            && target > max
        {
            debug!(scale = max, "Camera zoom clamped to max");
            self.move_by(center / self.scale * (1.0 - self.scale / max));
            self.scale = max;
        } else {
            self.move_by(center / self.scale * (1.0 - 1.0 / factor));
            self.scale = target;
        }
        // The visible area changed size, so limits may need re-applying
        self.clamp_to_limits();
    }

    /// Changes the viewport resolution, keeping the world-space view center fixed
    pub fn resize(&mut self, resolution: Vec2) {
        assert_resolution(resolution);
        self.changed = false;
        self.size_changed = false;

        self.move_by((self.resolution - resolution) / self.scale / 2.0);
        self.size_changed = self.resolution != resolution;
        self.resolution = resolution;
        self.changed = true;
        self.clamp_to_limits();
    }

    fn clamp_to_limits(&mut self) {
        let view = self.resolution / self.scale;
        let before = self.position;

        if let Some(left) = self.limits.left
            && self.position.x < left
        {
            self.position.x = left;
        }
        if let Some(right) = self.limits.right
            && self.position.x + view.x > right
        {
            self.position.x = right - view.x;
        }
        if let Some(top) = self.limits.top
            && self.position.y < top
        {
            self.position.y = top;
        }
        if let Some(bottom) = self.limits.bottom
            && self.position.y + view.y > bottom
        {
            self.position.y = bottom - view.y;
        }

        if self.position != before {
            trace!(x = self.position.x, y = self.position.y, "Camera clamped to limits");
        }
    }

    /// Converts a screen point to world space
    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        point / self.scale + self.position
    }

    /// Converts a world point to screen space
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        (point - self.position) * self.scale
    }

    /// Converts a world rectangle to screen space
    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::new(self.world_to_screen(rect.origin), rect.size * self.scale)
    }

    /// World point at the top-left corner of the screen
    pub fn left_top(&self) -> Vec2 {
        self.screen_to_world(Vec2::ZERO)
    }

    /// World point at the bottom-right corner of the screen
    pub fn right_bottom(&self) -> Vec2 {
        self.screen_to_world(self.resolution)
    }

    /// Visible world rectangle
    pub fn visible_rect(&self) -> Rect {
        Rect::new(self.left_top(), self.size())
    }

    /// Size of the visible world area
    pub fn size(&self) -> Vec2 {
        self.resolution / self.scale
    }

    /// World point at the center of the screen
    pub fn center(&self) -> Vec2 {
        self.position + self.size() / 2.0
    }

    /// Moves the view so `center` is in the middle of the screen
    pub fn set_center(&mut self, center: Vec2) {
        self.move_by(center - self.center());
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.resolution.x / self.resolution.y
    }

    /// Returns true if the world point lies in the visible area
    pub fn sees_point(&self, point: Vec2) -> bool {
        self.visible_rect().contains(point)
    }

    /// Returns true if any part of the world rectangle may be visible
    pub fn sees_rect(&self, origin: Vec2, size: Vec2) -> bool {
        // Normalize negative sizes so callers can pass raw spans
        let rect = Rect::bounding(&[origin, origin + size]).unwrap_or_default();
        self.visible_rect().intersects(&rect)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn resolution(&self) -> Vec2 {
        self.resolution
    }

    pub fn limits(&self) -> AxisLimits {
        self.limits
    }

    /// Returns true if the transform changed this frame
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Returns true if the scale or viewport changed this frame
    pub fn size_changed(&self) -> bool {
        self.size_changed
    }
}

fn assert_resolution(resolution: Vec2) {
    assert!(
        resolution.x > 0.0 && resolution.y > 0.0,
        "camera resolution must be positive, got {resolution}"
    );
}
