//! Drawing surface abstraction
//!
//! Widgets and helpers emit screen-space primitives into a [`Surface`].
//! Rasterisation (and font loading) lives behind the trait, so the same
//! widget code can target a GPU backend or the recording [`DrawList`].
//!
//! The `draw_*` helpers in [`world`] take world-space coordinates, map them
//! through a [`Camera`](crate::camera::Camera) and skip anything outside
//! the visible area.

pub mod color;
mod list;
mod metrics;
mod world;

use glam::Vec2;

use crate::geometry::Rect;

pub use color::Color;
pub use list::{DrawCommand, DrawList};
pub use metrics::MonospaceMetrics;
pub use world::{
    Projection, draw_arrow, draw_circle, draw_grid, draw_line, draw_poly, draw_rect, draw_text,
    scaled_width,
};

/// Horizontal placement of text relative to its anchor
///
/// The anchor is always vertically centred on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    /// Top-left corner of a text box of `size` placed at `anchor`
    pub fn top_left(self, anchor: Vec2, size: Vec2) -> Vec2 {
        let x = match self {
            TextAlign::Left => anchor.x,
            TextAlign::Center => anchor.x - size.x / 2.0,
            TextAlign::Right => anchor.x - size.x,
        };
        Vec2::new(x, anchor.y - size.y / 2.0)
    }
}

/// Font selection for a run of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    pub color: Color,
    /// Font family name, resolved by the surface
    pub font: String,
    pub bold: bool,
    pub italic: bool,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Same style at `size * scale`
    pub fn scaled(&self, scale: f32) -> Self {
        Self {
            size: self.size * scale,
            ..self.clone()
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 20.0,
            color: color::BLACK,
            font: "arial".to_string(),
            bold: false,
            italic: false,
        }
    }
}

/// Per-corner rounding radii for rectangles
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_left: f32,
    pub bottom_right: f32,
}

impl CornerRadii {
    pub const NONE: Self = Self::uniform(0.0);

    pub const fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_left: radius,
            bottom_right: radius,
        }
    }

    /// Applies `f` to every corner
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            top_left: f(self.top_left),
            top_right: f(self.top_right),
            bottom_left: f(self.bottom_left),
            bottom_right: f(self.bottom_right),
        }
    }
}

/// Measures rendered text
pub trait TextMetrics {
    /// Size in pixels of `text` rendered as a single line
    fn measure(&self, text: &str, style: &TextStyle) -> Vec2;

    /// Height of one line of text
    fn line_height(&self, style: &TextStyle) -> f32;
}

/// Screen-space drawing target
///
/// Widths are stroke widths in pixels. For circles and polygons a width of
/// zero means filled.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color, radii: CornerRadii);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32, radii: CornerRadii);

    fn circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32);

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);

    fn polygon(&mut self, points: &[Vec2], color: Color, width: f32);

    /// Draws a single line of text aligned on `anchor`
    fn text(&mut self, text: &str, anchor: Vec2, align: TextAlign, style: &TextStyle);

    /// Metrics matching the fonts this surface renders with
    fn metrics(&self) -> &dyn TextMetrics;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_places_box_around_anchor() {
        let anchor = Vec2::new(100.0, 50.0);
        let size = Vec2::new(40.0, 20.0);
        assert_eq!(TextAlign::Left.top_left(anchor, size), Vec2::new(100.0, 40.0));
        assert_eq!(TextAlign::Center.top_left(anchor, size), Vec2::new(80.0, 40.0));
        assert_eq!(TextAlign::Right.top_left(anchor, size), Vec2::new(60.0, 40.0));
    }
}
