//! World-space drawing through a camera

use glam::Vec2;

use super::{Color, CornerRadii, Surface, TextAlign, TextStyle, color};
use crate::camera::Camera;
use crate::geometry::Rect;

/// Stroke width in pixels for a world-space width at `scale`
///
/// Rounds up so thin strokes never vanish when zoomed out.
pub fn scaled_width(width: f32, scale: f32) -> f32 {
    (width * scale + 0.99).trunc()
}

/// Maps widget geometry to the screen, optionally through a camera
///
/// Without a camera coordinates are already screen pixels and nothing is
/// culled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Projection<'a> {
    camera: Option<&'a Camera>,
}

impl<'a> Projection<'a> {
    pub fn new(camera: Option<&'a Camera>) -> Self {
        Self { camera }
    }

    pub fn scale(&self) -> f32 {
        self.camera.map_or(1.0, Camera::scale)
    }

    pub fn point(&self, point: Vec2) -> Vec2 {
        self.camera.map_or(point, |camera| camera.world_to_screen(point))
    }

    pub fn length(&self, length: f32) -> f32 {
        length * self.scale()
    }

    /// Stroke width in pixels
    pub fn stroke(&self, width: f32) -> f32 {
        match self.camera {
            Some(camera) => scaled_width(width, camera.scale()),
            None => width,
        }
    }

    pub fn rect(&self, rect: Rect) -> Rect {
        self.camera.map_or(rect, |camera| camera.rect_to_screen(rect))
    }

    pub fn radii(&self, radii: CornerRadii) -> CornerRadii {
        radii.map(|r| self.stroke(r))
    }

    /// Returns false when `rect` is guaranteed off screen
    pub fn sees(&self, rect: Rect) -> bool {
        self.camera
            .is_none_or(|camera| camera.sees_rect(rect.origin, rect.size))
    }
}

/// Draws a world-space rectangle; a width of zero fills it
pub fn draw_rect(
    surface: &mut dyn Surface,
    camera: &Camera,
    color: Color,
    position: Vec2,
    size: Vec2,
    width: f32,
    radii: CornerRadii,
) {
    if !camera.sees_rect(position, size) {
        return;
    }
    let projection = Projection::new(Some(camera));
    let rect = camera.rect_to_screen(Rect::new(position, size));
    let radii = projection.radii(radii);
    if width > 0.0 {
        surface.stroke_rect(rect, color, projection.stroke(width), radii);
    } else {
        surface.fill_rect(rect, color, radii);
    }
}

/// Draws a world-space circle; a width of zero fills it
pub fn draw_circle(
    surface: &mut dyn Surface,
    camera: &Camera,
    color: Color,
    center: Vec2,
    radius: f32,
    width: f32,
) {
    if camera.sees_rect(center - Vec2::splat(radius), Vec2::splat(radius * 2.0)) {
        surface.circle(
            camera.world_to_screen(center),
            radius * camera.scale(),
            color,
            if width > 0.0 {
                scaled_width(width, camera.scale())
            } else {
                0.0
            },
        );
    }
}

/// Draws a world-space polygon; a width of zero fills it
pub fn draw_poly(
    surface: &mut dyn Surface,
    camera: &Camera,
    color: Color,
    vertices: &[Vec2],
    width: f32,
) {
    let Some(bounds) = Rect::bounding(vertices) else {
        return;
    };
    if !camera.sees_rect(bounds.origin, bounds.size) {
        return;
    }
    let points: Vec<Vec2> = vertices.iter().map(|v| camera.world_to_screen(*v)).collect();
    let width = if width > 0.0 {
        scaled_width(width, camera.scale())
    } else {
        0.0
    };
    surface.polygon(&points, color, width);
}

/// Draws a world-space line segment
pub fn draw_line(
    surface: &mut dyn Surface,
    camera: &Camera,
    color: Color,
    from: Vec2,
    to: Vec2,
    width: f32,
) {
    let min = from.min(to);
    if camera.sees_rect(min, from.max(to) - min) {
        surface.line(
            camera.world_to_screen(from),
            camera.world_to_screen(to),
            color,
            scaled_width(width, camera.scale()),
        );
    }
}

/// Draws text anchored at a world position, scaled with the camera
pub fn draw_text(
    surface: &mut dyn Surface,
    camera: &Camera,
    text: &str,
    position: Vec2,
    align: TextAlign,
    style: &TextStyle,
) {
    let style = style.scaled(camera.scale());
    let anchor = camera.world_to_screen(position);
    let size = surface.metrics().measure(text, &style);
    let top_left = align.top_left(anchor, size);
    if camera.sees_rect(camera.screen_to_world(top_left), size / camera.scale()) {
        surface.text(text, anchor, align, &style);
    }
}

/// Draws an arrow from `from` to `to` in screen space
///
/// With `shaft` unset the arrow scales with its length. Otherwise the shaft
/// is `shaft` pixels wide with a head five times as long; arrows shorter
/// than the shaft width collapse to a dot.
pub fn draw_arrow(
    surface: &mut dyn Surface,
    color: Color,
    from: Vec2,
    to: Vec2,
    width: f32,
    shaft: Option<f32>,
) {
    let delta = to - from;
    let length = delta.length();
    // Rotation taking local +Y onto the arrow direction
    let direction = delta.normalize_or_zero();
    let rotation = Vec2::new(direction.y, -direction.x);

    let local: Vec<Vec2> = match shaft {
        None => [
            (-0.1, 0.8),
            (-0.02, 0.8),
            (-0.02, 0.0),
            (0.02, 0.0),
            (0.02, 0.8),
            (0.1, 0.8),
            (0.0, 1.0),
        ]
        .into_iter()
        .map(|(x, y)| Vec2::new(x, y) * length)
        .collect(),
        Some(shaft) if length < shaft => {
            surface.circle(from, shaft, color, width);
            return;
        }
        Some(shaft) => {
            let neck = length - shaft * 5.0;
            let mut points = vec![
                Vec2::new(shaft * 2.5, neck),
                Vec2::new(0.0, length),
                Vec2::new(-shaft * 2.5, neck),
            ];
            if neck > 0.0 {
                points.extend([
                    Vec2::new(-shaft / 2.0, neck),
                    Vec2::new(-shaft / 2.0, 0.0),
                    Vec2::new(shaft / 2.0, 0.0),
                    Vec2::new(shaft / 2.0, neck),
                ]);
            }
            points
        }
    };

    let points: Vec<Vec2> = local.into_iter().map(|p| from + rotation.rotate(p)).collect();
    surface.polygon(&points, color, width);
}

/// Draws world grid lines every `spacing` units over the visible area
///
/// Every fifth line is drawn thicker.
pub fn draw_grid(
    surface: &mut dyn Surface,
    camera: &Camera,
    line_color: Option<Color>,
    spacing: f32,
) {
    assert!(spacing > 0.0, "grid spacing must be positive");
    let line_color = line_color.unwrap_or_else(|| color::darker(color::SKY_BLUE, 0.9));
    let (left_top, right_bottom) = (camera.left_top(), camera.right_bottom());

    let first = (left_top / spacing).trunc();
    let last = (right_bottom / spacing).trunc() + Vec2::ONE;
    let width = |index: i64| if index % 5 == 0 { 4.0 } else { 1.2 };

    for row in (first.y as i64)..(last.y as i64) {
        let y = row as f32 * spacing;
        draw_line(
            surface,
            camera,
            line_color,
            Vec2::new(left_top.x, y),
            Vec2::new(right_bottom.x, y),
            width(row),
        );
    }
    for column in (first.x as i64)..(last.x as i64) {
        let x = column as f32 * spacing;
        draw_line(
            surface,
            camera,
            line_color,
            Vec2::new(x, right_bottom.y),
            Vec2::new(x, left_top.y),
            width(column),
        );
    }
}
