//! Recording surface
//!
//! Stores every primitive as a [`DrawCommand`] so a frame can be inspected,
//! replayed onto another surface, or asserted against in tests.

use glam::Vec2;

use super::{Color, CornerRadii, MonospaceMetrics, Surface, TextAlign, TextMetrics, TextStyle};
use crate::geometry::Rect;

/// One recorded primitive, in screen space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
        radii: CornerRadii,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
        radii: CornerRadii,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        width: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Color,
        width: f32,
    },
    Text {
        text: String,
        anchor: Vec2,
        align: TextAlign,
        style: TextStyle,
    },
}

impl DrawCommand {
    /// Short name of the primitive, for logs and debugging
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::FillRect { .. } => "fill_rect",
            DrawCommand::StrokeRect { .. } => "stroke_rect",
            DrawCommand::Circle { .. } => "circle",
            DrawCommand::Line { .. } => "line",
            DrawCommand::Polygon { .. } => "polygon",
            DrawCommand::Text { .. } => "text",
        }
    }

    /// Replays this command onto another surface
    pub fn replay(&self, surface: &mut dyn Surface) {
        match self {
            DrawCommand::FillRect { rect, color, radii } => surface.fill_rect(*rect, *color, *radii),
            DrawCommand::StrokeRect {
                rect,
                color,
                width,
                radii,
            } => surface.stroke_rect(*rect, *color, *width, *radii),
            DrawCommand::Circle {
                center,
                radius,
                color,
                width,
            } => surface.circle(*center, *radius, *color, *width),
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => surface.line(*from, *to, *color, *width),
            DrawCommand::Polygon {
                points,
                color,
                width,
            } => surface.polygon(points, *color, *width),
            DrawCommand::Text {
                text,
                anchor,
                align,
                style,
            } => surface.text(text, *anchor, *align, style),
        }
    }
}

/// Surface that records commands instead of rasterising them
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    metrics: MonospaceMetrics,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drops the recorded frame
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Texts of every recorded text command, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Replays the whole frame onto another surface
    pub fn replay(&self, surface: &mut dyn Surface) {
        for command in &self.commands {
            command.replay(surface);
        }
    }
}

impl Surface for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Color, radii: CornerRadii) {
        self.commands.push(DrawCommand::FillRect { rect, color, radii });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32, radii: CornerRadii) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            width,
            radii,
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            width,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn polygon(&mut self, points: &[Vec2], color: Color, width: f32) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn text(&mut self, text: &str, anchor: Vec2, align: TextAlign, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            align,
            style: style.clone(),
        });
    }

    fn metrics(&self) -> &dyn TextMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color;

    #[test]
    fn test_records_in_order_and_replays() {
        let mut list = DrawList::new();
        list.fill_rect(
            Rect::new(Vec2::ZERO, Vec2::ONE),
            color::WHITE,
            CornerRadii::NONE,
        );
        list.text("hi", Vec2::ZERO, TextAlign::Left, &TextStyle::default());
        list.line(Vec2::ZERO, Vec2::ONE, color::BLACK, 1.0);

        let kinds: Vec<_> = list.commands().iter().map(DrawCommand::kind).collect();
        assert_eq!(kinds, ["fill_rect", "text", "line"]);
        assert_eq!(list.texts().collect::<Vec<_>>(), ["hi"]);

        let mut copy = DrawList::new();
        list.replay(&mut copy);
        assert_eq!(copy.commands(), list.commands());

        list.clear();
        assert!(list.is_empty());
    }
}
