use std::any::Any;
use std::time::Duration;

use glam::Vec2;
use tracing::debug;

use super::{FrameContext, Widget};
use crate::camera::Camera;
use crate::draw::{
    Color, CornerRadii, Projection, Surface, TextAlign, TextMetrics, TextStyle, color,
};
use crate::geometry::Rect;
use crate::input::{Control, KeyRepeat};

/// Padding between the border and the text
const MARGIN: f32 = 5.0;

const DEFAULT_BLINK_PERIOD: Duration = Duration::from_millis(400);
const DEFAULT_REPEAT_THRESHOLD: Duration = Duration::from_millis(400);
const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy)]
enum Edit {
    Backspace,
    Delete,
    Left,
    Right,
}

const EDIT_KEYS: [(Control, Edit); 4] = [
    (Control::Backspace, Edit::Backspace),
    (Control::Delete, Edit::Delete),
    (Control::Left, Edit::Left),
    (Control::Right, Edit::Right),
];

/// Single-line text input
///
/// Clicking the box selects it and routes typed text into it. Clicking
/// elsewhere or pressing Return unselects it. Editing keys act once on press
/// and then repeat while held.
#[derive(Debug, Clone)]
pub struct TextBox {
    rect: Rect,
    min_width: f32,
    auto_size: bool,
    text: String,
    /// Caret position in chars
    caret: usize,
    placeholder: String,
    color: Color,
    placeholder_color: Color,
    border: f32,
    border_color: Color,
    corner_radius: f32,
    style: TextStyle,
    blink: Duration,
    blink_period: Duration,
    repeats: [KeyRepeat; 4],
    selected: bool,
    hovered: bool,
    visible: bool,
    changed: bool,
    text_changed: bool,
    clicked_outside: bool,
    size_changed: bool,
}

impl TextBox {
    /// Creates an empty box with its top-left corner at `position`
    pub fn new(position: Vec2, size: Vec2) -> Self {
        let repeat = KeyRepeat::new(DEFAULT_REPEAT_THRESHOLD, DEFAULT_REPEAT_INTERVAL);
        Self {
            rect: Rect::new(position, size),
            min_width: size.x,
            auto_size: false,
            text: String::new(),
            caret: 0,
            placeholder: "enter text".to_string(),
            color: color::WHITE,
            placeholder_color: color::WHITE,
            border: 2.0,
            border_color: color::BLACK,
            corner_radius: 0.0,
            style: TextStyle::new(20.0),
            blink: Duration::ZERO,
            blink_period: DEFAULT_BLINK_PERIOD,
            repeats: std::array::from_fn(|_| repeat.clone()),
            selected: false,
            hovered: false,
            visible: true,
            changed: true,
            text_changed: false,
            clicked_outside: false,
            size_changed: false,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self.caret = self.char_count();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Grows the box with its text, never below the initial width
    pub fn with_auto_size(mut self, auto_size: bool) -> Self {
        self.auto_size = auto_size;
        self
    }

    /// Background colors with and without text
    pub fn with_colors(mut self, filled: Color, empty: Color) -> Self {
        self.color = filled;
        self.placeholder_color = empty;
        self
    }

    pub fn with_text_style(mut self, style: TextStyle) -> Self {
        self.style = style;
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

    /// Builder method to set editing key repeat timing
    pub fn with_repeat(mut self, threshold: Duration, interval: Duration) -> Self {
        let repeat = KeyRepeat::new(threshold, interval);
        self.repeats = std::array::from_fn(|_| repeat.clone());
        self
    }

    pub fn with_blink_period(mut self, period: Duration) -> Self {
        assert!(!period.is_zero(), "caret blink period must be non-zero");
        self.blink_period = period;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text and moves the caret to its end
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.text_changed = true;
            self.changed = true;
        }
        self.caret = self.char_count();
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.char_count());
        self.changed = true;
    }

    /// Returns true if the box holds any text
    pub fn valid_input(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_position(&mut self, position: Vec2) {
        if position != self.rect.origin {
            self.rect.origin = position;
            self.changed = true;
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    /// Set on the frame a click landed outside the box
    pub fn clicked_outside(&self) -> bool {
        self.clicked_outside
    }

    /// Set on frames where the text was edited
    pub fn text_changed(&self) -> bool {
        self.text_changed
    }

    /// Set on frames where auto-sizing changed the width
    pub fn size_changed(&self) -> bool {
        self.size_changed
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.changed |= self.visible != visible;
        self.visible = visible;
    }

    /// Takes keyboard focus and moves the caret to the end
    pub fn select(&mut self) {
        debug!(text = %self.text, "Text box selected");
        self.selected = true;
        self.reset_focus();
    }

    /// Drops keyboard focus
    pub fn unselect(&mut self) {
        debug!(text = %self.text, "Text box unselected");
        self.selected = false;
        self.reset_focus();
    }

    /// Returns true while the blinking caret is in its visible phase
    pub fn caret_visible(&self) -> bool {
        self.selected && self.blink < self.blink_period
    }

    fn reset_focus(&mut self) {
        self.changed = true;
        self.caret = self.char_count();
        self.blink = Duration::ZERO;
        for repeat in &mut self.repeats {
            repeat.reset();
        }
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, caret: usize) -> usize {
        self.text
            .char_indices()
            .nth(caret)
            .map_or(self.text.len(), |(index, _)| index)
    }

    fn insert(&mut self, typed: &str) {
        let at = self.byte_index(self.caret);
        self.text.insert_str(at, typed);
        self.caret += typed.chars().count();
        self.text_changed = true;
        self.changed = true;
    }

    /// Applies one editing action; returns true if anything moved
    fn apply(&mut self, edit: Edit) -> bool {
        match edit {
            Edit::Backspace if self.caret > 0 => {
                self.caret -= 1;
                let at = self.byte_index(self.caret);
                self.text.remove(at);
                self.text_changed = true;
            }
            Edit::Delete if self.caret < self.char_count() => {
                let at = self.byte_index(self.caret);
                self.text.remove(at);
                self.text_changed = true;
            }
            Edit::Left if self.caret > 0 => self.caret -= 1,
            Edit::Right if self.caret < self.char_count() => self.caret += 1,
            _ => return false,
        }
        true
    }

    fn edit(&mut self, ctx: &FrameContext<'_>) {
        let mut held = false;
        let mut edited = false;
        for (slot, (control, edit)) in EDIT_KEYS.iter().enumerate() {
            let status = ctx.status(*control);
            held |= status.is_held();
            let count = self.repeats[slot].tick(status, ctx.delta);
            for _ in 0..count {
                edited |= self.apply(*edit);
            }
        }

        // The caret stays solid while an editing key is held
        if held {
            self.restart_blink();
        }
        if edited {
            self.changed = true;
        }
    }

    fn restart_blink(&mut self) {
        if !self.caret_visible() {
            self.changed = true;
        }
        self.blink = Duration::ZERO;
    }

    fn advance_blink(&mut self, delta: Duration) {
        let was_visible = self.caret_visible();
        let cycle = (self.blink_period * 2).as_nanos();
        let phase = (self.blink + delta).as_nanos() % cycle;
        self.blink = Duration::from_nanos(u64::try_from(phase).unwrap_or(0));
        if was_visible != self.caret_visible() {
            self.changed = true;
        }
    }

    fn fit_width(&mut self, metrics: &dyn TextMetrics) {
        let width = (metrics.measure(&self.text, &self.style).x + 2.0 * MARGIN).max(self.min_width);
        if width != self.rect.size.x {
            self.rect.size.x = width;
            self.size_changed = true;
            self.changed = true;
        }
    }

    fn background(&self) -> Color {
        if self.selected {
            color::WHITE
        } else if self.hovered {
            color::darker(self.placeholder_color, 0.8)
        } else if self.text.is_empty() {
            self.placeholder_color
        } else {
            self.color
        }
    }

    fn text_color(&self) -> Color {
        if self.hovered {
            color::change_value(color::desaturate(self.placeholder_color, 0.3), 0.3)
        } else {
            self.style.color
        }
    }

    fn placeholder_text_color(&self) -> Color {
        if self.hovered {
            self.text_color()
        } else {
            color::change_value(color::desaturate(self.style.color, 0.5), 0.4)
        }
    }

    /// Screen x of the text start relative to the box
    ///
    /// Text that does not fit scrolls so the caret stays inside the box.
    fn text_offset(&self, left_width: f32, right_width: f32, box_width: f32, margin: f32) -> f32 {
        let inner = box_width - 2.0 * margin;
        if left_width + right_width < inner || !self.selected {
            margin
        } else if right_width < inner {
            box_width - margin - right_width - 1.0 - left_width
        } else {
            margin - left_width
        }
    }
}

impl Widget for TextBox {
    fn update(&mut self, ctx: &FrameContext<'_>) {
        self.changed = false;
        self.text_changed = false;
        self.clicked_outside = false;
        self.size_changed = false;
        if !self.visible {
            return;
        }

        let hovered = self.rect.contains(ctx.pointer());
        if hovered != self.hovered {
            self.hovered = hovered;
            self.changed = true;
        }

        if ctx.click().is_pressed() {
            if hovered {
                if !self.selected {
                    self.select();
                }
            } else {
                self.clicked_outside = true;
                if self.selected {
                    self.unselect();
                }
            }
        }

        if !self.selected {
            return;
        }

        self.advance_blink(ctx.delta);

        let typed = ctx.input.text();
        if !typed.is_empty() {
            self.insert(typed);
            self.restart_blink();
        }

        self.edit(ctx);

        if ctx.status(Control::Return).is_pressed() {
            self.unselect();
        }

        if self.auto_size {
            self.fit_width(ctx.metrics);
        }
    }

    fn draw(&self, surface: &mut dyn Surface, camera: Option<&Camera>) {
        let projection = Projection::new(camera);
        if !self.visible || !projection.sees(self.rect) {
            return;
        }

        let rect = projection.rect(self.rect);
        let radii = projection.radii(CornerRadii::uniform(self.corner_radius));
        surface.fill_rect(rect, self.background(), radii);
        if self.border > 0.0 {
            surface.stroke_rect(rect, self.border_color, projection.stroke(self.border), radii);
        }

        let style = self.style.scaled(projection.scale());
        let margin = projection.length(MARGIN);
        let middle = rect.center().y;

        let caret_x = if self.text.is_empty() {
            let placeholder = style.clone().with_color(self.placeholder_text_color());
            let anchor = Vec2::new(rect.origin.x + margin, middle);
            surface.text(&self.placeholder, anchor, TextAlign::Left, &placeholder);
            anchor.x
        } else {
            let (left, right) = self.text.split_at(self.byte_index(self.caret));
            let metrics = surface.metrics();
            let left_width = metrics.measure(left, &style).x;
            let right_width = metrics.measure(right, &style).x;
            let start =
                rect.origin.x + self.text_offset(left_width, right_width, rect.size.x, margin);

            let style = style.clone().with_color(self.text_color());
            if !left.is_empty() {
                surface.text(left, Vec2::new(start, middle), TextAlign::Left, &style);
            }
            if !right.is_empty() {
                let anchor = Vec2::new(start + left_width + 1.0, middle);
                surface.text(right, anchor, TextAlign::Left, &style);
            }
            start + left_width
        };

        if self.caret_visible() {
            let half = style.size / 2.0;
            surface.line(
                Vec2::new(caret_x, middle - half),
                Vec2::new(caret_x, middle + half),
                self.style.color,
                1.0,
            );
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
