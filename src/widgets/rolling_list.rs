use std::any::Any;
use std::time::Duration;

use glam::Vec2;
use tracing::{debug, info};

use super::{FrameContext, Widget};
use crate::camera::Camera;
use crate::draw::{
    Color, CornerRadii, Projection, Surface, TextAlign, TextMetrics, TextStyle, color,
};
use crate::fuzzy::FuzzyFilter;
use crate::geometry::Rect;
use crate::input::{Control, KeyRepeat, KeyStatus};

const SLIDER_WIDTH: f32 = 12.0;
const MARGIN: f32 = 5.0;
/// Scroll distance per wheel notch, in pixels
const WHEEL_STEP: f32 = 5.0;
/// Rows kept between the selection and the view edges while navigating
const SCROLL_MARGIN_ROWS: f32 = 1.4;

const DEFAULT_REPEAT_THRESHOLD: Duration = Duration::from_millis(300);
const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_millis(100);

/// Scrollable, searchable single-select list
///
/// Rows can be picked with the pointer or the arrow keys. Clicking the row
/// that is already selected raises [`RollingList::confirm_selection`] for
/// that frame.
#[derive(Debug, Clone)]
pub struct RollingList {
    /// Top-left corner
    position: Vec2,
    /// Width fits the widest word plus the scroll bar
    size: Vec2,
    base_words: Vec<String>,
    words: Vec<String>,
    line_height: f32,
    style: TextStyle,
    color: Color,
    slider_color: Color,
    border: f32,
    border_color: Color,
    corner_radius: f32,
    selected: Option<usize>,
    hovered: Option<usize>,
    /// Scroll offset in pixels, within `[0, course]`
    slider_position: f32,
    slider_selected: bool,
    slider_hovered: bool,
    down_repeat: KeyRepeat,
    up_repeat: KeyRepeat,
    clicked_outside: bool,
    confirm_selection: bool,
    visible: bool,
    changed: bool,
}

impl RollingList {
    /// Creates a list of `height` pixels showing every word
    pub fn new(
        position: Vec2,
        height: f32,
        words: Vec<String>,
        style: TextStyle,
        metrics: &dyn TextMetrics,
    ) -> Self {
        let widest = words
            .iter()
            .map(|word| metrics.measure(word, &style).x)
            .fold(0.0, f32::max);
        let color = color::WHITE;
        Self {
            position,
            size: Vec2::new(widest + SLIDER_WIDTH + 3.0 * MARGIN, height),
            words: words.clone(),
            base_words: words,
            line_height: metrics.line_height(&style),
            style,
            color,
            slider_color: color::darker(color, 0.7),
            border: 1.0,
            border_color: color::BLACK,
            corner_radius: 0.0,
            selected: None,
            hovered: None,
            slider_position: 0.0,
            slider_selected: false,
            slider_hovered: false,
            down_repeat: KeyRepeat::new(DEFAULT_REPEAT_THRESHOLD, DEFAULT_REPEAT_INTERVAL),
            up_repeat: KeyRepeat::new(DEFAULT_REPEAT_THRESHOLD, DEFAULT_REPEAT_INTERVAL),
            clicked_outside: false,
            confirm_selection: false,
            visible: true,
            changed: true,
        }
    }

    pub fn with_colors(mut self, background: Color, slider: Color) -> Self {
        self.color = background;
        self.slider_color = slider;
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

    /// Builder method to set arrow key repeat timing
    pub fn with_repeat(mut self, threshold: Duration, interval: Duration) -> Self {
        self.down_repeat = KeyRepeat::new(threshold, interval);
        self.up_repeat = KeyRepeat::new(threshold, interval);
        self
    }

    /// Re-filters the shown words against `query`
    ///
    /// Clears the selection and scrolls back to the top.
    pub fn update_words(&mut self, query: &str, filter: &dyn FuzzyFilter) {
        self.words = filter
            .filter(&self.base_words, query)
            .into_iter()
            .map(str::to_string)
            .collect();
        debug!(query, shown = self.words.len(), "Rolling list filtered");
        self.selected = None;
        self.hovered = None;
        self.slider_position = 0.0;
        self.slider_selected = false;
        self.changed = true;
    }

    /// Words currently shown
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selected.map(|index| self.words[index].as_str())
    }

    /// Scroll offset in pixels
    pub fn slider_position(&self) -> f32 {
        self.slider_position
    }

    /// Set on the frame the selected row was clicked again
    pub fn confirm_selection(&self) -> bool {
        self.confirm_selection
    }

    /// Set on the frame a click landed outside the list
    pub fn clicked_outside(&self) -> bool {
        self.clicked_outside
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.changed |= self.visible != visible;
        self.visible = visible;
    }

    /// Height of all rows
    pub fn content_height(&self) -> f32 {
        self.words.len() as f32 * self.line_height
    }

    /// Largest valid scroll offset
    pub fn course(&self) -> f32 {
        (self.content_height() - self.size.y).max(0.0)
    }

    /// Visible box, shrunk to the content when it is shorter than the list
    fn view(&self) -> Rect {
        Rect::new(
            self.position,
            Vec2::new(self.size.x, self.content_height().min(self.size.y)),
        )
    }

    /// Width of the word column
    fn text_width(&self) -> f32 {
        self.size.x - 2.0 * MARGIN - SLIDER_WIDTH
    }

    fn track_length(&self) -> f32 {
        self.view().size.y - 2.0 * MARGIN
    }

    fn thumb_height(&self) -> f32 {
        (self.track_length() - self.course()).max(2.0 * MARGIN)
    }

    /// Thumb offset from the top of the track
    fn thumb_offset(&self) -> f32 {
        let course = self.course();
        if course > 0.0 {
            self.slider_position / course * (self.track_length() - self.thumb_height())
        } else {
            0.0
        }
    }

    fn scroll_to(&mut self, position: f32) {
        self.slider_position = position.clamp(0.0, self.course());
    }

    /// Row under a point relative to the top-left corner
    fn row_at(&self, local: Vec2) -> Option<usize> {
        let view = self.view().size;
        let inside = 0.0 < local.x
            && local.x < view.x - SLIDER_WIDTH - MARGIN
            && 0.0 < local.y
            && local.y < view.y;
        if !inside {
            return None;
        }
        let row = ((local.y + self.slider_position) / self.line_height).floor() as usize;
        (row < self.words.len()).then_some(row)
    }

    /// Scrolls so `row` sits at least the margin away from the view edges
    fn reveal(&mut self, row: usize) {
        let top = (row as f32 - SCROLL_MARGIN_ROWS) * self.line_height;
        let bottom = (row as f32 + 1.0 + SCROLL_MARGIN_ROWS) * self.line_height;
        if bottom > self.slider_position + self.size.y {
            self.scroll_to(bottom - self.size.y);
        } else if top < self.slider_position {
            self.scroll_to(top);
        }
    }

    fn navigate(&mut self, down: KeyStatus, up: KeyStatus, delta: Duration) {
        let steps_down = self.down_repeat.tick(down, delta);
        let steps_up = self.up_repeat.tick(up, delta);
        let last = self.words.len() - 1;

        let Some(selected) = self.selected else {
            if down.is_pressed() {
                self.selected = Some(0);
                self.scroll_to(0.0);
                self.changed = true;
            } else if up.is_pressed() {
                self.selected = Some(last);
                self.scroll_to(self.course());
                self.changed = true;
            }
            return;
        };

        let target = if down.is_pressed() {
            // Single steps wrap around
            Some(if selected == last { 0 } else { selected + 1 })
        } else if up.is_pressed() {
            Some(if selected == 0 { last } else { selected - 1 })
        } else if steps_down > 0 {
            // Repeats stop at the ends
            Some((selected + steps_down as usize).min(last))
        } else if steps_up > 0 {
            Some(selected.saturating_sub(steps_up as usize))
        } else {
            None
        };

        if let Some(target) = target
            && target != selected
        {
            self.selected = Some(target);
            self.reveal(target);
            self.changed = true;
        }
    }
}

impl Widget for RollingList {
    fn update(&mut self, ctx: &FrameContext<'_>) {
        self.changed = false;
        self.clicked_outside = false;
        self.confirm_selection = false;
        if !self.visible || self.words.is_empty() {
            return;
        }

        self.navigate(
            ctx.status(Control::Down),
            ctx.status(Control::Up),
            ctx.delta,
        );

        let local = ctx.pointer() - self.position;
        let view = self.view().size;

        let hovered = self.row_at(local);
        if hovered != self.hovered {
            self.hovered = hovered;
            self.changed = true;
        }

        let slider_hovered = 0.0 < view.x - local.x
            && view.x - local.x < SLIDER_WIDTH + MARGIN
            && 0.0 < local.y
            && local.y < view.y;
        if slider_hovered != self.slider_hovered {
            self.slider_hovered = slider_hovered;
            self.changed = true;
        }

        let click = ctx.click();
        if self.slider_selected {
            let dy = ctx.pointer_delta().y;
            let free = self.track_length() - self.thumb_height();
            if dy != 0.0 && free > 0.0 {
                self.scroll_to(self.slider_position + dy * self.course() / free);
                self.changed = true;
            }
            if click.is_released() {
                self.slider_selected = false;
                self.changed = true;
            }
        }

        let inside = 0.0 < local.x && local.x < view.x && 0.0 < local.y && local.y < view.y;
        if !inside {
            if click.is_pressed() {
                self.clicked_outside = true;
                if self.selected.take().is_some() {
                    self.changed = true;
                }
            }
            return;
        }

        if click.is_pressed() {
            if let Some(row) = self.hovered {
                if self.selected == Some(row) {
                    info!(word = %self.words[row], "Rolling list selection confirmed");
                    self.confirm_selection = true;
                }
                self.selected = Some(row);
            } else {
                // Jump the thumb under the pointer and start dragging it
                let thumb = self.thumb_height();
                let free = (self.track_length() - thumb).max(f32::EPSILON);
                self.scroll_to((local.y - MARGIN - thumb / 2.0) / free * self.course());
                self.slider_selected = true;
            }
            self.changed = true;
        }

        let scroll = ctx.input.scroll();
        if scroll != 0.0 && self.content_height() > self.size.y {
            self.scroll_to(self.slider_position - scroll * WHEEL_STEP);
            self.changed = true;
        }
    }

    fn draw(&self, surface: &mut dyn Surface, camera: Option<&Camera>) {
        let projection = Projection::new(camera);
        let view = self.view();
        if !self.visible || self.words.is_empty() || !projection.sees(view) {
            return;
        }

        let radii = projection.radii(CornerRadii::uniform(self.corner_radius));
        surface.fill_rect(projection.rect(view), self.color, radii);

        let text_width = self.text_width();
        let row_rect = |row: usize| {
            Rect::new(
                view.origin
                    + Vec2::new(1.0, row as f32 * self.line_height - self.slider_position),
                Vec2::new(text_width, self.line_height),
            )
        };

        if let Some(row) = self.hovered {
            surface.fill_rect(
                projection.rect(row_rect(row)),
                color::darker(self.color, 0.9),
                CornerRadii::NONE,
            );
        }
        if let Some(row) = self.selected {
            let factor = if self.hovered == Some(row) { 0.7 * 0.9 } else { 0.7 };
            surface.fill_rect(
                projection.rect(row_rect(row)),
                color::darker(self.color, factor),
                CornerRadii::NONE,
            );
        }

        surface.stroke_rect(
            projection.rect(view),
            self.border_color,
            projection.stroke(self.border),
            radii,
        );

        let style = self.style.scaled(projection.scale());
        for (row, word) in self.words.iter().enumerate() {
            let top = row as f32 * self.line_height - self.slider_position;
            if top + self.line_height <= 0.0 || top >= view.size.y {
                continue;
            }
            let left = view.origin + Vec2::new(0.0, top);
            if top > 0.0 {
                surface.line(
                    projection.point(left),
                    projection.point(left + Vec2::new(text_width, 0.0)),
                    self.style.color,
                    projection.stroke(1.0),
                );
            }
            let anchor = left + Vec2::new(MARGIN, self.line_height / 2.0);
            surface.text(word, projection.point(anchor), TextAlign::Left, &style);
        }

        let mut thumb_color = if self.slider_hovered {
            color::darker(self.slider_color, 0.9)
        } else {
            self.slider_color
        };
        if self.slider_selected {
            thumb_color = color::darker(thumb_color, 0.7);
        }
        let thumb = projection.rect(Rect::new(
            view.origin + Vec2::new(text_width + MARGIN, MARGIN + self.thumb_offset()),
            Vec2::new(SLIDER_WIDTH, self.thumb_height()),
        ));
        surface.fill_rect(thumb, thumb_color, radii);
        surface.stroke_rect(thumb, color::BLACK, projection.stroke(1.0), radii);
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
