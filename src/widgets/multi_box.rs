use std::any::Any;

use glam::Vec2;
use tracing::debug;

use super::{FrameContext, TextBox, Widget};
use crate::camera::Camera;
use crate::draw::Surface;
use crate::geometry::Rect;
use crate::input::Control;

/// Grid of text boxes with exactly one selected cell
///
/// Cells are addressed `(column, row)`. Tab moves to the next cell in
/// row-major order and Shift+Tab to the previous one; both stop at the ends
/// of the grid.
#[derive(Debug, Clone)]
pub struct MultiBox {
    /// `cells[column][row]`
    cells: Vec<Vec<TextBox>>,
    origin: Vec2,
    cell_size: Vec2,
    selected: (usize, usize),
    visible: bool,
}

impl MultiBox {
    /// Creates a `columns x rows` grid of empty boxes with its top-left corner
    /// at `origin`; the first cell starts selected
    ///
    /// # Panics
    /// Panics if the grid has no cells.
    pub fn new(origin: Vec2, cell_size: Vec2, (columns, rows): (usize, usize)) -> Self {
        Self::with_template(origin, cell_size, (columns, rows), &TextBox::new(origin, cell_size))
    }

    /// Creates the grid from a styled template box
    pub fn with_template(
        origin: Vec2,
        cell_size: Vec2,
        (columns, rows): (usize, usize),
        template: &TextBox,
    ) -> Self {
        assert!(columns > 0 && rows > 0, "multi box needs at least one cell");
        let cells = (0..columns)
            .map(|x| {
                (0..rows)
                    .map(|y| {
                        let mut cell = template.clone();
                        cell.set_position(origin + cell_size * Vec2::new(x as f32, y as f32));
                        cell
                    })
                    .collect()
            })
            .collect();

        let mut multi_box = Self {
            cells,
            origin,
            cell_size,
            selected: (0, 0),
            visible: true,
        };
        multi_box.select(0, 0);
        multi_box
    }

    /// Builder method to fill the cells, indexed `[column][row]`
    pub fn with_texts(mut self, texts: &[Vec<String>]) -> Self {
        for (column, line) in self.cells.iter_mut().zip(texts) {
            for (cell, text) in column.iter_mut().zip(line) {
                cell.set_text(text.as_str());
            }
        }
        self
    }

    /// `(columns, rows)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cells.len(), self.cells[0].len())
    }

    pub fn selected(&self) -> (usize, usize) {
        self.selected
    }

    /// Moves the selection to cell `(x, y)`
    ///
    /// # Panics
    /// Panics if the cell is outside the grid.
    pub fn select(&mut self, x: usize, y: usize) {
        let (columns, rows) = self.dimensions();
        assert!(x < columns && y < rows, "cell ({x}, {y}) outside the grid");
        for (cx, column) in self.cells.iter_mut().enumerate() {
            for (cy, cell) in column.iter_mut().enumerate() {
                if (cx, cy) != (x, y) && cell.is_selected() {
                    cell.unselect();
                }
            }
        }
        if !self.cells[x][y].is_selected() {
            self.cells[x][y].select();
        }
        self.selected = (x, y);
    }

    pub fn cell(&self, x: usize, y: usize) -> &TextBox {
        &self.cells[x][y]
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut TextBox {
        &mut self.cells[x][y]
    }

    pub fn text(&self, x: usize, y: usize) -> &str {
        self.cells[x][y].text()
    }

    /// Texts indexed `[column][row]`
    pub fn texts(&self) -> Vec<Vec<String>> {
        self.cells
            .iter()
            .map(|column| column.iter().map(|cell| cell.text().to_string()).collect())
            .collect()
    }

    /// Returns true if every cell holds text
    pub fn valid_input(&self) -> bool {
        self.cells.iter().flatten().all(TextBox::valid_input)
    }

    pub fn hit_box(&self) -> Rect {
        let (columns, rows) = self.dimensions();
        Rect::new(
            self.origin,
            self.cell_size * Vec2::new(columns as f32, rows as f32),
        )
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        for cell in self.cells.iter_mut().flatten() {
            cell.set_visible(visible);
        }
    }

    /// Keeps exactly one cell selected after the cells updated themselves
    fn settle_selection(&mut self) {
        let clicked = self
            .cells
            .iter()
            .enumerate()
            .flat_map(|(x, column)| column.iter().enumerate().map(move |(y, cell)| (x, y, cell)))
            .find(|(x, y, cell)| cell.is_selected() && (*x, *y) != self.selected)
            .map(|(x, y, _)| (x, y));

        let (x, y) = clicked.unwrap_or(self.selected);
        self.select(x, y);
    }

    fn tab(&mut self, backwards: bool) {
        let (columns, rows) = self.dimensions();
        let (x, y) = self.selected;
        let next = if backwards {
            match (x, y) {
                (0, 0) => None,
                (0, y) => Some((columns - 1, y - 1)),
                (x, y) => Some((x - 1, y)),
            }
        } else if (x, y) == (columns - 1, rows - 1) {
            None
        } else if x == columns - 1 {
            Some((0, y + 1))
        } else {
            Some((x + 1, y))
        };

        if let Some((x, y)) = next {
            debug!(x, y, "Multi box tab");
            self.select(x, y);
        }
    }
}

impl Widget for MultiBox {
    fn update(&mut self, ctx: &FrameContext<'_>) {
        // Hidden cells still clear their per-frame flags
        for cell in self.cells.iter_mut().flatten() {
            cell.update(ctx);
        }
        if !self.visible {
            return;
        }
        self.settle_selection();

        if ctx.status(Control::Tab).is_pressed() {
            self.tab(ctx.status(Control::Shift).is_held());
        }
    }

    fn draw(&self, surface: &mut dyn Surface, camera: Option<&Camera>) {
        if !self.visible {
            return;
        }
        for cell in self.cells.iter().flatten() {
            cell.draw(surface, camera);
        }
    }

    fn changed(&self) -> bool {
        self.cells.iter().flatten().any(TextBox::changed)
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
    use crate::input::{InputSnapshot, KeyCode, RawEvent};
    use crate::widgets::testing::{FRAME, step};

    fn grid() -> MultiBox {
        MultiBox::new(Vec2::ZERO, Vec2::new(100.0, 40.0), (3, 2))
    }

    fn selected_count(multi_box: &MultiBox) -> usize {
        multi_box
            .cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_selected())
            .count()
    }

    fn frame(multi_box: &mut MultiBox, input: &mut InputSnapshot, events: Vec<RawEvent>) {
        let pointer = input.mouse_position();
        step(input, events, pointer);
        multi_box.update(&FrameContext::new(input, FRAME, &MonospaceMetrics));
    }

    fn tab(multi_box: &mut MultiBox, input: &mut InputSnapshot) {
        frame(multi_box, input, vec![RawEvent::KeyDown(KeyCode::Tab)]);
        frame(multi_box, input, vec![RawEvent::KeyUp(KeyCode::Tab)]);
    }

    #[test]
    fn test_tab_walks_row_major_and_stops_at_the_end() {
        let mut multi_box = grid();
        let mut input = InputSnapshot::new();
        // Park the pointer away from the grid
        step(&mut input, vec![], Vec2::new(1000.0, 1000.0));

        let mut visited = vec![multi_box.selected()];
        for _ in 0..6 {
            tab(&mut multi_box, &mut input);
            visited.push(multi_box.selected());
            assert_eq!(selected_count(&multi_box), 1);
        }
        assert_eq!(
            visited,
            [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1), (2, 1)]
        );
    }

    #[test]
    fn test_shift_tab_walks_back_and_stops_at_origin() {
        let mut multi_box = grid();
        multi_box.select(0, 1);
        let mut input = InputSnapshot::new();
        step(&mut input, vec![], Vec2::new(1000.0, 1000.0));

        frame(&mut multi_box, &mut input, vec![RawEvent::KeyDown(KeyCode::ShiftLeft)]);
        tab(&mut multi_box, &mut input);
        assert_eq!(multi_box.selected(), (2, 0));
        tab(&mut multi_box, &mut input);
        tab(&mut multi_box, &mut input);
        assert_eq!(multi_box.selected(), (0, 0));
        tab(&mut multi_box, &mut input);
        assert_eq!(multi_box.selected(), (0, 0));
        assert_eq!(selected_count(&multi_box), 1);
    }

    #[test]
    fn test_clicking_a_cell_moves_the_selection() {
        let mut multi_box = grid();
        let mut input = InputSnapshot::new();
        step(&mut input, vec![RawEvent::MouseDown(1)], Vec2::new(150.0, 60.0));
        multi_box.update(&FrameContext::new(&input, FRAME, &MonospaceMetrics));
        assert_eq!(multi_box.selected(), (1, 1));
        assert_eq!(selected_count(&multi_box), 1);
        assert!(multi_box.changed());

        // Clicking outside the grid keeps the current cell
        step(&mut input, vec![RawEvent::MouseUp(1)], Vec2::new(1000.0, 0.0));
        multi_box.update(&FrameContext::new(&input, FRAME, &MonospaceMetrics));
        step(&mut input, vec![RawEvent::MouseDown(1)], Vec2::new(1000.0, 0.0));
        multi_box.update(&FrameContext::new(&input, FRAME, &MonospaceMetrics));
        assert_eq!(multi_box.selected(), (1, 1));
        assert_eq!(selected_count(&multi_box), 1);
    }

    #[test]
    fn test_typing_goes_to_selected_cell() {
        let mut multi_box = grid();
        let mut input = InputSnapshot::new();
        step(&mut input, vec![], Vec2::new(1000.0, 1000.0));
        frame(&mut multi_box, &mut input, vec![RawEvent::TextInput("a".into())]);
        tab(&mut multi_box, &mut input);
        frame(&mut multi_box, &mut input, vec![RawEvent::TextInput("b".into())]);

        assert_eq!(multi_box.text(0, 0), "a");
        assert_eq!(multi_box.text(1, 0), "b");
        assert!(!multi_box.valid_input());

        let filled = grid().with_texts(&vec![vec!["x".to_string(); 2]; 3]);
        assert!(filled.valid_input());
        assert_eq!(filled.texts()[2][1], "x");
    }
}
