//! Row/column flow layout.
//!
//! A `Layout` is the cursor for one container body or one nested column.
//! The caller declares a row of cell widths, then each `next` call hands out
//! the following cell. Running off the end of the declared widths wraps to a
//! new row with the same widths and height.

use crate::primitives::{Point, Rect, Size};
use crate::style::Style;

/// A caller-supplied override for the next cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NextCell {
    /// Relative to the body origin; advances the cursor like a normal cell.
    Relative(Rect),
    /// Screen coordinates; the cursor does not move.
    Absolute(Rect),
}

/// Cursor state for one level of layout nesting.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Body rectangle with the container's scroll offset already applied.
    pub body: Rect,
    /// Cursor position relative to `body`.
    pub position: Point,
    /// Fallback cell size when a row declares no widths.
    pub size: Size,
    /// Furthest right/bottom edge reached, in screen coordinates.
    pub max: Point,
    widths: Vec<f32>,
    item_index: usize,
    next_row: f32,
    next: Option<NextCell>,
    pub indent: f32,
}

impl Layout {
    pub fn new(body: Rect, scroll: Point) -> Self {
        let mut layout = Self {
            body: Rect::new(body.x - scroll.x, body.y - scroll.y, body.width, body.height),
            position: Point::ORIGIN,
            size: Size::ZERO,
            max: Point::new(-16_777_216.0, -16_777_216.0),
            widths: Vec::new(),
            item_index: 0,
            next_row: 0.0,
            next: None,
            indent: 0.0,
        };
        layout.row(Some(&[0.0]), 0.0);
        layout
    }

    /// Start a new row. `None` keeps the previous row's widths.
    pub fn row(&mut self, widths: Option<&[f32]>, height: f32) {
        if let Some(widths) = widths {
            self.widths.clear();
            self.widths.extend_from_slice(widths);
        }
        self.position = Point::new(self.indent, self.next_row);
        self.size.height = height;
        self.item_index = 0;
    }

    pub fn set_width(&mut self, width: f32) {
        self.size.width = width;
    }

    pub fn set_height(&mut self, height: f32) {
        self.size.height = height;
    }

    pub fn set_next(&mut self, next: NextCell) {
        self.next = Some(next);
    }

    pub fn widths(&self) -> &[f32] {
        &self.widths
    }

    /// Produce the next cell and advance the cursor.
    pub fn next(&mut self, style: &Style) -> Rect {
        let mut cell = match self.next.take() {
            Some(NextCell::Absolute(rect)) => return rect,
            Some(NextCell::Relative(rect)) => rect,
            None => {
                if self.item_index == self.widths.len() {
                    self.row(None, self.size.height);
                }
                let width = self
                    .widths
                    .get(self.item_index)
                    .copied()
                    .unwrap_or(self.size.width);
                let mut cell = Rect::new(self.position.x, self.position.y, width, self.size.height);
                if cell.width == 0.0 {
                    cell.width = style.size.width + style.padding * 2.0;
                }
                if cell.height == 0.0 {
                    cell.height = style.size.height + style.padding * 2.0;
                }
                if cell.width < 0.0 {
                    cell.width += self.body.width - cell.x + 1.0;
                }
                if cell.height < 0.0 {
                    cell.height += self.body.height - cell.y + 1.0;
                }
                self.item_index += 1;
                cell
            }
        };

        self.position.x += cell.width + style.spacing;
        self.next_row = self.next_row.max(cell.y + cell.height + style.spacing);

        cell.x += self.body.x;
        cell.y += self.body.y;

        self.max.x = self.max.x.max(cell.right());
        self.max.y = self.max.y.max(cell.bottom());
        cell
    }

    /// The cell `next` would return, without consuming it.
    pub fn peek(&self, style: &Style) -> Rect {
        self.clone().next(style)
    }

    /// Fold a finished nested column back into this (parent) layout.
    pub fn absorb_column(&mut self, column: &Layout) {
        self.position.x = self
            .position
            .x
            .max(column.position.x + column.body.x - self.body.x);
        self.next_row = self
            .next_row
            .max(column.next_row + column.body.y - self.body.y);
        self.max.x = self.max.x.max(column.max.x);
        self.max.y = self.max.y.max(column.max.y);
    }

    /// Content extent measured from the body origin.
    pub fn content_size(&self) -> Size {
        Size::new(self.max.x - self.body.x, self.max.y - self.body.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> Style {
        Style {
            padding: 5.0,
            spacing: 4.0,
            size: Size::new(68.0, 10.0),
            ..Style::default()
        }
    }

    #[test]
    fn default_row_uses_style_size() {
        let mut layout = Layout::new(Rect::new(10.0, 20.0, 300.0, 200.0), Point::ORIGIN);
        let cell = layout.next(&style());
        assert_eq!(cell, Rect::new(10.0, 20.0, 78.0, 20.0));
    }

    #[test]
    fn fixed_widths_flow_then_wrap() {
        let s = style();
        let mut layout = Layout::new(Rect::new(0.0, 0.0, 300.0, 200.0), Point::ORIGIN);
        layout.row(Some(&[50.0, 60.0]), 30.0);

        assert_eq!(layout.next(&s), Rect::new(0.0, 0.0, 50.0, 30.0));
        assert_eq!(layout.next(&s), Rect::new(54.0, 0.0, 60.0, 30.0));
        // Implicit wrap reuses widths and height.
        assert_eq!(layout.next(&s), Rect::new(0.0, 34.0, 50.0, 30.0));
    }

    #[test]
    fn row_without_widths_stacks_cells() {
        let mut layout = Layout::new(Rect::new(0.0, 0.0, 300.0, 200.0), Point::ORIGIN);
        layout.row(Some(&[]), 20.0);
        let a = layout.next(&style());
        let b = layout.next(&style());
        assert_eq!(a, Rect::new(0.0, 0.0, 78.0, 20.0));
        assert_eq!(b, Rect::new(0.0, 24.0, 78.0, 20.0));
    }

    #[test]
    fn negative_width_fills_remaining_space() {
        let s = style();
        let mut layout = Layout::new(Rect::new(0.0, 0.0, 300.0, 200.0), Point::ORIGIN);
        layout.row(Some(&[100.0, -1.0]), 20.0);
        layout.next(&s);
        let fill = layout.next(&s);
        assert_eq!(fill.x, 104.0);
        assert_eq!(fill.right(), 300.0);
    }

    #[test]
    fn scroll_offsets_the_body() {
        let mut layout = Layout::new(Rect::new(0.0, 0.0, 100.0, 100.0), Point::new(0.0, 40.0));
        let cell = layout.next(&style());
        assert_eq!(cell.y, -40.0);
    }

    #[test]
    fn indent_shifts_row_start() {
        let s = style();
        let mut layout = Layout::new(Rect::new(0.0, 0.0, 300.0, 200.0), Point::ORIGIN);
        layout.indent = 24.0;
        layout.row(Some(&[-1.0]), 20.0);
        let cell = layout.next(&s);
        assert_eq!(cell.x, 24.0);
        assert_eq!(cell.right(), 300.0);
    }

    #[test]
    fn peek_does_not_advance() {
        let s = style();
        let mut layout = Layout::new(Rect::new(0.0, 0.0, 300.0, 200.0), Point::ORIGIN);
        layout.row(Some(&[40.0, 40.0]), 10.0);
        let peeked = layout.peek(&s);
        assert_eq!(layout.next(&s), peeked);
    }

    #[test]
    fn absolute_override_leaves_cursor_alone() {
        let s = style();
        let mut layout = Layout::new(Rect::new(0.0, 0.0, 300.0, 200.0), Point::ORIGIN);
        layout.row(Some(&[40.0]), 10.0);
        let pinned = Rect::new(500.0, 500.0, 5.0, 5.0);
        layout.set_next(NextCell::Absolute(pinned));
        assert_eq!(layout.next(&s), pinned);
        assert_eq!(layout.next(&s), Rect::new(0.0, 0.0, 40.0, 10.0));
    }

    #[test]
    fn relative_override_advances_cursor() {
        let s = style();
        let mut layout = Layout::new(Rect::new(10.0, 10.0, 300.0, 200.0), Point::ORIGIN);
        layout.set_next(NextCell::Relative(Rect::new(0.0, 0.0, 100.0, 50.0)));
        assert_eq!(layout.next(&s), Rect::new(10.0, 10.0, 100.0, 50.0));
        assert_eq!(layout.position.x, 104.0);
    }

    #[test]
    fn max_extent_tracks_content() {
        let s = style();
        let mut layout = Layout::new(Rect::new(10.0, 10.0, 300.0, 200.0), Point::ORIGIN);
        layout.row(Some(&[100.0]), 30.0);
        layout.next(&s);
        layout.next(&s);
        assert_eq!(layout.content_size(), Size::new(100.0, 64.0));
    }

    #[test]
    fn column_bubbles_cursor_into_parent() {
        let s = style();
        let mut parent = Layout::new(Rect::new(0.0, 0.0, 300.0, 200.0), Point::ORIGIN);
        parent.row(Some(&[100.0, 100.0]), 0.0);
        let cell = parent.next(&s);

        let mut column = Layout::new(cell, Point::ORIGIN);
        column.row(Some(&[-1.0]), 30.0);
        column.next(&s);
        column.next(&s);
        column.next(&s);
        parent.absorb_column(&column);

        // Three stacked 30px rows push the parent's next row below them.
        assert_eq!(parent.max.y, 98.0);
        parent.row(None, 10.0);
        assert_eq!(parent.next(&s).y, 102.0);
    }
}
