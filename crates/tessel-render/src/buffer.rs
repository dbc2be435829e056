#![forbid(unsafe_code)]

//! A rectangular grid of [`Cell`]s.
//!
//! Cells are stored row-major. Coordinates passed to buffer methods are
//! absolute terminal coordinates, so a buffer whose area starts at `(4, 2)`
//! has its first cell at `(4, 2)`, not `(0, 0)`.
//!
//! # Diffing
//!
//! [`Buffer::diff`] compares two frames and yields the cells that must be
//! redrawn. Wide graphemes complicate this:
//!
//! - the cells covered by a wide grapheme are never emitted, because the
//!   terminal paints them when the grapheme itself is printed;
//! - after a wide grapheme is replaced, the cells it used to cover are
//!   emitted even when unchanged, because the terminal may have blanked them.
//!
//! ```
//! use tessel_render::buffer::Buffer;
//!
//! let previous = Buffer::with_lines(["┌Title─┐"]);
//! let next = Buffer::with_lines(["┌称号──┐"]);
//! let columns: Vec<u16> = previous.diff(&next).iter().map(|u| u.column).collect();
//! assert_eq!(columns, [1, 3, 5]);
//! ```

use std::cmp::{max, min};

use tessel_core::{Position, Rect};
use tessel_style::Style;
use unicode_segmentation::UnicodeSegmentation;

use crate::cell::Cell;
use crate::diff::BufferDiff;
use crate::text::{Line, Span};
use crate::{display_width, grapheme_width};

/// A grid of cells covering `area`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Buffer {
    area: Rect,
    content: Vec<Cell>,
}

impl Buffer {
    /// A buffer of default cells.
    #[must_use]
    pub fn empty(area: Rect) -> Self {
        Self::filled(area, Cell::default())
    }

    /// A buffer with every cell set to `cell`.
    #[must_use]
    pub fn filled(area: Rect, cell: Cell) -> Self {
        Self {
            area,
            content: vec![cell; area.area() as usize],
        }
    }

    /// A buffer at the origin holding one line of text per row.
    ///
    /// The width is the widest line's display width.
    #[must_use]
    pub fn with_lines<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let lines: Vec<I::Item> = lines.into_iter().collect();
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let width = lines
            .iter()
            .map(|line| display_width(line.as_ref()))
            .max()
            .unwrap_or(0);
        let width = u16::try_from(width).unwrap_or(u16::MAX);
        let mut buffer = Self::empty(Rect::new(0, 0, width, height));
        let rows = buffer.area.height;
        for (y, line) in (0..rows).zip(&lines) {
            buffer.set_string(0, y, line, Style::default());
        }
        buffer
    }

    #[inline]
    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Cells in row-major order.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &[Cell] {
        &self.content
    }

    /// Index of `(x, y)` in [`content`](Self::content), or `None` outside the area.
    #[must_use]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if !self.area.contains(Position::new(x, y)) {
            return None;
        }
        let row = usize::from(y - self.area.y);
        let col = usize::from(x - self.area.x);
        Some(row * usize::from(self.area.width) + col)
    }

    /// Absolute `(x, y)` of content index `i`, or `None` past the end.
    #[must_use]
    pub fn pos_of(&self, i: usize) -> Option<(u16, u16)> {
        if i >= self.content.len() {
            return None;
        }
        position_in(self.area, i)
    }

    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.content[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index_of(x, y).map(move |i| &mut self.content[i])
    }

    /// Write `string` starting at `(x, y)`, clipped to the buffer's right edge.
    pub fn set_string<T, S>(&mut self, x: u16, y: u16, string: T, style: S) -> (u16, u16)
    where
        T: AsRef<str>,
        S: Into<Style>,
    {
        self.set_stringn(x, y, string, usize::MAX, style)
    }

    /// Write at most `max_width` columns of `string` starting at `(x, y)`.
    ///
    /// Zero-width graphemes are skipped. A grapheme that does not fit in the
    /// remaining width stops the write. The cells covered by a wide grapheme
    /// are reset. Returns the position just past the last written cell.
    pub fn set_stringn<T, S>(
        &mut self,
        x: u16,
        y: u16,
        string: T,
        max_width: usize,
        style: S,
    ) -> (u16, u16)
    where
        T: AsRef<str>,
        S: Into<Style>,
    {
        if !self.area.contains(Position::new(x, y)) {
            return (x, y);
        }
        let style = style.into();
        let max_offset = min(
            usize::from(self.area.right()),
            usize::from(x).saturating_add(max_width),
        );
        let mut x_offset = usize::from(x);
        for grapheme in string.as_ref().graphemes(true) {
            let width = grapheme_width(grapheme);
            if width == 0 {
                continue;
            }
            if width > max_offset - x_offset {
                break;
            }
            // x_offset < max_offset <= area.right(), so these casts are lossless.
            let column = x_offset as u16;
            if let Some(cell) = self.get_mut(column, y) {
                cell.set_symbol(grapheme).set_style(style);
            }
            for covered in (x_offset + 1)..(x_offset + width) {
                if let Some(cell) = self.get_mut(covered as u16, y) {
                    cell.reset();
                }
            }
            x_offset += width;
        }
        (x_offset as u16, y)
    }

    /// Write a span, clipped to `max_width` columns.
    pub fn set_span(&mut self, x: u16, y: u16, span: &Span<'_>, max_width: u16) -> (u16, u16) {
        self.set_stringn(x, y, &span.content, usize::from(max_width), span.style)
    }

    /// Write a line span by span, clipped to `max_width` columns in total.
    pub fn set_line(&mut self, x: u16, y: u16, line: &Line<'_>, max_width: u16) -> (u16, u16) {
        let mut remaining = max_width;
        let mut x = x;
        for span in &line.spans {
            if remaining == 0 {
                break;
            }
            let (next_x, _) = self.set_stringn(
                x,
                y,
                &span.content,
                usize::from(remaining),
                line.style.merge(span.style),
            );
            remaining = remaining.saturating_sub(next_x.saturating_sub(x));
            x = next_x;
        }
        (x, y)
    }

    /// Overlay `style` on every cell of `area` that lies inside the buffer.
    pub fn set_style<S: Into<Style>>(&mut self, area: Rect, style: S) {
        let style = style.into();
        let area = self.area.intersection(&area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.set_style(style);
                }
            }
        }
    }

    /// Resize to `area`, truncating or padding the content with default cells.
    ///
    /// Content is not reflowed; callers normally [`reset`](Self::reset) after.
    pub fn resize(&mut self, area: Rect) {
        self.content.resize(area.area() as usize, Cell::default());
        self.area = area;
    }

    /// Reset every cell to its default.
    pub fn reset(&mut self) {
        for cell in &mut self.content {
            cell.reset();
        }
    }

    /// Grow to the union of both areas and copy `other` on top.
    ///
    /// Our cells keep their absolute positions. Where the areas overlap,
    /// `other` wins.
    pub fn merge(&mut self, other: &Buffer) {
        let area = self.area.union(&other.area);
        let width = usize::from(area.width);
        let index = |x: u16, y: u16| {
            usize::from(y - area.y) * width + usize::from(x - area.x)
        };

        let mut content = vec![Cell::default(); area.area() as usize];
        let own_area = self.area;
        for (i, cell) in std::mem::take(&mut self.content).into_iter().enumerate() {
            if let Some((x, y)) = position_in(own_area, i) {
                content[index(x, y)] = cell;
            }
        }
        for (i, cell) in other.content.iter().enumerate() {
            if let Some((x, y)) = other.pos_of(i) {
                content[index(x, y)] = cell.clone();
            }
        }

        self.area = area;
        self.content = content;
    }

    /// Cells that must be redrawn to turn `self` (the previous frame) into
    /// `next`, in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if the buffers differ in width.
    #[must_use]
    pub fn diff<'a>(&self, next: &'a Buffer) -> Vec<BufferDiff<'a>> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "diff",
            width = next.area.width,
            height = next.area.height
        );
        #[cfg(feature = "tracing")]
        let _guard = _span.enter();

        assert_eq!(
            self.area.width, next.area.width,
            "diffed buffers must have the same width"
        );

        let mut updates = Vec::new();
        // Columns still covered by a wide grapheme from either frame.
        let mut invalidated: usize = 0;
        // Columns covered by the current wide grapheme in `next`.
        let mut to_skip: usize = 0;
        for (i, (current, previous)) in next.content.iter().zip(&self.content).enumerate() {
            if (current != previous || invalidated > 0)
                && to_skip == 0
                && let Some((column, row)) = next.pos_of(i)
            {
                updates.push(BufferDiff {
                    column,
                    row,
                    cell: current,
                });
            }

            let current_width = current.width();
            to_skip = current_width.saturating_sub(1);
            let affected = max(current_width, previous.width());
            invalidated = max(affected, invalidated).saturating_sub(1);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(updates = updates.len(), "buffer diff computed");

        updates
    }
}

/// Absolute position of row-major index `i` within `area`.
fn position_in(area: Rect, i: usize) -> Option<(u16, u16)> {
    if i >= area.area() as usize {
        return None;
    }
    let width = usize::from(area.width);
    // i < width * height, so both offsets fit the area's u16 extents.
    Some((area.x + (i % width) as u16, area.y + (i / width) as u16))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_style::{Color, Modifier};

    fn symbols(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area();
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .filter_map(|x| buffer.get(x, y))
                    .map(Cell::symbol)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn index_and_position_are_absolute() {
        let buffer = Buffer::empty(Rect::new(4, 2, 3, 2));
        assert_eq!(buffer.index_of(4, 2), Some(0));
        assert_eq!(buffer.index_of(6, 3), Some(5));
        assert_eq!(buffer.index_of(7, 3), None);
        assert_eq!(buffer.index_of(3, 2), None);
        assert_eq!(buffer.pos_of(5), Some((6, 3)));
        assert_eq!(buffer.pos_of(6), None);
        assert!(buffer.get(0, 0).is_none());
    }

    #[test]
    fn set_string_clips_at_right_edge() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 5, 1));
        let end = buffer.set_string(0, 0, "123456", Style::default());
        assert_eq!(end, (5, 0));
        assert_eq!(symbols(&buffer), ["12345"]);
    }

    #[test]
    fn set_stringn_honours_max_width() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 5, 1));
        let end = buffer.set_stringn(1, 0, "123456", 3, Color::Red);
        assert_eq!(end, (4, 0));
        assert_eq!(symbols(&buffer), [" 123 "]);
        assert_eq!(buffer.get(1, 0).map(|c| c.fg), Some(Color::Red));
        assert_eq!(buffer.get(4, 0).map(|c| c.fg), Some(Color::Reset));
    }

    #[test]
    fn set_stringn_with_zero_width_writes_nothing() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buffer = Buffer::empty(area);
        let end = buffer.set_stringn(1, 0, "abc", 0, Color::Red);
        assert_eq!(end, (1, 0));
        assert_eq!(buffer, Buffer::empty(area));
    }

    #[test]
    fn set_line_with_zero_width_writes_nothing() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buffer = Buffer::empty(area);
        let line = Line::from(vec![Span::raw("ab"), Span::styled("cd", Color::Red)])
            .style(Style::new().bg(Color::Blue));
        assert_eq!(buffer.set_line(2, 0, &line, 0), (2, 0));
        assert_eq!(buffer, Buffer::empty(area));
    }

    #[test]
    fn wide_grapheme_that_does_not_fit_stops_the_write() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 5, 1));
        let end = buffer.set_string(0, 0, "コンピ", Style::default());
        assert_eq!(end, (4, 0));
        assert_eq!(buffer.get(0, 0).map(Cell::symbol), Some("コ"));
        assert_eq!(buffer.get(1, 0), Some(&Cell::default()));
        assert_eq!(buffer.get(2, 0).map(Cell::symbol), Some("ン"));
        assert_eq!(buffer.get(4, 0), Some(&Cell::default()));
    }

    #[test]
    fn wide_grapheme_resets_covered_cells() {
        let mut buffer = Buffer::filled(Rect::new(0, 0, 3, 1), Cell::new("x").with_fg(Color::Blue));
        buffer.set_string(0, 0, "称", Color::Green);
        assert_eq!(buffer.get(0, 0).map(|c| c.fg), Some(Color::Green));
        assert_eq!(buffer.get(1, 0), Some(&Cell::default()));
        assert_eq!(buffer.get(2, 0).map(Cell::symbol), Some("x"));
    }

    #[test]
    fn zero_width_graphemes_are_skipped() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 4, 1));
        let end = buffer.set_string(0, 0, "a\u{200B}b\u{7}", Style::default());
        assert_eq!(end, (2, 0));
        assert_eq!(symbols(&buffer), ["ab  "]);
    }

    #[test]
    fn set_string_outside_area_is_a_no_op() {
        let mut buffer = Buffer::empty(Rect::new(2, 2, 4, 1));
        assert_eq!(buffer.set_string(0, 0, "abc", Style::default()), (0, 0));
        assert_eq!(buffer.set_string(2, 3, "abc", Style::default()), (2, 3));
        assert_eq!(buffer, Buffer::empty(Rect::new(2, 2, 4, 1)));
    }

    #[test]
    fn set_line_patches_line_style_under_spans() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 6, 1));
        let line = Line::from(vec![Span::raw("ab"), Span::styled("cdef", Color::Red)])
            .style(Style::new().bg(Color::Blue));
        let end = buffer.set_line(0, 0, &line, 4);
        assert_eq!(end, (4, 0));
        assert_eq!(symbols(&buffer), ["abcd  "]);
        let c = buffer.get(2, 0).cloned().unwrap_or_default();
        assert_eq!((c.fg, c.bg), (Color::Red, Color::Blue));
        let a = buffer.get(0, 0).cloned().unwrap_or_default();
        assert_eq!((a.fg, a.bg), (Color::Reset, Color::Blue));
    }

    #[test]
    fn set_span_uses_span_style() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 3, 1));
        buffer.set_span(0, 0, &Span::styled("hey", Modifier::BOLD), 2);
        assert_eq!(symbols(&buffer), ["he "]);
        assert!(buffer.content()[1].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn set_style_is_clipped() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 2, 2));
        buffer.set_style(Rect::new(1, 1, 10, 10), Color::Yellow);
        let fgs: Vec<Color> = buffer.content().iter().map(|c| c.fg).collect();
        assert_eq!(fgs, [Color::Reset, Color::Reset, Color::Reset, Color::Yellow]);
    }

    #[test]
    fn with_lines_sizes_to_widest_line() {
        let buffer = Buffer::with_lines(["ab", "称号x", ""]);
        assert_eq!(buffer.area(), Rect::new(0, 0, 5, 3));
        assert_eq!(symbols(&buffer)[0], "ab   ");
    }

    #[test]
    fn diff_of_equal_buffers_is_empty() {
        let buffer = Buffer::with_lines(["称号 ok", "plain"]);
        assert!(buffer.diff(&buffer.clone()).is_empty());
    }

    #[test]
    fn diff_reports_changed_cells_in_order() {
        let previous = Buffer::with_lines(["abc", "def"]);
        let next = Buffer::with_lines(["abX", "Yef"]);
        let updates: Vec<(u16, u16, &str)> = previous
            .diff(&next)
            .iter()
            .map(|u| (u.column, u.row, u.cell.symbol()))
            .collect();
        assert_eq!(updates, [(2, 0, "X"), (0, 1, "Y")]);
    }

    #[test]
    fn diff_skips_cells_under_new_wide_grapheme() {
        let previous = Buffer::with_lines(["┌Title─┐"]);
        let next = Buffer::with_lines(["┌称号──┐"]);
        let updates: Vec<(u16, &str)> = previous
            .diff(&next)
            .iter()
            .map(|u| (u.column, u.cell.symbol()))
            .collect();
        assert_eq!(updates, [(1, "称"), (3, "号"), (5, "─")]);
    }

    #[test]
    fn diff_repaints_cells_uncovered_by_old_wide_grapheme() {
        let previous = Buffer::with_lines(["称 "]);
        let next = Buffer::with_lines(["a  "]);
        let columns: Vec<u16> = previous.diff(&next).iter().map(|u| u.column).collect();
        assert_eq!(columns, [0, 1]);
    }

    #[test]
    fn diff_uses_absolute_coordinates() {
        let area = Rect::new(3, 5, 2, 1);
        let previous = Buffer::empty(area);
        let mut next = Buffer::empty(area);
        next.set_string(4, 5, "z", Style::default());
        let updates = previous.diff(&next);
        assert_eq!(updates.len(), 1);
        assert_eq!((updates[0].column, updates[0].row), (4, 5));
    }

    #[test]
    fn resize_pads_and_truncates() {
        let mut buffer = Buffer::filled(Rect::new(0, 0, 2, 2), Cell::new("x"));
        buffer.resize(Rect::new(0, 0, 3, 2));
        assert_eq!(buffer.content().len(), 6);
        assert_eq!(buffer.content()[5], Cell::default());
        buffer.resize(Rect::new(0, 0, 1, 1));
        assert_eq!(buffer.content(), [Cell::new("x")]);
    }

    #[test]
    fn reset_clears_cells_but_keeps_area() {
        let area = Rect::new(1, 1, 2, 1);
        let mut buffer = Buffer::filled(area, Cell::new("q").with_bg(Color::Red));
        buffer.reset();
        assert_eq!(buffer, Buffer::empty(area));
    }

    #[test]
    fn merge_stacks_vertically() {
        let mut one = Buffer::filled(Rect::new(0, 0, 2, 2), Cell::new("1"));
        let two = Buffer::filled(Rect::new(0, 2, 2, 2), Cell::new("2"));
        one.merge(&two);
        assert_eq!(one, Buffer::with_lines(["11", "11", "22", "22"]));
    }

    #[test]
    fn merge_keeps_absolute_positions() {
        let mut one = Buffer::filled(Rect::new(2, 2, 2, 2), Cell::new("1"));
        let two = Buffer::filled(Rect::new(0, 0, 2, 2), Cell::new("2"));
        one.merge(&two);
        assert_eq!(one, Buffer::with_lines(["22  ", "22  ", "  11", "  11"]));
    }

    #[test]
    fn merge_overlap_prefers_other() {
        let mut one = Buffer::filled(Rect::new(1, 1, 2, 2), Cell::new("1"));
        let two = Buffer::filled(Rect::new(0, 0, 2, 2), Cell::new("2"));
        one.merge(&two);
        assert_eq!(one, Buffer::with_lines(["22 ", "221", " 11"]));
    }

    #[test]
    fn merge_away_from_origin() {
        let mut one = Buffer::filled(Rect::new(3, 4, 1, 1), Cell::new("a"));
        let two = Buffer::filled(Rect::new(5, 4, 1, 1), Cell::new("b"));
        one.merge(&two);
        assert_eq!(one.area(), Rect::new(3, 4, 3, 1));
        assert_eq!(symbols(&one), ["a b"]);
    }
}
