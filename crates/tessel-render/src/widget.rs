#![forbid(unsafe_code)]

//! Rendering contracts between application components and a frame.

use tessel_core::Rect;

use crate::buffer::Buffer;
use crate::text::{Line, Span};

/// Something that draws itself into a rectangular region of a buffer.
///
/// Implementations must not touch cells outside `area`.
pub trait Widget {
    fn render(self, area: Rect, buf: &mut Buffer);
}

/// A widget whose rendering reads or updates external state, such as a
/// scroll offset that persists between frames.
pub trait StatefulWidget {
    type State;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State);
}

impl Widget for Span<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(&buf.area());
        if area.is_empty() {
            return;
        }
        buf.set_span(area.x, area.y, &self, area.width);
    }
}

impl Widget for Line<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(&buf.area());
        if area.is_empty() {
            return;
        }
        buf.set_style(area.with_height(1), self.style);
        buf.set_line(area.x, area.y, &self, area.width);
    }
}
