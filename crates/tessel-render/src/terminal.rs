#![forbid(unsafe_code)]

//! Double-buffered terminal.
//!
//! [`Terminal`] keeps two buffers: the frame being drawn and the frame last
//! shown. Each [`Terminal::draw`] call:
//!
//! 1. resizes the buffers if the viewport follows the backend size;
//! 2. hands the application a [`Frame`] over the current buffer;
//! 3. sends the diff against the previous buffer to the backend;
//! 4. hides the cursor, or shows it where the frame asked;
//! 5. clears the previous buffer and swaps the two;
//! 6. flushes the backend.
//!
//! Step 5 leaves the drawn frame as the next diff baseline and an empty
//! buffer for the next frame to draw into.
//!
//! ```
//! use tessel_render::backend::TestBackend;
//! use tessel_render::terminal::Terminal;
//! use tessel_render::text::Span;
//!
//! let mut terminal = Terminal::new(TestBackend::new(5, 1))?;
//! terminal.draw(|frame| frame.render_widget(Span::raw("hi"), frame.area()))?;
//! terminal.backend().assert_buffer_lines(["hi   "]);
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io;

use tessel_core::{Position, Rect, Size};

use crate::backend::Backend;
use crate::buffer::Buffer;
use crate::widget::{StatefulWidget, Widget};

/// Whether the drawable area tracks the backend size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResizeBehavior {
    /// Keep the area given at construction.
    Fixed,
    /// Re-query the backend before every draw and resize on change.
    #[default]
    Auto,
}

/// The region of the backend a [`Terminal`] draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    area: Rect,
    resize_behavior: ResizeBehavior,
}

impl Viewport {
    /// A viewport pinned to `area`.
    #[must_use]
    pub const fn fixed(area: Rect) -> Self {
        Self {
            area,
            resize_behavior: ResizeBehavior::Fixed,
        }
    }

    /// A viewport that follows the backend size, starting at `area`.
    #[must_use]
    pub const fn auto(area: Rect) -> Self {
        Self {
            area,
            resize_behavior: ResizeBehavior::Auto,
        }
    }

    #[must_use]
    pub const fn area(&self) -> Rect {
        self.area
    }

    #[must_use]
    pub const fn resize_behavior(&self) -> ResizeBehavior {
        self.resize_behavior
    }
}

/// Construction options for [`Terminal::with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalOptions {
    pub viewport: Viewport,
}

/// Drawing surface handed to the closure of [`Terminal::draw`].
#[derive(Debug)]
pub struct Frame<'a> {
    buffer: &'a mut Buffer,
    previous: &'a Buffer,
    area: Rect,
    cursor_position: Option<Position>,
}

impl Frame<'_> {
    /// The full drawable area.
    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    /// What the terminal showed after the previous draw.
    #[must_use]
    pub fn previous_buffer(&self) -> &Buffer {
        self.previous
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        widget.render(area, self.buffer);
    }

    pub fn render_stateful_widget<W: StatefulWidget>(
        &mut self,
        widget: W,
        area: Rect,
        state: &mut W::State,
    ) {
        widget.render(area, self.buffer, state);
    }

    /// Show the cursor at `position` once the frame is flushed.
    ///
    /// Without this call the cursor is hidden after the draw.
    pub fn set_cursor_position<P: Into<Position>>(&mut self, position: P) {
        self.cursor_position = Some(position.into());
    }
}

/// The result of a successful [`Terminal::draw`].
#[derive(Debug, Clone, Copy)]
pub struct CompletedFrame<'a> {
    /// The buffer that was drawn.
    pub buffer: &'a Buffer,
    pub area: Rect,
}

/// A backend plus the two buffers used to diff successive frames.
///
/// Dropping a terminal whose cursor is hidden shows the cursor again.
#[derive(Debug)]
pub struct Terminal<B: Backend> {
    backend: B,
    buffers: [Buffer; 2],
    current: usize,
    hidden_cursor: bool,
    viewport: Viewport,
}

impl<B: Backend> Terminal<B> {
    /// A terminal whose viewport follows the backend size.
    pub fn new(backend: B) -> io::Result<Self> {
        let size = backend.size()?;
        Self::with_options(backend, TerminalOptions {
            viewport: Viewport::auto(Rect::new(0, 0, size.width, size.height)),
        })
    }

    pub fn with_options(backend: B, options: TerminalOptions) -> io::Result<Self> {
        let area = options.viewport.area;
        Ok(Self {
            backend,
            buffers: [Buffer::empty(area), Buffer::empty(area)],
            current: 0,
            hidden_cursor: false,
            viewport: options.viewport,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// A frame over the current buffer, for callers driving the steps by hand.
    pub fn get_frame(&mut self) -> Frame<'_> {
        let area = self.viewport.area;
        let [first, second] = &mut self.buffers;
        let (buffer, previous) = if self.current == 0 {
            (first, &*second)
        } else {
            (second, &*first)
        };
        Frame {
            buffer,
            previous,
            area,
            cursor_position: None,
        }
    }

    pub fn current_buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffers[self.current]
    }

    /// Send the difference between the current and previous buffers to the
    /// backend. The backend is not flushed.
    pub fn flush(&mut self) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("flush");
        #[cfg(feature = "tracing")]
        let _guard = _span.enter();

        let previous = &self.buffers[1 - self.current];
        let current = &self.buffers[self.current];
        let updates = previous.diff(current);
        tessel_core::trace!(updates = updates.len(), "flushing frame");
        self.backend.draw(updates.into_iter())
    }

    /// Resize both buffers to `area` and clear the screen.
    pub fn resize(&mut self, area: Rect) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("resize", width = area.width, height = area.height);
        #[cfg(feature = "tracing")]
        let _guard = _span.enter();

        tessel_core::debug!(?area, "resizing terminal");
        self.buffers[self.current].resize(area);
        self.buffers[1 - self.current].resize(area);
        self.viewport.area = area;
        self.clear()
    }

    /// Match the backend size if the viewport follows it.
    pub fn autoresize(&mut self) -> io::Result<()> {
        if self.viewport.resize_behavior == ResizeBehavior::Auto {
            let size = self.backend.size()?;
            let area = Rect::new(0, 0, size.width, size.height);
            if area != self.viewport.area {
                self.resize(area)?;
            }
        }
        Ok(())
    }

    /// Draw one frame. See the module docs for the exact sequence.
    ///
    /// On error the buffers are left unswapped, so the next draw diffs
    /// against the last frame that was fully sent.
    pub fn draw<F>(&mut self, render: F) -> io::Result<CompletedFrame<'_>>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("draw");
        #[cfg(feature = "tracing")]
        let _guard = _span.enter();

        self.autoresize()?;

        let mut frame = self.get_frame();
        render(&mut frame);
        let cursor_position = frame.cursor_position;

        self.flush()?;

        match cursor_position {
            None => self.hide_cursor()?,
            Some(position) => {
                self.show_cursor()?;
                self.set_cursor_position(position)?;
            }
        }

        self.swap_buffers();
        self.backend.flush()?;

        Ok(CompletedFrame {
            buffer: &self.buffers[1 - self.current],
            area: self.viewport.area,
        })
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.backend.hide_cursor()?;
        self.hidden_cursor = true;
        Ok(())
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        self.backend.show_cursor()?;
        self.hidden_cursor = false;
        Ok(())
    }

    pub fn get_cursor_position(&mut self) -> io::Result<Position> {
        self.backend.get_cursor_position()
    }

    pub fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        self.backend.set_cursor_position(position.into())
    }

    /// Clear the screen and forget the previous frame, so the next draw
    /// repaints every non-blank cell.
    pub fn clear(&mut self) -> io::Result<()> {
        self.backend.clear()?;
        self.buffers[1 - self.current].reset();
        Ok(())
    }

    /// Reset the previous buffer and make it current.
    pub fn swap_buffers(&mut self) {
        self.buffers[1 - self.current].reset();
        self.current = 1 - self.current;
    }

    pub fn size(&self) -> io::Result<Size> {
        self.backend.size()
    }
}

impl<B: Backend> Drop for Terminal<B> {
    fn drop(&mut self) {
        if self.hidden_cursor
            && let Err(_err) = self.show_cursor()
        {
            tessel_core::warn!(error = %_err, "failed to show the cursor on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TestBackend;
    use crate::text::Span;

    #[test]
    fn viewport_constructors() {
        let area = Rect::new(1, 2, 3, 4);
        assert_eq!(Viewport::fixed(area).resize_behavior(), ResizeBehavior::Fixed);
        assert_eq!(Viewport::auto(area).area(), area);
    }

    #[test]
    fn completed_frame_is_the_drawn_buffer() {
        let mut terminal = Terminal::new(TestBackend::new(3, 1)).unwrap();
        let completed = terminal
            .draw(|frame| frame.render_widget(Span::raw("abc"), frame.area()))
            .unwrap();
        assert_eq!(*completed.buffer, Buffer::with_lines(["abc"]));
        assert_eq!(completed.area, Rect::new(0, 0, 3, 1));
    }

    #[test]
    fn frame_sees_previous_buffer() {
        let mut terminal = Terminal::new(TestBackend::new(2, 1)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(Span::raw("xy"), frame.area()))
            .unwrap();
        terminal
            .draw(|frame| {
                assert_eq!(*frame.previous_buffer(), Buffer::with_lines(["xy"]));
                assert_eq!(*frame.buffer_mut(), Buffer::with_lines(["  "]));
            })
            .unwrap();
    }

    #[test]
    fn swap_buffers_resets_the_new_current() {
        let mut terminal = Terminal::new(TestBackend::new(1, 1)).unwrap();
        terminal.current_buffer_mut().set_string(0, 0, "q", tessel_style::Style::default());
        terminal.swap_buffers();
        terminal.swap_buffers();
        assert_eq!(*terminal.current_buffer_mut(), Buffer::with_lines([" "]));
    }
}
