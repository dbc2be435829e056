#![forbid(unsafe_code)]

//! Output surfaces a [`Terminal`](crate::terminal::Terminal) draws into.
//!
//! A backend receives cell updates in absolute coordinates and owns every
//! escape sequence that reaches the device. All operations report I/O
//! failures as [`std::io::Error`].

use std::io;

use tessel_core::{Position, Size};

use crate::diff::BufferDiff;

#[cfg(feature = "crossterm")]
mod crossterm;

#[cfg(feature = "crossterm")]
pub use self::crossterm::CrosstermBackend;
pub use self::test::TestBackend;

/// A device that can paint cells and manage the cursor.
pub trait Backend {
    /// Paint `content` in order. Writes may be buffered until [`flush`](Self::flush).
    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = BufferDiff<'a>>;

    fn hide_cursor(&mut self) -> io::Result<()>;

    fn show_cursor(&mut self) -> io::Result<()>;

    fn get_cursor_position(&mut self) -> io::Result<Position>;

    fn set_cursor_position(&mut self, position: Position) -> io::Result<()>;

    /// Clear the whole device.
    fn clear(&mut self) -> io::Result<()>;

    /// Current device size in cells.
    fn size(&self) -> io::Result<Size>;

    fn flush(&mut self) -> io::Result<()>;
}

impl<B: Backend> Backend for &mut B {
    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = BufferDiff<'a>>,
    {
        (**self).draw(content)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        (**self).hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        (**self).show_cursor()
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        (**self).get_cursor_position()
    }

    fn set_cursor_position(&mut self, position: Position) -> io::Result<()> {
        (**self).set_cursor_position(position)
    }

    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }

    fn size(&self) -> io::Result<Size> {
        (**self).size()
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}
