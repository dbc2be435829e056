#![forbid(unsafe_code)]

//! tessel public facade crate.
//!
//! Re-exports the types most applications need from the member crates and
//! offers a prelude for day-to-day usage.
//!
//! ```
//! use tessel::prelude::*;
//!
//! let mut terminal = Terminal::new(TestBackend::new(12, 2))?;
//! let mut cache = LayoutCache::default();
//! terminal.draw(|frame| {
//!     let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(0)])
//!         .split_cached(frame.area(), &mut cache);
//!     frame.render_widget(Span::raw("header"), rows[0]);
//!     frame.render_widget(Line::raw("body"), rows[1]);
//! })?;
//! terminal.backend().assert_buffer_lines(["header      ", "body        "]);
//! # Ok::<(), tessel::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use tessel_core::{Margin, Position, Rect, Size};

// --- Style re-exports ------------------------------------------------------

pub use tessel_style::{Color, Modifier, ParseColorError, Style};

// --- Layout re-exports -----------------------------------------------------

pub use tessel_layout::{
    Constraint, Direction, Layout, LayoutCache, LayoutCacheStats, Percent, SolverError,
};

// --- Render re-exports -----------------------------------------------------

#[cfg(feature = "crossterm")]
pub use tessel_render::backend::CrosstermBackend;
pub use tessel_render::backend::{Backend, TestBackend};
pub use tessel_render::buffer::Buffer;
pub use tessel_render::cell::Cell;
pub use tessel_render::diff::BufferDiff;
pub use tessel_render::terminal::{
    CompletedFrame, Frame, ResizeBehavior, Terminal, TerminalOptions, Viewport,
};
pub use tessel_render::text::{Line, Span};
pub use tessel_render::widget::{StatefulWidget, Widget};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for tessel apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations.
    Io(std::io::Error),
    /// Invalid construction argument.
    Core(tessel_core::Error),
    /// The layout constraints could not be solved.
    Layout(SolverError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Core(err) => write!(f, "{err}"),
            Self::Layout(err) => write!(f, "layout failed: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Core(err) => Some(err),
            Self::Layout(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<tessel_core::Error> for Error {
    fn from(err: tessel_core::Error) -> Self {
        Self::Core(err)
    }
}

impl From<SolverError> for Error {
    fn from(err: SolverError) -> Self {
        Self::Layout(err)
    }
}

/// Standard result type for tessel APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    #[cfg(feature = "crossterm")]
    pub use crate::CrosstermBackend;
    pub use crate::{
        Buffer, Cell, Color, Constraint, Direction, Error, Frame, Layout, LayoutCache, Line,
        Margin, Modifier, Rect, Result, Span, StatefulWidget, Style, Terminal, TestBackend,
        Widget,
    };

    pub use crate::{core, layout, render, style};
}

pub use tessel_core as core;
pub use tessel_layout as layout;
pub use tessel_render as render;
pub use tessel_style as style;
