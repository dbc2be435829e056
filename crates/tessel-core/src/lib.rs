#![forbid(unsafe_code)]

//! Core: geometry primitives, the shared error type, and logging shims.

pub mod error;
pub mod geometry;
pub mod logging;

pub use error::{Error, Result};
pub use geometry::{Margin, Position, Rect, Size};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
