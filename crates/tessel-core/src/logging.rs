#![forbid(unsafe_code)]

//! Logging shims shared by the tessel crates.
//!
//! Call sites always write `tessel_core::debug!(..)` and friends. With the
//! `tracing` feature those names are the `tracing` macros themselves; without
//! it they swallow their arguments and the span forms yield a [`NoopSpan`].
//!
//! `tracing-json` adds [`init_json_logging`], which installs a JSON
//! subscriber on stderr so log lines never interleave with drawn frames.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

// Arguments are discarded as raw tokens, so field sigils like `?x` and `%x`
// need no special handling.
#[cfg(not(feature = "tracing"))]
mod disabled {
    #[macro_export]
    macro_rules! trace { ($($tokens:tt)*) => {}; }
    #[macro_export]
    macro_rules! debug { ($($tokens:tt)*) => {}; }
    #[macro_export]
    macro_rules! info { ($($tokens:tt)*) => {}; }
    #[macro_export]
    macro_rules! warn { ($($tokens:tt)*) => {}; }
    #[macro_export]
    macro_rules! error { ($($tokens:tt)*) => {}; }

    #[macro_export]
    macro_rules! trace_span { ($($tokens:tt)*) => { $crate::logging::NoopSpan }; }
    #[macro_export]
    macro_rules! debug_span { ($($tokens:tt)*) => { $crate::logging::NoopSpan }; }
    #[macro_export]
    macro_rules! info_span { ($($tokens:tt)*) => { $crate::logging::NoopSpan }; }
    #[macro_export]
    macro_rules! warn_span { ($($tokens:tt)*) => { $crate::logging::NoopSpan }; }
    #[macro_export]
    macro_rules! error_span { ($($tokens:tt)*) => { $crate::logging::NoopSpan }; }
}

/// Stand-in for `tracing::Span` in builds without the `tracing` feature.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }

    /// Run `f` directly.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        f()
    }
}

/// Returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[must_use = "the guard marks the span as entered until dropped"]
#[derive(Debug)]
pub struct NoopGuard;

/// Parse `RUST_LOG`-style directives, e.g. `"tessel_layout=trace,warn"`.
#[cfg(feature = "tracing-json")]
pub fn json_filter(
    directives: &str,
) -> Result<tracing_subscriber::EnvFilter, tracing_subscriber::filter::ParseError> {
    tracing_subscriber::EnvFilter::try_new(directives)
}

/// Install a global JSON subscriber on stderr, filtered by `directives`.
///
/// Errors if the directives do not parse or a global subscriber is already
/// installed. Nothing is installed in the first case.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(
    directives: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = json_filter(directives)?;
    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
}
