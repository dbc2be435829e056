#![forbid(unsafe_code)]

//! Shared error type.

use std::fmt;

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when a value is constructed from out-of-range input.
///
/// Geometric degeneracies (zero-area rects, oversized margins) are not
/// errors; they resolve to empty results instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument was outside its documented domain.
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// Human-readable description of the violated range.
        reason: String,
    },
}

impl Error {
    /// Build an [`Error::InvalidArgument`].
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { name, reason } => {
                write!(f, "invalid argument `{name}`: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_argument() {
        let err = Error::invalid_argument("percentage", "101 is not within 0..=100");
        assert_eq!(
            err.to_string(),
            "invalid argument `percentage`: 101 is not within 0..=100"
        );
    }
}
