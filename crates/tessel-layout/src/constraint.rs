//! Size constraints for layout slots.

use std::fmt;

use tessel_core::{Error, Result};

/// A validated percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percent(u16);

impl Percent {
    /// The full extent.
    pub const FULL: Self = Self(100);

    /// Validate `value` as a percentage.
    ///
    /// Values above 100 are rejected rather than clamped.
    pub fn new(value: u16) -> Result<Self> {
        if value > 100 {
            return Err(Error::invalid_argument(
                "percentage",
                format!("{value} is not within 0..=100"),
            ));
        }
        Ok(Self(value))
    }

    /// The percentage as an integer in `0..=100`.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A constraint on the size of one layout slot along the split direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// A percentage of the available length.
    Percentage(Percent),
    /// A fraction `numerator / denominator` of the available length.
    Ratio(u32, u32),
    /// An exact number of cells.
    Length(u16),
    /// At most this many cells.
    Max(u16),
    /// At least this many cells.
    Min(u16),
}

impl Constraint {
    /// Build a [`Constraint::Percentage`], validating the range.
    pub fn percentage(value: u16) -> Result<Self> {
        Percent::new(value).map(Self::Percentage)
    }

    /// Resolve this constraint against an available `length`.
    ///
    /// ```
    /// use tessel_layout::Constraint;
    ///
    /// assert_eq!(Constraint::percentage(50).unwrap().apply(9), 4);
    /// assert_eq!(Constraint::Ratio(1, 3).apply(10), 3);
    /// assert_eq!(Constraint::Length(20).apply(10), 10);
    /// assert_eq!(Constraint::Min(4).apply(10), 4);
    /// ```
    ///
    /// `Max(n)` resolves to `max(n, length)`. The solver does not use this
    /// value for `Max`; it bounds the slot with `size <= n` directly.
    #[must_use]
    pub fn apply(&self, length: u16) -> u16 {
        match *self {
            Self::Percentage(p) => {
                let scaled = u32::from(length) * u32::from(p.get()) / 100;
                u16::try_from(scaled).unwrap_or(u16::MAX)
            }
            Self::Ratio(_, 0) => 0,
            Self::Ratio(num, den) => {
                let scaled = u64::from(length) * u64::from(num) / u64::from(den);
                u16::try_from(scaled).unwrap_or(u16::MAX)
            }
            Self::Length(n) => n.min(length),
            Self::Max(n) => n.max(length),
            Self::Min(n) => n.min(length),
        }
    }

    /// Reduce ratios to lowest terms so equivalent constraints compare equal.
    ///
    /// Every ratio with a zero denominator resolves to zero and collapses to
    /// `Ratio(0, 0)`.
    #[must_use]
    pub fn canonical(self) -> Self {
        match self {
            Self::Ratio(_, 0) => Self::Ratio(0, 0),
            Self::Ratio(num, den) => {
                let divisor = gcd(num, den);
                Self::Ratio(num / divisor, den / divisor)
            }
            other => other,
        }
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
