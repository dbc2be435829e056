//! Constraint strengths.

/// How strongly the solver should try to satisfy a constraint.
///
/// Strengths are ordered weights packed into a single `f64`: one unit of a
/// stronger class always outweighs up to 1000 units of the next class.
/// [`Strength::REQUIRED`] constraints must hold exactly; everything weaker
/// is minimised as an error term.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Strength(f64);

impl Strength {
    /// Must be satisfied.
    pub const REQUIRED: Self = Self(1_001_001_000.0);
    /// Strong preference.
    pub const STRONG: Self = Self(1_000_000.0);
    /// Medium preference.
    pub const MEDIUM: Self = Self(1_000.0);
    /// Weak preference.
    pub const WEAK: Self = Self(1.0);

    /// Compose a strength from strong, medium, and weak components, each
    /// scaled by `weight` and clamped to `0..=1000`.
    #[must_use]
    pub fn new(strong: f64, medium: f64, weak: f64, weight: f64) -> Self {
        let clamp = |v: f64| (v * weight).clamp(0.0, 1000.0);
        Self(clamp(strong) * 1_000_000.0 + clamp(medium) * 1_000.0 + clamp(weak))
    }

    /// Clamp to `0..=REQUIRED`.
    #[must_use]
    pub fn clip(self) -> Self {
        Self(self.0.clamp(0.0, Self::REQUIRED.0))
    }

    /// The raw weight.
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Whether this strength is [`Strength::REQUIRED`] (or stronger).
    #[inline]
    #[must_use]
    pub fn is_required(self) -> bool {
        self.0 >= Self::REQUIRED.0
    }
}
