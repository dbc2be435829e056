#![forbid(unsafe_code)]

//! Constraint-based layout.
//!
//! - [`Layout`] - splits a rectangle into slots along one direction
//! - [`Constraint`] - per-slot sizing rules (Length, Percentage, Ratio, Min, Max)
//! - [`solver`] - the Cassowary simplex solver the layout is built on
//! - [`cache`] - bounded memoisation of layout results
//!
//! ```
//! use tessel_core::Rect;
//! use tessel_layout::{Constraint, Layout};
//!
//! let rects = Layout::vertical([Constraint::Length(1), Constraint::Min(0)])
//!     .split(Rect::new(0, 0, 80, 24));
//! assert_eq!(rects[0], Rect::new(0, 0, 80, 1));
//! assert_eq!(rects[1], Rect::new(0, 1, 80, 23));
//! ```

pub mod cache;
pub mod constraint;
pub mod solver;

use std::rc::Rc;

pub use cache::{LayoutCache, LayoutCacheKey, LayoutCacheStats};
pub use constraint::{Constraint, Percent};
pub use solver::SolverError;
pub use tessel_core::geometry::{Margin, Rect};

use solver::{LinearConstraint, Solver, Strength, Variable};

/// The direction to layout items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    #[default]
    Vertical,
}

/// Splits an area into adjacent slots according to a list of constraints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layout {
    direction: Direction,
    margin: Margin,
    pub(crate) constraints: Vec<Constraint>,
    expand_to_fill: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            margin: Margin::default(),
            constraints: Vec::new(),
            expand_to_fill: true,
        }
    }
}

/// Solver variables for one slot, named by axis rather than by x/y.
struct Element {
    start: Variable,
    size: Variable,
    cross_start: Variable,
    cross_size: Variable,
}

impl Element {
    fn new() -> Self {
        Self {
            start: Variable::new(),
            size: Variable::new(),
            cross_start: Variable::new(),
            cross_size: Variable::new(),
        }
    }
}

/// Destination extent along one axis.
///
/// `end` saturates at `u16::MAX`, so `len` can be shorter than the rect's
/// nominal size for areas that overhang the coordinate space.
#[derive(Clone, Copy)]
struct Axis {
    start: u16,
    end: u16,
    len: u16,
}

impl Axis {
    fn new(start: u16, end: u16) -> Self {
        Self {
            start,
            end,
            len: end - start,
        }
    }

    fn clamp(self, value: f64) -> u16 {
        // Rounding absorbs floating-point drift from the tableau.
        value.round().clamp(f64::from(self.start), f64::from(self.end)) as u16
    }
}

impl Layout {
    /// A left-to-right layout.
    pub fn horizontal(constraints: impl IntoIterator<Item = Constraint>) -> Self {
        Self::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
    }

    /// A top-to-bottom layout.
    pub fn vertical(constraints: impl IntoIterator<Item = Constraint>) -> Self {
        Self::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
    }

    /// Set the layout direction.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the margin applied to the area before splitting.
    #[must_use]
    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Set only the horizontal margin.
    #[must_use]
    pub fn horizontal_margin(mut self, horizontal: u16) -> Self {
        self.margin.horizontal = horizontal;
        self
    }

    /// Set only the vertical margin.
    #[must_use]
    pub fn vertical_margin(mut self, vertical: u16) -> Self {
        self.margin.vertical = vertical;
        self
    }

    /// Set the constraints.
    #[must_use]
    pub fn constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints = constraints.into_iter().collect();
        self
    }

    /// Whether the last slot is stretched to the end of the area (default `true`).
    #[must_use]
    pub fn expand_to_fill(mut self, expand_to_fill: bool) -> Self {
        self.expand_to_fill = expand_to_fill;
        self
    }

    /// Number of constraints (and thus output rects from [`split`](Self::split)).
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Split `area` into one rect per constraint.
    ///
    /// # Panics
    ///
    /// Panics if the solver rejects the generated system, which indicates a
    /// bug in the layout rather than bad input. Use [`try_split`](Self::try_split)
    /// to receive the error instead.
    pub fn split(&self, area: Rect) -> Rc<[Rect]> {
        match self.try_split(area) {
            Ok(rects) => rects,
            Err(err) => panic!("layout solver failed for {area:?}: {err}"),
        }
    }

    /// [`split`](Self::split) through `cache`.
    pub fn split_cached(&self, area: Rect, cache: &mut LayoutCache) -> Rc<[Rect]> {
        cache.get_or_compute_with(LayoutCacheKey::new(area, self), || self.split(area))
    }

    /// Split `area`, reporting solver failure as an error.
    ///
    /// Slots are placed edge to edge starting at the area's leading edge and
    /// never leave it. Each slot takes the full cross-axis extent. Sizing
    /// constraints are weak preferences; where they conflict with the area
    /// the area wins.
    pub fn try_split(&self, area: Rect) -> Result<Rc<[Rect]>, SolverError> {
        if self.constraints.is_empty() {
            return Ok(Rc::from(Vec::new()));
        }

        let dest = area.inner(self.margin);
        let (primary, cross) = match self.direction {
            Direction::Horizontal => (
                Axis::new(dest.left(), dest.right()),
                Axis::new(dest.top(), dest.bottom()),
            ),
            Direction::Vertical => (
                Axis::new(dest.top(), dest.bottom()),
                Axis::new(dest.left(), dest.right()),
            ),
        };

        tracing::debug!(
            ?dest,
            direction = ?self.direction,
            slots = self.constraints.len(),
            "solving layout"
        );

        let elements: Vec<Element> = self.constraints.iter().map(|_| Element::new()).collect();
        let mut solver = Solver::new();

        for element in &elements {
            solver.add_constraints([
                element.size.greater_or_equal(0.0),
                element.cross_size.greater_or_equal(0.0),
                element.start.greater_or_equal(f64::from(primary.start)),
                element.cross_start.greater_or_equal(f64::from(cross.start)),
                (element.start + element.size).less_or_equal(f64::from(primary.end)),
                (element.cross_start + element.cross_size).less_or_equal(f64::from(cross.end)),
            ])?;
        }

        if let Some(first) = elements.first() {
            solver.add_constraint(first.start.equal_to(f64::from(primary.start)))?;
        }
        if self.expand_to_fill
            && let Some(last) = elements.last()
        {
            solver.add_constraint((last.start + last.size).equal_to(f64::from(primary.end)))?;
        }
        for pair in elements.windows(2) {
            solver.add_constraint((pair[0].start + pair[0].size).equal_to(pair[1].start))?;
        }

        for (element, constraint) in elements.iter().zip(&self.constraints) {
            solver.add_constraints([
                element.cross_start.equal_to(f64::from(cross.start)),
                element.cross_size.equal_to(f64::from(cross.len)),
                size_preference(*constraint, element.size, primary.len),
            ])?;
        }

        let mut rects = Vec::with_capacity(elements.len());
        let mut cursor = primary.start;
        for (index, element) in elements.iter().enumerate() {
            let start_value = solver.value_of(element.start);
            let start = primary.clamp(start_value).max(cursor);
            let end = if self.expand_to_fill && index + 1 == elements.len() {
                primary.end
            } else {
                primary
                    .clamp(start_value + solver.value_of(element.size))
                    .max(start)
            };
            cursor = end;

            let cross_start = cross.clamp(solver.value_of(element.cross_start));
            let cross_end = cross
                .clamp(solver.value_of(element.cross_start) + solver.value_of(element.cross_size))
                .max(cross_start);

            rects.push(match self.direction {
                Direction::Horizontal => Rect {
                    x: start,
                    y: cross_start,
                    width: end - start,
                    height: cross_end - cross_start,
                },
                Direction::Vertical => Rect {
                    x: cross_start,
                    y: start,
                    width: cross_end - cross_start,
                    height: end - start,
                },
            });
        }

        Ok(Rc::from(rects))
    }
}

/// The weak sizing preference for one slot.
fn size_preference(constraint: Constraint, size: Variable, available: u16) -> LinearConstraint {
    let target = f64::from(constraint.apply(available));
    let preference = match constraint {
        Constraint::Length(_) | Constraint::Percentage(_) | Constraint::Ratio(..) => {
            size.equal_to(target)
        }
        Constraint::Min(_) => size.greater_or_equal(target),
        Constraint::Max(max) => size.less_or_equal(f64::from(max)),
    };
    preference.with_strength(Strength::WEAK)
}
