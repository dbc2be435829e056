#![forbid(unsafe_code)]

//! Geometric primitives.

/// Largest number of cells a [`Rect`] built with [`Rect::new`] may cover.
///
/// Buffers allocate one cell per unit of area, so pathological resize
/// reports (e.g. `u16::MAX x u16::MAX`) are scaled down to this cap.
pub const MAX_AREA: u32 = u16::MAX as u32;

/// A position in terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl Position {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new position.
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl From<(u16, u16)> for Position {
    fn from((x, y): (u16, u16)) -> Self {
        Self::new(x, y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle used for layout bounds and buffer areas.
///
/// Uses terminal coordinates (0-indexed, origin at top-left). Fields are
/// public for pattern matching; [`Rect::new`] is the constructor that
/// enforces the [`MAX_AREA`] cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Create a new rectangle.
    ///
    /// If `width * height` exceeds [`MAX_AREA`], both dimensions are scaled
    /// down proportionally so the aspect ratio is kept (up to rounding).
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        let (width, height) = clamp_to_max_area(width, height);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Left edge (inclusive). Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> u16 {
        self.x
    }

    /// Top edge (inclusive). Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> u16 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Top-left corner.
    #[inline]
    pub const fn as_position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    pub const fn as_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Copy of this rectangle moved to `(x, y)`.
    #[inline]
    pub const fn with_position(self, x: u16, y: u16) -> Self {
        Self { x, y, ..self }
    }

    /// Copy of this rectangle with a new width.
    #[inline]
    pub const fn with_width(self, width: u16) -> Self {
        Self { width, ..self }
    }

    /// Copy of this rectangle with a new height.
    #[inline]
    pub const fn with_height(self, height: u16) -> Self {
        Self { height, ..self }
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, position: Position) -> bool {
        position.x >= self.x
            && position.x < self.right()
            && position.y >= self.y
            && position.y < self.bottom()
    }

    /// Check whether two rectangles share at least one cell.
    #[inline]
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns an empty rectangle if the rectangles don't overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect {
                x,
                y,
                width: right - x,
                height: bottom - y,
            })
        } else {
            None
        }
    }

    /// The smallest rectangle that contains both rectangles.
    ///
    /// The result is not capped; buffers merged this way may exceed
    /// [`MAX_AREA`].
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Rect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }

    /// Shrink the rectangle by `margin` on both sides of each axis.
    ///
    /// If twice the margin exceeds either dimension the result collapses to
    /// a zero-area rectangle at the original origin.
    pub fn inner(&self, margin: Margin) -> Rect {
        let doubled_horizontal = u32::from(margin.horizontal) * 2;
        let doubled_vertical = u32::from(margin.vertical) * 2;
        if u32::from(self.width) < doubled_horizontal || u32::from(self.height) < doubled_vertical
        {
            return Rect {
                x: self.x,
                y: self.y,
                width: 0,
                height: 0,
            };
        }

        Rect {
            x: self.x.saturating_add(margin.horizontal),
            y: self.y.saturating_add(margin.vertical),
            width: self.width - margin.horizontal * 2,
            height: self.height - margin.vertical * 2,
        }
    }
}

fn clamp_to_max_area(width: u16, height: u16) -> (u16, u16) {
    if u32::from(width) * u32::from(height) <= MAX_AREA {
        return (width, height);
    }
    let aspect_ratio = f64::from(width) / f64::from(height);
    let clamped_height = (f64::from(MAX_AREA) / aspect_ratio).sqrt();
    let clamped_width = clamped_height * aspect_ratio;
    // Truncation keeps the product at or below the cap.
    (clamped_width as u16, clamped_height as u16)
}

/// Symmetric padding: `horizontal` is removed from both the left and right
/// sides, `vertical` from both the top and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Margin {
    /// Cells removed from the left and from the right.
    pub horizontal: u16,
    /// Cells removed from the top and from the bottom.
    pub vertical: u16,
}

impl Margin {
    /// Create a new margin.
    pub const fn new(horizontal: u16, vertical: u16) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Same margin on both axes.
    pub const fn uniform(value: u16) -> Self {
        Self::new(value, value)
    }
}

impl From<u16> for Margin {
    fn from(value: u16) -> Self {
        Self::uniform(value)
    }
}
