//! Rect: A rectangle primitive for cell placement.
//!
//! Unlike a screen-space rectangle, the origin is signed: a cell that has
//! slid out of the viewport sits at a negative `y`, and a staged cell waits
//! just below the bottom edge.

/// A rectangle defined by a signed origin and an unsigned size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: i32,
    /// Y coordinate of the top-left corner.
    pub y: i32,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle anchored at the origin.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Get the area (number of cells).
    #[inline]
    pub const fn area(&self) -> u32 {
        (self.width as u32) * (self.height as u32)
    }

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this rectangle intersects with another.
    #[inline]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// The same size, moved vertically by `dy`.
    #[inline]
    #[must_use]
    pub const fn offset_y(&self, dy: i32) -> Self {
        Self::new(self.x, self.y + dy, self.width, self.height)
    }

    /// The slot directly above this one (a cell that has rolled out).
    #[inline]
    #[must_use]
    pub const fn above(&self) -> Self {
        self.offset_y(-(self.height as i32))
    }

    /// The slot directly below this one (a cell waiting to roll in).
    #[inline]
    #[must_use]
    pub const fn below(&self) -> Self {
        self.offset_y(self.height as i32)
    }

    /// The part of this rectangle that lies inside `clip`, if any.
    pub fn intersection(&self, clip: &Self) -> Option<Self> {
        if !self.intersects(clip) {
            return None;
        }
        let x = self.x.max(clip.x);
        let y = self.y.max(clip.y);
        let right = self.right().min(clip.right());
        let bottom = self.bottom().min(clip.bottom());
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let clipped = Self::new(x, y, (right - x) as u16, (bottom - y) as u16);
        Some(clipped)
    }

    /// Interpolate the origin between `self` and `to`.
    ///
    /// `t` is clamped to `0.0..=1.0`. The size is taken from `to`.
    #[must_use]
    pub fn lerp(&self, to: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation)]
        let mix = |a: i32, b: i32| -> i32 {
            (a as f32 + (b - a) as f32 * t).round() as i32
        };
        Self::new(mix(self.x, to.x), mix(self.y, to.y), to.width, to.height)
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}
