//! Geometric primitives for compaction.
//!
//! This module provides the rectangle model the compaction engine works on,
//! together with the small amount of vector math needed to express group
//! offsets and movement.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate or offset
//! - [`Size`] - Width and height dimensions
//! - [`Rect`] - An axis-aligned rectangle anchored at its top-left corner
//!
//! # Coordinate System
//!
//! Cinch uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward (positive to the right)
//! - **Y-axis**: Increases downward (positive downward)
//!
//! Compaction always happens along the canonical x-axis. The
//! [`direction`](crate::direction) module maps the four compaction
//! directions onto that canonical space by transposing and mirroring
//! rectangles with [`Rect::transpose`] and [`Rect::mirror_x`].

/// A 2D point representing a position or offset in layout space.
///
/// # Examples
///
/// ```
/// # use cinch_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let diff = p1.sub_point(p2);
/// assert_eq!(diff.x(), 5.0);
/// assert_eq!(diff.y(), 15.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Represents the dimensions of a rectangle with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }
}

/// An axis-aligned rectangle given by its top-left corner and its size.
///
/// This is the hitbox of everything the compactor moves. Unlike a
/// min/max bounding box it keeps width and height as primary values, since
/// compaction only ever changes the position and never the extent.
///
/// # Examples
///
/// ```
/// # use cinch_core::geometry::Rect;
/// let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
///
/// assert_eq!(rect.max_x(), 40.0);
/// assert_eq!(rect.max_y(), 60.0);
/// assert_eq!(rect.center().x(), 25.0);
///
/// // Transposing swaps the roles of the axes
/// let transposed = rect.transpose();
/// assert_eq!(transposed.x(), 20.0);
/// assert_eq!(transposed.width(), 40.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and dimensions
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the x-coordinate of the left border
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the top border
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the width of the rectangle
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height of the rectangle
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns the x-coordinate of the right border
    pub fn max_x(self) -> f64 {
        self.x + self.width
    }

    /// Returns the y-coordinate of the bottom border
    pub fn max_y(self) -> f64 {
        self.y + self.height
    }

    /// Returns the top-left corner as a Point
    pub fn position(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the dimensions as a Size
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the center point of the rectangle
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns a copy with the left border moved to `x`
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Returns a copy with the top border moved to `y`
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Returns the smallest rectangle containing both rectangles
    pub fn merge(self, other: Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: self.max_x().max(other.max_x()) - x,
            height: self.max_y().max(other.max_y()) - y,
        }
    }

    /// Swaps the roles of the x- and y-axis.
    ///
    /// Applying it twice yields the original rectangle.
    pub fn transpose(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
            width: self.height,
            height: self.width,
        }
    }

    /// Mirrors the rectangle at the y-axis.
    ///
    /// The right border becomes the left border, so that what was the
    /// largest x-coordinate becomes the smallest. Applying it twice yields
    /// the original rectangle.
    pub fn mirror_x(self) -> Self {
        Self {
            x: -self.x - self.width,
            ..self
        }
    }

}
