//! Compaction directions and the canonical coordinate space.
//!
//! The compaction algorithms only know one direction: they pull rectangles
//! toward decreasing x-coordinates. Every [`Direction`] therefore defines a
//! transformation into that canonical space and back:
//!
//! | Direction | Into canonical space          | Canonical axis        |
//! |-----------|-------------------------------|-----------------------|
//! | `Left`    | identity                      | original x            |
//! | `Right`   | mirror at the y-axis          | negated original x    |
//! | `Up`      | transpose                     | original y            |
//! | `Down`    | transpose, then mirror        | negated original y    |
//!
//! The transformations are applied to copies of the rectangles, the
//! caller's geometry is only written once the result is known.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{Point, Rect, Size};

/// One of the two axes of the layout plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The x-axis.
    Horizontal,
    /// The y-axis.
    Vertical,
}

impl Axis {
    /// Returns the perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// The direction rectangles are pulled toward during one compaction pass.
///
/// # Examples
///
/// ```
/// # use cinch_core::direction::{Axis, Direction};
/// # use cinch_core::geometry::Rect;
/// let rect = Rect::new(30.0, 10.0, 20.0, 5.0);
///
/// let canonical = Direction::Right.to_canonical(rect);
/// assert_eq!(canonical.x(), -50.0);
/// assert_eq!(Direction::Right.from_canonical(canonical), rect);
///
/// assert_eq!(Direction::Down.axis(), Axis::Vertical);
/// assert_eq!(Direction::Down.opposite(), Direction::Up);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward decreasing x-coordinates.
    Left,
    /// Toward increasing x-coordinates.
    Right,
    /// Toward decreasing y-coordinates.
    Up,
    /// Toward increasing y-coordinates.
    Down,
}

impl Direction {
    /// Returns all four directions in declaration order.
    pub fn all() -> [Direction; 4] {
        [Self::Left, Self::Right, Self::Up, Self::Down]
    }

    /// Returns the axis positions change along.
    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }

    /// Returns true for [`Direction::Left`] and [`Direction::Right`].
    pub fn is_horizontal(self) -> bool {
        self.axis() == Axis::Horizontal
    }

    /// Returns the direction pointing the other way along the same axis.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Returns true if the canonical space is mirrored for this direction.
    fn is_mirrored(self) -> bool {
        matches!(self, Self::Right | Self::Down)
    }

    /// Maps a rectangle from layout space into canonical space.
    pub fn to_canonical(self, rect: Rect) -> Rect {
        let rect = if self.is_horizontal() {
            rect
        } else {
            rect.transpose()
        };
        if self.is_mirrored() {
            rect.mirror_x()
        } else {
            rect
        }
    }

    /// Maps a rectangle from canonical space back into layout space.
    ///
    /// This is the inverse of [`Direction::to_canonical`].
    pub fn from_canonical(self, rect: Rect) -> Rect {
        let rect = if self.is_mirrored() {
            rect.mirror_x()
        } else {
            rect
        };
        if self.is_horizontal() {
            rect
        } else {
            rect.transpose()
        }
    }

    /// Returns a group member's canonical x-offset from its group reference.
    ///
    /// `offset` is the member's layout-space offset from the reference,
    /// `member` and `reference` are the layout-space sizes of both nodes.
    /// Mirroring measures offsets from the right border, hence the sizes.
    pub fn canonical_offset(self, offset: Point, member: Size, reference: Size) -> f64 {
        match self {
            Self::Left => offset.x(),
            Self::Right => -offset.x() - member.width() + reference.width(),
            Self::Up => offset.y(),
            Self::Down => -offset.y() - member.height() + reference.height(),
        }
    }

    /// Converts a canonical movement into a layout-space displacement.
    ///
    /// `moved` is how far something travelled toward smaller canonical
    /// coordinates. The result is negative when it moved toward smaller
    /// layout coordinates and positive otherwise, whatever the direction.
    pub fn normalize_delta(self, moved: f64) -> f64 {
        if self.is_mirrored() { moved } else { -moved }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Error returned when parsing an unknown direction name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown compaction direction `{0}`")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// The set of directions a graph may be compacted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionSet {
    bits: u8,
}

impl DirectionSet {
    /// A set containing no direction.
    pub fn empty() -> Self {
        Self { bits: 0 }
    }

    /// A set containing all four directions.
    pub fn all() -> Self {
        Direction::all().into_iter().collect()
    }

    /// A set containing [`Direction::Left`] and [`Direction::Right`].
    pub fn horizontal() -> Self {
        [Direction::Left, Direction::Right].into_iter().collect()
    }

    /// A set containing [`Direction::Up`] and [`Direction::Down`].
    pub fn vertical() -> Self {
        [Direction::Up, Direction::Down].into_iter().collect()
    }

    fn bit(direction: Direction) -> u8 {
        match direction {
            Direction::Left => 1,
            Direction::Right => 1 << 1,
            Direction::Up => 1 << 2,
            Direction::Down => 1 << 3,
        }
    }

    /// Adds a direction to the set.
    pub fn with(mut self, direction: Direction) -> Self {
        self.bits |= Self::bit(direction);
        self
    }

    /// Returns true if the direction is part of the set.
    pub fn contains(self, direction: Direction) -> bool {
        self.bits & Self::bit(direction) != 0
    }
}

impl Default for DirectionSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<T: IntoIterator<Item = Direction>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}
