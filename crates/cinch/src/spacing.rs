//! Spacing policies.
//!
//! The engine never invents gaps between rectangles. It asks a
//! [`SpacingHandler`] for the minimum distance two nodes need along the
//! horizontal or vertical axis.
//!
//! Which axis is asked depends on the phase of a pass:
//! - constraint calculation asks for the spacing along the cross axis,
//!   since it decides whether two nodes overlap closely enough to
//!   constrain each other
//! - compaction asks for the spacing along the compaction axis

use cinch_core::direction::{Axis, Direction};

use crate::graph::Node;

/// Supplies the minimum gap between two nodes.
///
/// Implementations should be symmetric. The engine passes the node that
/// comes first along the relevant axis as `a` where it knows the order.
pub trait SpacingHandler {
    /// Returns the minimum horizontal gap between `a` and `b`.
    fn horizontal_spacing(&self, a: &Node, b: &Node) -> f64;

    /// Returns the minimum vertical gap between `a` and `b`.
    fn vertical_spacing(&self, a: &Node, b: &Node) -> f64;

    /// Returns the gap along `axis`.
    fn spacing(&self, axis: Axis, a: &Node, b: &Node) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal_spacing(a, b),
            Axis::Vertical => self.vertical_spacing(a, b),
        }
    }

    /// Returns the gap along the compaction axis of `direction`.
    fn axis_spacing(&self, direction: Direction, a: &Node, b: &Node) -> f64 {
        self.spacing(direction.axis(), a, b)
    }

    /// Returns the gap along the cross axis of `direction`.
    fn cross_spacing(&self, direction: Direction, a: &Node, b: &Node) -> f64 {
        self.spacing(direction.axis().cross(), a, b)
    }
}

/// The same spacing for every pair of nodes.
///
/// The default leaves no gap at all.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UniformSpacing {
    horizontal: f64,
    vertical: f64,
}

impl UniformSpacing {
    /// Creates a policy with separate horizontal and vertical gaps.
    pub fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Creates a policy using `spacing` along both axes.
    pub fn uniform(spacing: f64) -> Self {
        Self::new(spacing, spacing)
    }

    pub fn horizontal(&self) -> f64 {
        self.horizontal
    }

    pub fn vertical(&self) -> f64 {
        self.vertical
    }
}

impl SpacingHandler for UniformSpacing {
    fn horizontal_spacing(&self, _a: &Node, _b: &Node) -> f64 {
        self.horizontal
    }

    fn vertical_spacing(&self, _a: &Node, _b: &Node) -> f64 {
        self.vertical
    }
}
