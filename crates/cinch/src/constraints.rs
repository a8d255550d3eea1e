//! Constraint calculation.
//!
//! A constraint `a -> b` states that `a` has to end at least the spacing
//! between both nodes before `b` starts along the compaction axis. The
//! calculators derive these edges from the canonical hitboxes: two nodes
//! constrain each other when their cross-axis extents overlap once the
//! cross-axis spacing is taken into account.
//!
//! # Overview
//!
//! - [`ConstraintAlgorithm::Quadratic`] - Tests every ordered pair of nodes.
//! - [`ConstraintAlgorithm::Scanline`] - Sweeps the cross axis and only
//!   connects nodes that become neighbors, producing a sparser but
//!   equivalent graph.
//!
//! Neither calculator ever adds an edge between two nodes of the same group
//! or from a node to one of its children. Both orient every edge by the same
//! precedence, so each pair is connected in at most one direction.

mod quadratic;
mod scanline;

use std::cmp::Ordering;

use serde::Deserialize;

use cinch_core::geometry::Rect;

use crate::{
    canonical::CanonicalView,
    graph::{Graph, NodeId},
    spacing::SpacingHandler,
};

/// Strategy used to derive constraint edges from the geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintAlgorithm {
    /// Pairwise comparison of all nodes.
    Quadratic,
    /// Sweep along the cross axis with an ordered active set.
    #[default]
    Scanline,
}

impl ConstraintAlgorithm {
    /// Adds the geometric constraints of the pass to `graph`.
    ///
    /// Existing constraints are kept, duplicates are skipped.
    pub(crate) fn calculate(
        self,
        graph: &mut Graph,
        view: &CanonicalView,
        spacing: &dyn SpacingHandler,
    ) {
        match self {
            Self::Quadratic => quadratic::calculate(graph, view, spacing),
            Self::Scanline => scanline::calculate(graph, view, spacing),
        }
    }
}

/// Orders two nodes along the compaction axis.
///
/// Nodes are ordered by position, then by cross-axis extent, then by id.
/// This is a total order, so of two nodes exactly one precedes the other
/// and the resulting constraint graph is acyclic.
fn precedence(a: Rect, a_id: NodeId, b: Rect, b_id: NodeId) -> Ordering {
    a.x()
        .total_cmp(&b.x())
        .then_with(|| a.height().total_cmp(&b.height()))
        .then_with(|| a_id.cmp(&b_id))
}
