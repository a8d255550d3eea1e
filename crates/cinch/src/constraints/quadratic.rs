//! Pairwise constraint calculation.

use std::cmp::Ordering;

use log::trace;

use cinch_core::fuzzy;

use super::precedence;
use crate::{canonical::CanonicalView, graph::Graph, spacing::SpacingHandler};

pub(super) fn calculate(graph: &mut Graph, view: &CanonicalView, spacing: &dyn SpacingHandler) {
    let direction = view.direction();
    let mut edges = Vec::new();

    for a in graph.nodes() {
        for b in graph.nodes() {
            if !graph.may_constrain(a.id(), b.id()) {
                continue;
            }

            let first = view.hitbox(a.id());
            let second = view.hitbox(b.id());
            if precedence(first, a.id(), second, b.id()) != Ordering::Less {
                continue;
            }

            let gap = spacing.cross_spacing(direction, a, b);
            if fuzzy::gt(first.max_y() + gap, second.y())
                && fuzzy::lt(first.y(), second.max_y() + gap)
            {
                edges.push((a.id(), b.id()));
            }
        }
    }

    for (from, to) in edges {
        trace!(from:% = from, to:% = to; "Quadratic constraint");
        graph.add_constraint(from, to);
    }
}
