//! The canonical view of a graph for one compaction pass.
//!
//! A [`CanonicalView`] holds copies of every hitbox mapped into the
//! canonical space of the pass direction, where compaction always pulls
//! toward decreasing x. The constraint calculators and the compaction
//! algorithm only look at this view, so the caller's rectangles are
//! untouched until [`CanonicalView::write_back`] maps the results back.
//!
//! Entries are indexed by [`NodeId::index`].

use cinch_core::{direction::Direction, geometry::Rect};

use crate::graph::{Graph, NodeId};

/// Canonical hitboxes, group offsets and locks of one pass.
#[derive(Debug, Clone)]
pub(crate) struct CanonicalView {
    direction: Direction,
    original: Vec<Rect>,
    hitboxes: Vec<Rect>,
    offsets: Vec<f64>,
    locked: Vec<bool>,
}

impl CanonicalView {
    /// Maps every node of `graph` into the canonical space of `direction`.
    ///
    /// Every node must already belong to a group.
    pub(crate) fn new(graph: &Graph, direction: Direction) -> Self {
        let hitboxes: Vec<Rect> = graph
            .nodes()
            .map(|node| direction.to_canonical(node.hitbox()))
            .collect();
        let offsets = graph
            .nodes()
            .map(|node| {
                let group = graph.group(node.group_unchecked());
                let reference = graph.node(group.reference()).hitbox();
                direction.canonical_offset(
                    node.group_offset(),
                    node.hitbox().size(),
                    reference.size(),
                )
            })
            .collect();

        Self {
            direction,
            original: hitboxes.clone(),
            locked: vec![false; hitboxes.len()],
            hitboxes,
            offsets,
        }
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn len(&self) -> usize {
        self.hitboxes.len()
    }

    /// Returns the canonical hitbox of a node.
    pub(crate) fn hitbox(&self, id: NodeId) -> Rect {
        self.hitboxes[id.index()]
    }

    /// Returns the canonical position of a node along the compaction axis.
    pub(crate) fn x(&self, id: NodeId) -> f64 {
        self.hitboxes[id.index()].x()
    }

    /// Returns the extent of a node along the compaction axis.
    pub(crate) fn width(&self, id: NodeId) -> f64 {
        self.hitboxes[id.index()].width()
    }

    /// Returns the canonical distance from the group's reference node.
    pub(crate) fn offset(&self, id: NodeId) -> f64 {
        self.offsets[id.index()]
    }

    pub(crate) fn set_x(&mut self, id: NodeId, x: f64) {
        let hitbox = &mut self.hitboxes[id.index()];
        *hitbox = hitbox.with_x(x);
    }

    /// Returns true if the node may not be pulled below its current position.
    pub(crate) fn is_locked(&self, id: NodeId) -> bool {
        self.locked[id.index()]
    }

    pub(crate) fn lock(&mut self, id: NodeId) {
        self.locked[id.index()] = true;
    }

    /// Returns the number of locked nodes.
    pub(crate) fn locked_count(&self) -> usize {
        self.locked.iter().filter(|&&locked| locked).count()
    }

    /// Returns the smallest canonical position of any node.
    pub(crate) fn min_x(&self) -> Option<f64> {
        self.hitboxes.iter().map(|hitbox| hitbox.x()).reduce(f64::min)
    }

    /// Returns the extent the nodes occupy along the compaction axis.
    pub(crate) fn strip_size(&self) -> f64 {
        let Some(min_x) = self.min_x() else {
            return 0.0;
        };
        let max_x = self
            .hitboxes
            .iter()
            .map(|hitbox| hitbox.max_x())
            .fold(f64::NEG_INFINITY, f64::max);
        max_x - min_x
    }

    /// Writes the canonical positions back into the caller's hitboxes.
    ///
    /// Nodes that kept their canonical position are skipped, so they do not
    /// pick up rounding noise from the inverse transformation.
    pub(crate) fn write_back(&self, graph: &mut Graph) {
        let direction = self.direction;
        for (node, (hitbox, original)) in graph
            .nodes_mut()
            .zip(self.hitboxes.iter().zip(&self.original))
        {
            if hitbox.x() != original.x() {
                let layout = direction.from_canonical(*hitbox);
                node.set_position(layout.x(), layout.y());
            }
        }
    }
}
