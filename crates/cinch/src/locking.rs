//! Locking of nodes during a compaction pass.
//!
//! A locked node may be pushed further along the compaction axis by its
//! constraints but never pulled below its position at the start of the
//! pass. A node is locked when any of the following holds:
//!
//! - its own `reposition` flag is cleared
//! - its group's `reposition` flag is cleared
//! - the pass's [`LockingStrategy`] does not let it move
//!
//! A group with a locked member cannot move below that member's position
//! either, since all members translate together.

use std::{fmt, sync::Arc};

use log::debug;

use cinch_core::direction::Direction;

use crate::{
    canonical::CanonicalView,
    graph::{Graph, Node},
};

/// Predicate deciding whether a node may move in a direction.
pub type MovePredicate = dyn Fn(&Node, Direction) -> bool + Send + Sync;

/// Per-pass rule locking nodes depending on the direction.
#[derive(Clone, Default)]
pub enum LockingStrategy {
    /// Every node may move unless its flags say otherwise.
    #[default]
    None,
    /// Nodes whose group is not constrained by any other group in the pass
    /// stay where they are.
    ///
    /// Compacting toward the opposite direction first and then back with
    /// this strategy only moves nodes that have something to close up to.
    LockSinks,
    /// A caller-supplied predicate returning `true` if the node may move.
    Custom(Arc<MovePredicate>),
}

impl LockingStrategy {
    /// Wraps a predicate returning `true` if the node may move.
    pub fn custom<F>(may_move: F) -> Self
    where
        F: Fn(&Node, Direction) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(may_move))
    }

    /// Returns true if the strategy lets `node` move in `direction`.
    ///
    /// Group out-degrees must already reflect the constraints of the pass.
    pub(crate) fn may_move(&self, graph: &Graph, node: &Node, direction: Direction) -> bool {
        match self {
            Self::None => true,
            Self::LockSinks => graph.group(node.group_unchecked()).out_degree() != 0,
            Self::Custom(may_move) => may_move(node, direction),
        }
    }

    /// Marks every locked node of `graph` in `view`.
    pub(crate) fn apply(&self, graph: &Graph, view: &mut CanonicalView) {
        let direction = view.direction();
        for node in graph.nodes() {
            let group = graph.group(node.group_unchecked());
            if !node.reposition()
                || !group.reposition()
                || !self.may_move(graph, node, direction)
            {
                view.lock(node.id());
            }
        }
        debug!(locked = view.locked_count(), strategy:? = self; "Applied locks");
    }
}

impl fmt::Debug for LockingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::LockSinks => write!(f, "LockSinks"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use cinch_core::geometry::Rect;

    use super::*;

    fn three_in_a_row() -> Graph {
        let mut graph = Graph::new();
        let a = graph.add_node(Node::new(Rect::new(0.0, 0.0, 20.0, 20.0)));
        let b = graph.add_node(Node::new(Rect::new(30.0, 0.0, 20.0, 20.0)).with_reposition(false));
        let c = graph.add_node(Node::new(Rect::new(60.0, 0.0, 20.0, 20.0)));
        graph.ensure_groups();

        graph.add_constraint(a, b);
        graph.add_constraint(b, c);
        for target in [b, c] {
            let group = graph.node(target).group_unchecked();
            graph.group_mut(group).increment_out_degree();
        }
        graph
    }

    fn locked(graph: &Graph, strategy: &LockingStrategy, direction: Direction) -> Vec<bool> {
        let mut view = CanonicalView::new(graph, direction);
        strategy.apply(graph, &mut view);
        graph.nodes().map(|node| view.is_locked(node.id())).collect()
    }

    #[test]
    fn test_reposition_flags_lock() {
        let mut graph = three_in_a_row();
        assert_eq!(
            locked(&graph, &LockingStrategy::None, Direction::Left),
            vec![false, true, false]
        );

        let group = graph.groups().last().map(|group| group.id()).unwrap();
        graph.group_mut(group).set_reposition(false);
        assert_eq!(
            locked(&graph, &LockingStrategy::None, Direction::Left),
            vec![false, true, true]
        );
    }

    #[test]
    fn test_lock_sinks() {
        let graph = three_in_a_row();
        assert_eq!(
            locked(&graph, &LockingStrategy::LockSinks, Direction::Left),
            vec![true, true, false]
        );
    }

    #[test]
    fn test_custom_strategy_sees_direction() {
        let graph = three_in_a_row();
        let strategy =
            LockingStrategy::custom(|node, direction| direction.is_horizontal() && node.id().index() != 2);

        assert_eq!(
            locked(&graph, &strategy, Direction::Right),
            vec![false, true, true]
        );
        assert_eq!(
            locked(&graph, &strategy, Direction::Down),
            vec![true, true, true]
        );
        assert_eq!(format!("{strategy:?}"), "Custom(..)");
    }
}
