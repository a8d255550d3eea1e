//! The box model the compaction engine operates on.
//!
//! This module provides the arena that owns every rectangle of one layout
//! region together with its grouping and the constraint edges discovered
//! by the constraint calculators.
//!
//! # Architecture
//!
//! The module provides:
//! - [`NodeId`] / [`GroupId`]: Indices into the arena
//! - [`Node`]: One rectangle under compaction
//! - [`Group`]: A set of nodes that translate together
//! - [`Graph`]: The arena of nodes and groups
//!
//! Nodes and groups reference each other by index only. Rectangles are
//! stored by value inside the nodes, so a compaction pass writes its results
//! straight into the arena.
//!
//! Constraint edges point from the constraining node to the constrained
//! one: if `b` is in `a`'s constraints, `a` must end up at least the
//! required spacing before `b` along the compaction axis of the last pass.

use std::fmt;

use petgraph::{algo, graph::DiGraph};

use cinch_core::{
    direction::{Axis, Direction, DirectionSet},
    geometry::{Point, Rect},
};

use crate::error::CompactionError;

// =============================================================================
// Identifiers
// =============================================================================

/// Index of a [`Node`] inside its [`Graph`].
///
/// Identifiers are handed out in insertion order and stay valid for the
/// lifetime of the graph, since the engine never removes nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Returns the position of the node inside the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a [`Group`] inside its [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl GroupId {
    /// Returns the position of the group inside the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

// =============================================================================
// Nodes
// =============================================================================

/// Sides of a node whose spacing is not added when testing for overlaps.
///
/// Sides are given in layout space. They only matter for the scanline
/// constraint calculation, which inflates every node along the cross axis
/// before sweeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpacingIgnore {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl SpacingIgnore {
    /// Ignores the spacing on the top side.
    pub fn with_up(mut self) -> Self {
        self.up = true;
        self
    }

    /// Ignores the spacing on the bottom side.
    pub fn with_down(mut self) -> Self {
        self.down = true;
        self
    }

    /// Ignores the spacing on the left side.
    pub fn with_left(mut self) -> Self {
        self.left = true;
        self
    }

    /// Ignores the spacing on the right side.
    pub fn with_right(mut self) -> Self {
        self.right = true;
        self
    }

    /// Returns the flags of the lower and upper cross-axis border in the
    /// canonical space of `direction`.
    ///
    /// Mirroring only affects the compaction axis, so the cross axis of
    /// horizontal directions is always top-to-bottom and the one of
    /// vertical directions always left-to-right.
    pub(crate) fn cross_axis(self, direction: Direction) -> (bool, bool) {
        if direction.is_horizontal() {
            (self.up, self.down)
        } else {
            (self.left, self.right)
        }
    }
}

/// A rectangle under compaction.
///
/// Nodes are created with [`Node::new`], configured with the `with_*`
/// methods and handed to [`Graph::add_node`], which assigns the identifier.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    hitbox: Rect,
    group: Option<GroupId>,
    group_offset: Point,
    constraints: Vec<NodeId>,
    parent: Option<NodeId>,
    spacing_ignore: SpacingIgnore,
    reposition: bool,
    start_pos: f64,
}

impl Node {
    /// Creates a free, ungrouped node with the given hitbox.
    pub fn new(hitbox: Rect) -> Self {
        Self {
            id: NodeId(0),
            hitbox,
            group: None,
            group_offset: Point::default(),
            constraints: Vec::new(),
            parent: None,
            spacing_ignore: SpacingIgnore::default(),
            reposition: true,
            start_pos: f64::NEG_INFINITY,
        }
    }

    /// Sets the hierarchical parent. A parent never constrains its children.
    ///
    /// The parent has to be added to the graph before the child; a link to
    /// a node that does not exist yet is dropped by [`Graph::add_node`].
    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets whether the node may be pulled tighter than its current position.
    pub fn with_reposition(mut self, reposition: bool) -> Self {
        self.reposition = reposition;
        self
    }

    /// Sets the sides whose spacing is ignored during overlap detection.
    pub fn with_spacing_ignore(mut self, spacing_ignore: SpacingIgnore) -> Self {
        self.spacing_ignore = spacing_ignore;
        self
    }

    /// Returns the identifier assigned by [`Graph::add_node`].
    ///
    /// A node that has not been added to a graph has no identifier yet and
    /// reports [`NodeId`] `0`. Nodes reached through a [`Graph`] always
    /// report their own handle.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node's rectangle in layout space.
    pub fn hitbox(&self) -> Rect {
        self.hitbox
    }

    /// Replaces the node's rectangle.
    ///
    /// Group offsets are not updated; call
    /// [`Graph::calculate_group_offsets`] after moving grouped nodes.
    pub fn set_hitbox(&mut self, hitbox: Rect) {
        self.hitbox = hitbox;
    }

    pub(crate) fn set_position(&mut self, x: f64, y: f64) {
        self.hitbox = self.hitbox.with_x(x).with_y(y);
    }

    /// Returns the group of the node, `None` until it is grouped.
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// Returns the layout-space offset from the group's reference node.
    pub fn group_offset(&self) -> Point {
        self.group_offset
    }

    /// Returns the nodes this node has to precede, as computed by the last pass.
    pub fn constraints(&self) -> &[NodeId] {
        &self.constraints
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn spacing_ignore(&self) -> SpacingIgnore {
        self.spacing_ignore
    }

    /// Returns true if the node may be pulled tighter than its current position.
    pub fn reposition(&self) -> bool {
        self.reposition
    }

    pub fn set_reposition(&mut self, reposition: bool) {
        self.reposition = reposition;
    }

    /// Returns the canonical position assigned by the last pass.
    ///
    /// This is negative infinity before the first pass.
    pub fn start_pos(&self) -> f64 {
        self.start_pos
    }

    pub(crate) fn set_start_pos(&mut self, start_pos: f64) {
        self.start_pos = start_pos;
    }

    pub(crate) fn group_unchecked(&self) -> GroupId {
        self.group
            .expect("Nodes are wrapped into groups before compaction")
    }
}

// =============================================================================
// Groups
// =============================================================================

/// A set of nodes that moves as one rigid body.
#[derive(Debug, Clone)]
pub struct Group {
    id: GroupId,
    nodes: Vec<NodeId>,
    reference: NodeId,
    reposition: bool,
    out_degree: usize,
    start_pos: f64,
    delta: f64,
    delta_normalized: f64,
}

impl Group {
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Returns the members of the group, including the reference node.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Returns the node movement of the group is measured by.
    pub fn reference(&self) -> NodeId {
        self.reference
    }

    /// Returns false if the whole group is pinned to its current position.
    pub fn reposition(&self) -> bool {
        self.reposition
    }

    pub fn set_reposition(&mut self, reposition: bool) {
        self.reposition = reposition;
    }

    /// Returns the number of constraints from other groups not yet discharged.
    pub fn out_degree(&self) -> usize {
        self.out_degree
    }

    /// Returns the canonical position of the reference node.
    pub fn start_pos(&self) -> f64 {
        self.start_pos
    }

    /// Returns the accumulated canonical movement of the reference node.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns the accumulated layout-space displacement of the reference node.
    ///
    /// Negative values mean the group moved toward smaller coordinates.
    pub fn delta_normalized(&self) -> f64 {
        self.delta_normalized
    }

    /// Forgets the movement accumulated so far.
    pub fn reset_deltas(&mut self) {
        self.delta = 0.0;
        self.delta_normalized = 0.0;
    }

    pub(crate) fn set_out_degree(&mut self, out_degree: usize) {
        self.out_degree = out_degree;
    }

    pub(crate) fn increment_out_degree(&mut self) {
        self.out_degree += 1;
    }

    /// Discharges one constraint and returns true once none are left.
    pub(crate) fn discharge(&mut self) -> bool {
        self.out_degree = self
            .out_degree
            .checked_sub(1)
            .expect("Constraint discharged more often than counted");
        self.out_degree == 0
    }

    pub(crate) fn set_start_pos(&mut self, start_pos: f64) {
        self.start_pos = start_pos;
    }

    pub(crate) fn raise_start_pos(&mut self, start_pos: f64) {
        self.start_pos = self.start_pos.max(start_pos);
    }

    pub(crate) fn record_movement(&mut self, moved: f64, direction: Direction) {
        self.delta += moved;
        self.delta_normalized += direction.normalize_delta(moved);
    }
}

// =============================================================================
// The arena
// =============================================================================

/// All nodes and groups of one layout region.
///
/// # Examples
///
/// ```
/// # use cinch::graph::{Graph, Node};
/// # use cinch_core::geometry::Rect;
/// let mut graph = Graph::new();
/// let a = graph.add_node(Node::new(Rect::new(0.0, 0.0, 20.0, 20.0)));
/// let b = graph.add_node(Node::new(Rect::new(40.0, 5.0, 20.0, 20.0)));
/// let c = graph.add_node(Node::new(Rect::new(30.0, 25.0, 20.0, 20.0)));
///
/// let group = graph.add_group(&[b, c]).expect("valid group");
/// assert_eq!(graph.group(group).reference(), b);
/// assert_eq!(graph.node(c).group_offset().x(), -10.0);
/// assert_eq!(graph.node(a).group(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    groups: Vec<Group>,
    directions: DirectionSet,
    predefined_constraints: Vec<(Axis, NodeId, NodeId)>,
}

impl Graph {
    /// Creates an empty graph that may be compacted in every direction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph restricted to the given directions.
    pub fn with_directions(directions: DirectionSet) -> Self {
        Self {
            directions,
            ..Self::default()
        }
    }

    /// Returns true if the graph may be compacted in `direction`.
    pub fn supports(&self, direction: Direction) -> bool {
        self.directions.contains(direction)
    }

    /// Adds a node and returns its identifier.
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.id = id;
        node.group = None;
        node.constraints.clear();
        if node.parent.is_some_and(|parent| parent.0 >= id.0) {
            node.parent = None;
        }
        self.nodes.push(node);
        id
    }

    /// Groups the given nodes, using the first one as reference.
    ///
    /// # Errors
    ///
    /// Returns an error if `nodes` is empty, names an unknown node, or
    /// names a node that is already part of a group.
    pub fn add_group(&mut self, nodes: &[NodeId]) -> Result<GroupId, CompactionError> {
        let reference = *nodes.first().ok_or(CompactionError::EmptyGroup)?;
        self.add_group_with_reference(nodes, reference)
    }

    /// Groups the given nodes around an explicit reference node.
    ///
    /// # Errors
    ///
    /// Same as [`Graph::add_group`], and additionally if `reference` is not
    /// one of `nodes`.
    pub fn add_group_with_reference(
        &mut self,
        nodes: &[NodeId],
        reference: NodeId,
    ) -> Result<GroupId, CompactionError> {
        if nodes.is_empty() {
            return Err(CompactionError::EmptyGroup);
        }
        for (position, &node) in nodes.iter().enumerate() {
            let member = self.get_node(node).ok_or(CompactionError::UnknownNode(node))?;
            if member.group.is_some() || nodes[..position].contains(&node) {
                return Err(CompactionError::AlreadyGrouped(node));
            }
        }
        if !nodes.contains(&reference) {
            return Err(CompactionError::ReferenceNotMember(reference));
        }

        let id = GroupId(self.groups.len());
        let origin = self.nodes[reference.0].hitbox.position();
        for &node in nodes {
            let member = &mut self.nodes[node.0];
            member.group = Some(id);
            member.group_offset = member.hitbox.position().sub_point(origin);
        }
        self.groups.push(Group {
            id,
            nodes: nodes.to_vec(),
            reference,
            reposition: true,
            out_degree: 0,
            start_pos: f64::NEG_INFINITY,
            delta: 0.0,
            delta_normalized: 0.0,
        });
        Ok(id)
    }

    /// Registers a constraint that holds regardless of the geometry.
    ///
    /// `first` precedes `second` along `axis`: it stays left of (or above)
    /// `second` when compacting toward [`Direction::Left`] (or
    /// [`Direction::Up`]), and the edge is reversed for the opposite
    /// directions.
    ///
    /// # Errors
    ///
    /// Returns an error if either node is unknown.
    pub fn add_predefined_constraint(
        &mut self,
        axis: Axis,
        first: NodeId,
        second: NodeId,
    ) -> Result<(), CompactionError> {
        for node in [first, second] {
            self.get_node(node).ok_or(CompactionError::UnknownNode(node))?;
        }
        self.predefined_constraints.push((axis, first, second));
        Ok(())
    }

    /// Returns the predefined constraint edges for a pass in `direction`.
    pub(crate) fn predefined_constraints(
        &self,
        direction: Direction,
    ) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        let forward = matches!(direction, Direction::Left | Direction::Up);
        self.predefined_constraints
            .iter()
            .filter(move |(axis, _, _)| *axis == direction.axis())
            .map(move |&(_, first, second)| {
                if forward {
                    (first, second)
                } else {
                    (second, first)
                }
            })
    }

    /// Returns the node with the given identifier.
    ///
    /// # Panics
    /// Panics if the node does not belong to this graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Returns the node with the given identifier mutably.
    ///
    /// # Panics
    /// Panics if the node does not belong to this graph.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Returns the node with the given identifier, if it exists.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Returns the group with the given identifier.
    ///
    /// # Panics
    /// Panics if the group does not belong to this graph.
    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }

    /// Returns the group with the given identifier mutably.
    ///
    /// # Panics
    /// Panics if the group does not belong to this graph.
    pub fn group_mut(&mut self, id: GroupId) -> &mut Group {
        &mut self.groups[id.0]
    }

    /// Returns an iterator over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Returns an iterator over all groups.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub(crate) fn groups_mut(&mut self) -> impl Iterator<Item = &mut Group> {
        self.groups.iter_mut()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the constraint targets of a node.
    pub fn constraints(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].constraints
    }

    /// Returns the total number of constraint edges.
    pub fn constraint_count(&self) -> usize {
        self.nodes.iter().map(|node| node.constraints.len()).sum()
    }

    pub(crate) fn clear_constraints(&mut self) {
        for node in &mut self.nodes {
            node.constraints.clear();
        }
    }

    /// Adds the edge `from -> to` unless it is already present.
    pub(crate) fn add_constraint(&mut self, from: NodeId, to: NodeId) {
        let constraints = &mut self.nodes[from.0].constraints;
        if !constraints.contains(&to) {
            constraints.push(to);
        }
    }

    /// Returns true if both nodes belong to the same group.
    pub(crate) fn same_group(&self, a: NodeId, b: NodeId) -> bool {
        match (self.nodes[a.0].group, self.nodes[b.0].group) {
            (Some(first), Some(second)) => first == second,
            _ => false,
        }
    }

    /// Returns true if a geometric constraint `from -> to` is permitted:
    /// the nodes are distinct, not grouped together, and `to` is not a
    /// child of `from`.
    pub(crate) fn may_constrain(&self, from: NodeId, to: NodeId) -> bool {
        from != to && !self.same_group(from, to) && self.nodes[to.0].parent != Some(from)
    }

    /// Wraps every ungrouped node into a group of its own.
    pub(crate) fn ensure_groups(&mut self) {
        for index in 0..self.nodes.len() {
            if self.nodes[index].group.is_none() {
                let id = NodeId(index);
                self.add_group(&[id])
                    .expect("An ungrouped node forms a valid group");
            }
        }
    }

    /// Recomputes every member's offset from its group's reference node.
    ///
    /// Offsets are measured between the current hitboxes, so this must be
    /// called again if the caller moved grouped nodes independently.
    pub fn calculate_group_offsets(&mut self) {
        for group in &self.groups {
            let origin = self.nodes[group.reference.0].hitbox.position();
            for &member in &group.nodes {
                let node = &mut self.nodes[member.0];
                node.group_offset = node.hitbox.position().sub_point(origin);
            }
        }
    }

    /// Returns the smallest rectangle containing every node.
    pub fn bounds(&self) -> Option<Rect> {
        self.nodes
            .iter()
            .map(|node| node.hitbox)
            .reduce(|acc, hitbox| acc.merge(hitbox))
    }

    /// Builds the group-level constraint graph.
    ///
    /// Every group becomes a node whose index equals [`GroupId::index`];
    /// every node constraint between two different groups becomes an edge.
    /// Ungrouped nodes are ignored.
    pub fn group_constraint_graph(&self) -> DiGraph<GroupId, NodeId> {
        let mut graph = DiGraph::with_capacity(self.groups.len(), self.constraint_count());
        let indices: Vec<_> = self
            .groups
            .iter()
            .map(|group| graph.add_node(group.id))
            .collect();

        for node in &self.nodes {
            let Some(from) = node.group else {
                continue;
            };
            for &target in &node.constraints {
                match self.nodes[target.0].group {
                    Some(to) if to != from => {
                        graph.add_edge(indices[from.0], indices[to.0], node.id);
                    }
                    _ => {}
                }
            }
        }
        graph
    }

    /// Returns a group that lies on a cycle of the group-level constraint
    /// graph, or `None` if the constraint graph is acyclic.
    ///
    /// Compaction terminates only on acyclic constraint graphs. The
    /// constraint calculators never produce cycles by themselves, but
    /// predefined constraints and caller-built groups can.
    pub fn find_group_cycle(&self) -> Option<GroupId> {
        let graph = self.group_constraint_graph();
        algo::toposort(&graph, None)
            .err()
            .map(|cycle| graph[cycle.node_id()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64) -> Node {
        Node::new(Rect::new(x, y, 20.0, 20.0))
    }

    #[test]
    fn test_add_node_assigns_sequential_ids() {
        let mut graph = Graph::new();
        let a = graph.add_node(square(0.0, 0.0));
        let b = graph.add_node(square(30.0, 0.0));

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(graph.node(b).id(), b);
        assert_eq!(graph.node_count(), 2);
        assert!(graph.node(a).reposition());
        assert_eq!(graph.node(a).start_pos(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_ids_follow_the_graph() {
        let node = square(0.0, 0.0).with_reposition(false);
        let mut graph = Graph::new();
        graph.add_node(square(50.0, 0.0));
        let first = graph.add_node(node.clone());
        let second = graph.add_node(node);

        assert_eq!(graph.node(first).id(), first);
        assert_eq!(graph.node(second).id(), second);
        assert_ne!(first, second);

        // a copy taken out of the graph keeps its id until it is added again
        let copy = graph.node(second).clone();
        assert_eq!(copy.id(), second);
        let third = graph.add_node(copy);
        assert_eq!(graph.node(third).id(), third);
        assert!(!graph.node(third).reposition());
    }

    #[test]
    fn test_add_group_computes_offsets() {
        let mut graph = Graph::new();
        let a = graph.add_node(square(10.0, 5.0));
        let b = graph.add_node(square(40.0, 25.0));

        let group = graph.add_group_with_reference(&[a, b], b).unwrap();

        assert_eq!(graph.group(group).reference(), b);
        assert_eq!(graph.group(group).nodes(), &[a, b]);
        assert_eq!(graph.node(a).group_offset(), Point::new(-30.0, -20.0));
        assert_eq!(graph.node(b).group_offset(), Point::default());
        assert_eq!(graph.node(a).group(), Some(group));
    }

    #[test]
    fn test_add_group_errors() {
        let mut graph = Graph::new();
        let a = graph.add_node(square(0.0, 0.0));
        let b = graph.add_node(square(30.0, 0.0));
        let c = graph.add_node(square(60.0, 0.0));

        assert_eq!(graph.add_group(&[]), Err(CompactionError::EmptyGroup));
        assert_eq!(
            graph.add_group(&[a, NodeId::new(9)]),
            Err(CompactionError::UnknownNode(NodeId::new(9)))
        );
        assert_eq!(
            graph.add_group(&[a, a]),
            Err(CompactionError::AlreadyGrouped(a))
        );
        assert_eq!(
            graph.add_group_with_reference(&[a, b], c),
            Err(CompactionError::ReferenceNotMember(c))
        );

        graph.add_group(&[a, b]).unwrap();
        assert_eq!(
            graph.add_group(&[b, c]),
            Err(CompactionError::AlreadyGrouped(b))
        );
        // failed attempts must not leave partial groups behind
        assert_eq!(graph.group_count(), 1);
        assert_eq!(graph.node(c).group(), None);
    }

    #[test]
    fn test_ensure_groups_wraps_single_nodes() {
        let mut graph = Graph::new();
        let a = graph.add_node(square(0.0, 0.0));
        let b = graph.add_node(square(30.0, 0.0));
        let c = graph.add_node(square(60.0, 0.0));
        graph.add_group(&[b, c]).unwrap();

        graph.ensure_groups();

        assert_eq!(graph.group_count(), 2);
        let group = graph.node(a).group().unwrap();
        assert_eq!(graph.group(group).nodes(), &[a]);
        assert_eq!(graph.group(group).reference(), a);
    }

    #[test]
    fn test_predefined_constraints_follow_direction() {
        let mut graph = Graph::new();
        let a = graph.add_node(square(0.0, 0.0));
        let b = graph.add_node(square(30.0, 0.0));
        graph
            .add_predefined_constraint(Axis::Horizontal, a, b)
            .unwrap();

        let left: Vec<_> = graph.predefined_constraints(Direction::Left).collect();
        let right: Vec<_> = graph.predefined_constraints(Direction::Right).collect();
        let up: Vec<_> = graph.predefined_constraints(Direction::Up).collect();

        assert_eq!(left, vec![(a, b)]);
        assert_eq!(right, vec![(b, a)]);
        assert!(up.is_empty());
        assert_eq!(
            graph.add_predefined_constraint(Axis::Vertical, a, NodeId::new(5)),
            Err(CompactionError::UnknownNode(NodeId::new(5)))
        );
    }

    #[test]
    fn test_add_constraint_deduplicates() {
        let mut graph = Graph::new();
        let a = graph.add_node(square(0.0, 0.0));
        let b = graph.add_node(square(30.0, 0.0));

        graph.add_constraint(a, b);
        graph.add_constraint(a, b);

        assert_eq!(graph.constraints(a), &[b]);
        assert_eq!(graph.constraint_count(), 1);
        graph.clear_constraints();
        assert_eq!(graph.constraint_count(), 0);
    }

    #[test]
    fn test_find_group_cycle() {
        let mut graph = Graph::new();
        let a = graph.add_node(square(0.0, 0.0));
        let b = graph.add_node(square(30.0, 0.0));
        let c = graph.add_node(square(60.0, 0.0));
        graph.ensure_groups();

        graph.add_constraint(a, b);
        graph.add_constraint(b, c);
        assert_eq!(graph.find_group_cycle(), None);
        assert_eq!(graph.group_constraint_graph().edge_count(), 2);

        graph.add_constraint(c, a);
        assert!(graph.find_group_cycle().is_some());
    }

    #[test]
    fn test_constraints_inside_a_group_are_not_group_edges() {
        let mut graph = Graph::new();
        let a = graph.add_node(square(0.0, 0.0));
        let b = graph.add_node(square(30.0, 0.0));
        graph.add_group(&[a, b]).unwrap();

        graph.add_constraint(a, b);
        graph.add_constraint(b, a);

        assert!(graph.same_group(a, b));
        assert_eq!(graph.group_constraint_graph().edge_count(), 0);
        assert_eq!(graph.find_group_cycle(), None);
    }

    #[test]
    fn test_bounds() {
        let mut graph = Graph::new();
        assert_eq!(graph.bounds(), None);

        graph.add_node(square(0.0, 10.0));
        graph.add_node(square(50.0, 0.0));

        assert_eq!(graph.bounds(), Some(Rect::new(0.0, 0.0, 70.0, 30.0)));
    }

    #[test]
    fn test_calculate_group_offsets_after_move() {
        let mut graph = Graph::new();
        let a = graph.add_node(square(0.0, 0.0));
        let b = graph.add_node(square(30.0, 0.0));
        graph.add_group(&[a, b]).unwrap();

        graph.node_mut(b).set_hitbox(Rect::new(45.0, 10.0, 20.0, 20.0));
        assert_eq!(graph.node(b).group_offset(), Point::new(30.0, 0.0));

        graph.calculate_group_offsets();
        assert_eq!(graph.node(b).group_offset(), Point::new(45.0, 10.0));
    }
}
