//! Scanline constraint calculation.
//!
//! The sweep walks the cross axis from top to bottom in canonical space.
//! Every node opens an interval at its lower cross-axis border and closes
//! it at its upper border. While open, a node sits in an active set ordered
//! by the center of its compaction-axis extent, so its direct neighbors in
//! that set are the nearest nodes before and after it that overlap it on
//! the cross axis.
//!
//! Every pair of nodes that becomes adjacent in the active set is recorded
//! as a link: on insertion with both new neighbors, and on removal between
//! the two nodes that close ranks. Any two overlapping nodes are then joined
//! by a chain of links through nodes that overlap both of them.
//!
//! A link between members of the same group, or from a parent to its
//! child, must not become a constraint, which would cut such a chain. These
//! blocked links are bridged: for consecutive links `a -> b -> c` of which
//! at least one is blocked, `a -> c` is added as a link as long as `a` and
//! `c` overlap. The constraints are the links that are not blocked.
//!
//! Neighbor queries on the active set cost `O(log n)`, so a sweep over `n`
//! nodes runs in `O(n log n)`. Bridging only touches nodes around blocked
//! links and is linear in the links it adds.

use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashSet},
    ops::Bound,
};

use log::trace;
use ordered_float::OrderedFloat;

use cinch_core::{fuzzy, geometry::Rect};

use super::precedence;
use crate::{
    canonical::CanonicalView,
    graph::{Graph, NodeId},
    spacing::SpacingHandler,
};

pub(super) fn calculate(graph: &mut Graph, view: &CanonicalView, spacing: &dyn SpacingHandler) {
    let edges = Sweep::new(graph, view, spacing).run();
    for (from, to) in edges {
        graph.add_constraint(from, to);
    }
}

/// Kind of a sweep event.
///
/// The declaration order is the processing order at equal coordinates:
/// closing a node before opening another keeps touching nodes apart, and
/// a node without cross-axis extent closes only after everything at its
/// coordinate has opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    End,
    Start,
    DegenerateEnd,
}

#[derive(Debug, Clone, Copy)]
struct Event {
    coordinate: f64,
    kind: EventKind,
    scratch: usize,
}

impl Event {
    fn cmp_order(&self, other: &Self) -> Ordering {
        self.coordinate
            .total_cmp(&other.coordinate)
            .then(self.kind.cmp(&other.kind))
            .then(self.scratch.cmp(&other.scratch))
    }
}

/// Links between scratch indices, each stored in active-set order.
#[derive(Debug)]
struct Links {
    seen: HashSet<(usize, usize)>,
    order: Vec<(usize, usize)>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl Links {
    fn new(len: usize) -> Self {
        Self {
            seen: HashSet::new(),
            order: Vec::new(),
            outgoing: vec![Vec::new(); len],
            incoming: vec![Vec::new(); len],
        }
    }

    /// Records `before -> after`. Returns false if the link is known.
    fn add(&mut self, before: usize, after: usize) -> bool {
        if !self.seen.insert((before, after)) {
            return false;
        }
        self.order.push((before, after));
        self.outgoing[before].push(after);
        self.incoming[after].push(before);
        true
    }
}

/// One sweep over all nodes of a graph.
///
/// Per-node state lives in scratch arrays that are only valid for the
/// sweep; `nodes` maps a scratch index back to its node.
struct Sweep<'a> {
    graph: &'a Graph,
    nodes: Vec<NodeId>,
    hitboxes: Vec<Rect>,
    centers: Vec<OrderedFloat<f64>>,
    events: Vec<Event>,
    /// Rank of each node's opening event in the sorted events.
    opened: Vec<usize>,
    /// Rank of each node's closing event in the sorted events.
    closed: Vec<usize>,
    active: BTreeSet<(OrderedFloat<f64>, usize)>,
    links: Links,
}

impl<'a> Sweep<'a> {
    fn new(graph: &'a Graph, view: &CanonicalView, spacing: &dyn SpacingHandler) -> Self {
        let direction = view.direction();
        let nodes: Vec<NodeId> = graph.nodes().map(|node| node.id()).collect();
        let mut hitboxes = Vec::with_capacity(nodes.len());
        let mut centers = Vec::with_capacity(nodes.len());
        let mut events = Vec::with_capacity(nodes.len() * 2);

        for (scratch, &id) in nodes.iter().enumerate() {
            let node = graph.node(id);
            let hitbox = view.hitbox(id);
            hitboxes.push(hitbox);
            centers.push(OrderedFloat(hitbox.center().x()));

            // half the spacing on each side, slightly less so that nodes
            // exactly one spacing apart stay unconstrained
            let gap = spacing.cross_spacing(direction, node, node);
            let inflation = gap / 2.0 - fuzzy::TOLERANCE / 2.0;
            let (ignore_low, ignore_high) = node.spacing_ignore().cross_axis(direction);

            let mut low = hitbox.y();
            let mut high = hitbox.max_y();
            if !ignore_low {
                low -= inflation;
            }
            if !ignore_high {
                high += inflation;
            }
            if high < low {
                let middle = (hitbox.y() + hitbox.max_y()) / 2.0;
                low = middle;
                high = middle;
            }

            events.push(Event {
                coordinate: low,
                kind: EventKind::Start,
                scratch,
            });
            events.push(Event {
                coordinate: high,
                kind: if high > low {
                    EventKind::End
                } else {
                    EventKind::DegenerateEnd
                },
                scratch,
            });
        }
        events.sort_by(Event::cmp_order);

        let mut opened = vec![0; nodes.len()];
        let mut closed = vec![0; nodes.len()];
        for (rank, event) in events.iter().enumerate() {
            match event.kind {
                EventKind::Start => opened[event.scratch] = rank,
                EventKind::End | EventKind::DegenerateEnd => closed[event.scratch] = rank,
            }
        }

        let len = nodes.len();
        Self {
            graph,
            nodes,
            hitboxes,
            centers,
            events,
            opened,
            closed,
            active: BTreeSet::new(),
            links: Links::new(len),
        }
    }

    fn run(mut self) -> Vec<(NodeId, NodeId)> {
        let events = std::mem::take(&mut self.events);
        for event in events {
            match event.kind {
                EventKind::Start => self.insert(event.scratch),
                EventKind::End | EventKind::DegenerateEnd => self.remove(event.scratch),
            }
        }
        self.bridge();
        self.constraints()
    }

    fn key(&self, scratch: usize) -> (OrderedFloat<f64>, usize) {
        (self.centers[scratch], scratch)
    }

    fn neighbors(&self, scratch: usize) -> (Option<usize>, Option<usize>) {
        let key = self.key(scratch);
        let predecessor = self
            .active
            .range(..key)
            .next_back()
            .map(|&(_, other)| other);
        let successor = self
            .active
            .range((Bound::Excluded(key), Bound::Unbounded))
            .next()
            .map(|&(_, other)| other);
        (predecessor, successor)
    }

    fn insert(&mut self, scratch: usize) {
        let (predecessor, successor) = self.neighbors(scratch);
        self.active.insert(self.key(scratch));

        if let Some(predecessor) = predecessor {
            self.links.add(predecessor, scratch);
        }
        if let Some(successor) = successor {
            self.links.add(scratch, successor);
        }
    }

    fn remove(&mut self, scratch: usize) {
        self.active.remove(&self.key(scratch));

        if let (Some(predecessor), Some(successor)) = self.neighbors(scratch) {
            self.links.add(predecessor, successor);
        }
    }

    fn precedes(&self, a: usize, b: usize) -> bool {
        precedence(self.hitboxes[a], self.nodes[a], self.hitboxes[b], self.nodes[b])
            == Ordering::Less
    }

    /// Returns true if the link `before -> after` is a constraint in the
    /// same direction.
    fn holds(&self, before: usize, after: usize) -> bool {
        self.precedes(before, after)
            && self
                .graph
                .may_constrain(self.nodes[before], self.nodes[after])
    }

    /// Returns true if both nodes were open at the same time.
    fn overlaps(&self, a: usize, b: usize) -> bool {
        self.opened[a] < self.closed[b] && self.opened[b] < self.closed[a]
    }

    /// Closes the links over every pair of consecutive links of which at
    /// least one does not hold.
    fn bridge(&mut self) {
        let mut pending: Vec<(usize, usize)> = self
            .links
            .order
            .iter()
            .copied()
            .filter(|&(before, after)| !self.holds(before, after))
            .collect();

        while let Some((a, b)) = pending.pop() {
            let holds = self.holds(a, b);
            for i in 0..self.links.outgoing[b].len() {
                let c = self.links.outgoing[b][i];
                if !(holds && self.holds(b, c)) && self.overlaps(a, c) && self.links.add(a, c) {
                    pending.push((a, c));
                }
            }
            for i in 0..self.links.incoming[a].len() {
                let z = self.links.incoming[a][i];
                if !(holds && self.holds(z, a)) && self.overlaps(z, b) && self.links.add(z, b) {
                    pending.push((z, b));
                }
            }
        }
    }

    /// Orients every link by precedence and keeps the permitted ones.
    fn constraints(&self) -> Vec<(NodeId, NodeId)> {
        self.links
            .order
            .iter()
            .filter_map(|&(before, after)| {
                let (from, to) = if self.precedes(before, after) {
                    (self.nodes[before], self.nodes[after])
                } else {
                    (self.nodes[after], self.nodes[before])
                };
                self.graph.may_constrain(from, to).then(|| {
                    trace!(from:% = from, to:% = to; "Scanline constraint");
                    (from, to)
                })
            })
            .collect()
    }
}
