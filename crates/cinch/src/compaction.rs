//! Compaction of a constrained graph.
//!
//! Given the constraint edges of a pass, the compaction algorithm assigns
//! every node the smallest canonical position that keeps it at least the
//! required spacing after every node constraining it, while moving groups
//! as rigid bodies and honoring locks.

use std::collections::VecDeque;

use log::{debug, trace};
use serde::Deserialize;

use crate::{canonical::CanonicalView, graph::Graph, spacing::SpacingHandler};

/// Strategy used to assign positions from the constraint graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompactionAlgorithm {
    /// Longest-path propagation starting from unconstrained groups.
    #[default]
    LongestPath,
}

impl CompactionAlgorithm {
    /// Moves every node of `view` to its compacted position.
    ///
    /// Group out-degrees must count the constraints entering each group.
    /// Returns the summed absolute displacement of all groups.
    pub(crate) fn compact(
        self,
        graph: &mut Graph,
        view: &mut CanonicalView,
        spacing: &dyn SpacingHandler,
    ) -> f64 {
        match self {
            Self::LongestPath => longest_path(graph, view, spacing),
        }
    }
}

/// Processes groups in topological order of the group-level constraint
/// graph, starting with the groups no other group constrains.
///
/// Every group starts at the leftmost canonical position of the whole graph
/// and is only ever pushed further by the groups constraining it. When
/// several constraints target the same group, the largest requirement wins.
///
/// # Panics
///
/// Panics if the group-level constraint graph contains a cycle, since the
/// groups on the cycle never become ready.
fn longest_path(graph: &mut Graph, view: &mut CanonicalView, spacing: &dyn SpacingHandler) -> f64 {
    let direction = view.direction();
    let Some(min_start) = view.min_x() else {
        return 0.0;
    };

    let mut sinks = VecDeque::new();
    for group in graph.groups_mut() {
        // the member furthest back starts at the common baseline
        let min_offset = group
            .nodes()
            .iter()
            .map(|&member| view.offset(member))
            .fold(f64::INFINITY, f64::min);
        group.set_start_pos(min_start - min_offset);
        if group.out_degree() == 0 {
            sinks.push_back(group.id());
        }
    }
    debug!(sinks = sinks.len(), groups = graph.group_count(); "Starting longest-path compaction");

    let mut processed = 0;
    let mut moved = 0.0;
    while let Some(group_id) = sinks.pop_front() {
        processed += 1;

        for index in 0..graph.group(group_id).nodes().len() {
            let member = graph.group(group_id).nodes()[index];
            if view.is_locked(member) {
                graph
                    .group_mut(group_id)
                    .raise_start_pos(view.x(member) - view.offset(member));
            }
        }

        let start = graph.group(group_id).start_pos();
        for index in 0..graph.group(group_id).nodes().len() {
            let member = graph.group(group_id).nodes()[index];
            let suggested = start + view.offset(member);
            let position = if view.is_locked(member) {
                suggested.max(view.x(member))
            } else {
                suggested
            };
            graph.node_mut(member).set_start_pos(position);
        }

        let reference = graph.group(group_id).reference();
        let diff = view.x(reference) - graph.node(reference).start_pos();
        graph.group_mut(group_id).record_movement(diff, direction);
        moved += diff.abs();

        for index in 0..graph.group(group_id).nodes().len() {
            let member = graph.group(group_id).nodes()[index];
            let reach = graph.node(member).start_pos() + view.width(member);

            for target_index in 0..graph.node(member).constraints().len() {
                let target = graph.node(member).constraints()[target_index];
                let target_group = graph.node(target).group_unchecked();
                if target_group == group_id {
                    continue;
                }

                let gap = spacing.axis_spacing(direction, graph.node(member), graph.node(target));
                let mut required = reach + gap - view.offset(target);
                if view.is_locked(target) {
                    required = required.max(view.x(target) - view.offset(target));
                }
                trace!(from:% = member, to:% = target, required; "Propagating constraint");

                let group = graph.group_mut(target_group);
                group.raise_start_pos(required);
                if group.discharge() {
                    sinks.push_back(target_group);
                }
            }
        }
    }

    assert_eq!(
        processed,
        graph.group_count(),
        "The constraint graph over groups contains a cycle"
    );

    for node in graph.nodes() {
        view.set_x(node.id(), node.start_pos());
    }
    moved
}
