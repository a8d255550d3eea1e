//! The compaction driver.
//!
//! A [`Compactor`] borrows a [`Graph`] and runs compaction passes on it.
//! Each pass:
//!
//! 1. checks that the graph supports the direction
//! 2. maps every hitbox into the canonical space of the direction
//! 3. recomputes the constraints from scratch, predefined ones first
//! 4. locks nodes according to their flags and the locking strategy
//! 5. runs the compaction algorithm
//! 6. writes the new positions back into the graph
//!
//! Passes are independent: nothing but the node positions and the group
//! deltas carries over from one pass to the next.

use log::{debug, info};

use cinch_core::direction::Direction;

use crate::{
    canonical::CanonicalView,
    compaction::CompactionAlgorithm,
    config::CompactionConfig,
    constraints::ConstraintAlgorithm,
    error::CompactionError,
    graph::{Graph, GroupId},
    locking::LockingStrategy,
    spacing::{SpacingHandler, UniformSpacing},
};

/// Outcome of one compaction pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassReport {
    /// Direction of the pass.
    pub direction: Direction,
    /// Extent of all nodes along the compaction axis after the pass.
    pub strip_size: f64,
    /// Summed absolute movement of all groups during the pass.
    pub moved: f64,
}

/// Runs compaction passes over a graph.
///
/// Creating a compactor wraps every ungrouped node into a group of its own
/// and recomputes all group offsets from the current hitboxes.
///
/// # Examples
///
/// ```
/// # use cinch::{Compactor, Graph, Node, UniformSpacing};
/// # use cinch_core::{direction::Direction, geometry::Rect};
/// let mut graph = Graph::new();
/// let left = graph.add_node(Node::new(Rect::new(0.0, 0.0, 20.0, 20.0)));
/// let right = graph.add_node(Node::new(Rect::new(30.0, 0.0, 20.0, 20.0)));
///
/// let report = Compactor::new(&mut graph)
///     .with_spacing_handler(UniformSpacing::uniform(5.0))
///     .compact(Direction::Left)
///     .expect("all directions are supported");
///
/// assert_eq!(report.strip_size, 45.0);
/// assert_eq!(graph.node(left).hitbox().x(), 0.0);
/// assert_eq!(graph.node(right).hitbox().x(), 25.0);
/// ```
pub struct Compactor<'g> {
    graph: &'g mut Graph,
    spacing: Box<dyn SpacingHandler + 'g>,
    constraint_algorithm: ConstraintAlgorithm,
    compaction_algorithm: CompactionAlgorithm,
    locking: LockingStrategy,
}

impl<'g> Compactor<'g> {
    /// Creates a compactor with default settings: no spacing, scanline
    /// constraints, longest-path compaction and no locking strategy.
    pub fn new(graph: &'g mut Graph) -> Self {
        graph.ensure_groups();
        graph.calculate_group_offsets();
        Self {
            graph,
            spacing: Box::new(UniformSpacing::default()),
            constraint_algorithm: ConstraintAlgorithm::default(),
            compaction_algorithm: CompactionAlgorithm::default(),
            locking: LockingStrategy::default(),
        }
    }

    /// Creates a compactor using the algorithms and spacing of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CompactionError::InvalidConfig`] if `config` does not validate.
    pub fn from_config(
        graph: &'g mut Graph,
        config: &CompactionConfig,
    ) -> Result<Self, CompactionError> {
        config.validate()?;
        Ok(Self::new(graph)
            .with_spacing_handler(config.spacing().handler())
            .with_constraint_algorithm(config.constraints())
            .with_compaction_algorithm(config.compaction()))
    }

    /// Sets the spacing policy.
    pub fn with_spacing_handler(mut self, handler: impl SpacingHandler + 'g) -> Self {
        self.spacing = Box::new(handler);
        self
    }

    /// Sets the constraint calculation strategy.
    pub fn with_constraint_algorithm(mut self, algorithm: ConstraintAlgorithm) -> Self {
        self.constraint_algorithm = algorithm;
        self
    }

    /// Sets the compaction strategy.
    pub fn with_compaction_algorithm(mut self, algorithm: CompactionAlgorithm) -> Self {
        self.compaction_algorithm = algorithm;
        self
    }

    /// Sets the locking strategy.
    pub fn with_locking_strategy(mut self, strategy: LockingStrategy) -> Self {
        self.locking = strategy;
        self
    }

    /// Replaces the locking strategy of subsequent passes.
    pub fn set_locking_strategy(&mut self, strategy: LockingStrategy) {
        self.locking = strategy;
    }

    pub fn locking_strategy(&self) -> &LockingStrategy {
        &self.locking
    }

    pub fn constraint_algorithm(&self) -> ConstraintAlgorithm {
        self.constraint_algorithm
    }

    pub fn compaction_algorithm(&self) -> CompactionAlgorithm {
        self.compaction_algorithm
    }

    /// Returns the graph under compaction.
    pub fn graph(&self) -> &Graph {
        &*self.graph
    }

    /// Returns the graph under compaction mutably.
    ///
    /// Moving grouped nodes requires a call to
    /// [`Graph::calculate_group_offsets`] before the next pass.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut *self.graph
    }

    /// Computes the constraints for a pass in `direction` without moving
    /// any node, and returns the number of constraint edges.
    ///
    /// The result is readable through [`Graph::constraints`].
    ///
    /// # Errors
    ///
    /// Returns [`CompactionError::UnsupportedDirection`] if the graph may
    /// not be compacted in `direction`.
    pub fn calculate_constraints(&mut self, direction: Direction) -> Result<usize, CompactionError> {
        self.check_direction(direction)?;
        self.prepare(direction);
        Ok(self.graph.constraint_count())
    }

    /// Runs one compaction pass toward `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`CompactionError::UnsupportedDirection`] if the graph may
    /// not be compacted in `direction`.
    ///
    /// # Panics
    ///
    /// Panics if the constraints form a cycle between groups, which can only
    /// happen through predefined constraints or overlapping groups.
    pub fn compact(&mut self, direction: Direction) -> Result<PassReport, CompactionError> {
        self.check_direction(direction)?;
        let mut view = self.prepare(direction);
        self.locking.apply(self.graph, &mut view);

        for node in self.graph.nodes_mut() {
            node.set_start_pos(f64::NEG_INFINITY);
        }
        let moved = self
            .compaction_algorithm
            .compact(self.graph, &mut view, self.spacing.as_ref());
        let strip_size = view.strip_size();
        view.write_back(self.graph);

        info!(direction:% = direction, strip_size, moved; "Compaction pass finished");
        Ok(PassReport {
            direction,
            strip_size,
            moved,
        })
    }

    /// Runs one pass per direction, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first unsupported direction. Passes before it have
    /// already been applied.
    pub fn compact_sequence(
        &mut self,
        directions: &[Direction],
    ) -> Result<Vec<PassReport>, CompactionError> {
        directions
            .iter()
            .map(|&direction| self.compact(direction))
            .collect()
    }

    fn check_direction(&self, direction: Direction) -> Result<(), CompactionError> {
        if self.graph.supports(direction) {
            Ok(())
        } else {
            Err(CompactionError::UnsupportedDirection(direction))
        }
    }

    /// Builds the canonical view and the constraints of a pass.
    fn prepare(&mut self, direction: Direction) -> CanonicalView {
        let view = CanonicalView::new(self.graph, direction);

        self.graph.clear_constraints();
        let predefined: Vec<_> = self.graph.predefined_constraints(direction).collect();
        for (from, to) in predefined {
            self.graph.add_constraint(from, to);
        }
        self.constraint_algorithm
            .calculate(self.graph, &view, self.spacing.as_ref());
        self.count_out_degrees();

        debug!(
            direction:% = direction,
            algorithm:? = self.constraint_algorithm,
            nodes = view.len(),
            constraints = self.graph.constraint_count();
            "Calculated constraints"
        );
        view
    }

    /// Counts, for every group, the constraints entering it from other groups.
    fn count_out_degrees(&mut self) {
        let graph = &*self.graph;
        let entering: Vec<GroupId> = graph
            .nodes()
            .flat_map(|node| {
                let from = node.group_unchecked();
                node.constraints()
                    .iter()
                    .map(|&target| graph.node(target).group_unchecked())
                    .filter(move |&to| to != from)
            })
            .collect();

        for group in self.graph.groups_mut() {
            group.set_out_degree(0);
        }
        for to in entering {
            self.graph.group_mut(to).increment_out_degree();
        }
    }
}
