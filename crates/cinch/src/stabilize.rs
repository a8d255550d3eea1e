//! Alternating compaction until the layout stops changing.
//!
//! Compacting along one axis can open room along the other, so a single
//! horizontal and vertical pass rarely yields the tightest layout. The
//! [`Stabilizer`] repeats rounds of passes and measures how far the groups
//! moved in each round.
//!
//! One round consists of two triples of passes, horizontal first:
//!
//! - `Left` with every node free
//! - `Right` with the locking strategy applied
//! - `Left` with the locking strategy applied
//!
//! followed by the same for `Up`, `Down` and `Up`. With the default
//! [`LockingStrategy::LockSinks`], the middle pass pulls nodes that have
//! room toward the opposite side and the last pass settles them again, so
//! nodes close up without the whole layout drifting.
//!
//! Rounds repeat while fewer than two ran or the last round moved the
//! groups by more than the tolerance, up to a maximum number of rounds.

use log::{debug, info};

use cinch_core::direction::{Axis, Direction};

use crate::{
    compactor::Compactor, config::StabilizeConfig, error::CompactionError,
    locking::LockingStrategy,
};

/// Default maximum number of rounds.
pub const DEFAULT_MAX_ROUNDS: usize = 10;

/// Default movement per round below which the layout counts as stable.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Outcome of a stabilizing run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilizeReport {
    /// Number of rounds executed.
    pub rounds: usize,
    /// Summed absolute group movement of the last round.
    pub movement: f64,
    /// Whether the last round stayed within the tolerance.
    pub converged: bool,
}

/// Runs rounds of alternating compaction passes.
///
/// Axes whose two directions are not both supported by the graph are
/// skipped.
pub struct Stabilizer<'c, 'g> {
    compactor: &'c mut Compactor<'g>,
    max_rounds: usize,
    tolerance: f64,
    locking: LockingStrategy,
}

impl<'c, 'g> Stabilizer<'c, 'g> {
    pub fn new(compactor: &'c mut Compactor<'g>) -> Self {
        Self {
            compactor,
            max_rounds: DEFAULT_MAX_ROUNDS,
            tolerance: DEFAULT_TOLERANCE,
            locking: LockingStrategy::LockSinks,
        }
    }

    /// Creates a stabilizer with the limits of `config`.
    pub fn from_config(compactor: &'c mut Compactor<'g>, config: &StabilizeConfig) -> Self {
        Self::new(compactor)
            .with_max_rounds(config.max_rounds())
            .with_tolerance(config.tolerance())
    }

    /// Sets the maximum number of rounds. At least one round always runs.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the strategy used by the second and third pass of each triple.
    pub fn with_locking_strategy(mut self, locking: LockingStrategy) -> Self {
        self.locking = locking;
        self
    }

    /// Runs rounds until the layout is stable or the round limit is hit.
    ///
    /// The compactor's own locking strategy is restored afterwards.
    ///
    /// # Errors
    ///
    /// Propagates the first error of an individual pass.
    pub fn run(mut self) -> Result<StabilizeReport, CompactionError> {
        let previous = self.compactor.locking_strategy().clone();
        let result = self.run_rounds();
        self.compactor.set_locking_strategy(previous);
        result
    }

    fn run_rounds(&mut self) -> Result<StabilizeReport, CompactionError> {
        let mut rounds = 0;
        let mut movement;
        loop {
            movement = self.round()?;
            rounds += 1;
            debug!(round = rounds, movement; "Stabilizing round finished");
            if (rounds >= 2 && movement <= self.tolerance) || rounds >= self.max_rounds {
                break;
            }
        }

        let converged = movement <= self.tolerance;
        info!(rounds, movement, converged; "Stabilized layout");
        Ok(StabilizeReport {
            rounds,
            movement,
            converged,
        })
    }

    fn round(&mut self) -> Result<f64, CompactionError> {
        let mut movement = 0.0;
        for (axis, direction) in [
            (Axis::Horizontal, Direction::Left),
            (Axis::Vertical, Direction::Up),
        ] {
            let graph = self.compactor.graph();
            if !graph.supports(direction) || !graph.supports(direction.opposite()) {
                debug!(axis:? = axis; "Skipping unsupported axis");
                continue;
            }

            self.reset_deltas();
            self.compactor.set_locking_strategy(LockingStrategy::None);
            self.compactor.compact(direction)?;
            self.compactor.set_locking_strategy(self.locking.clone());
            self.compactor
                .compact_sequence(&[direction.opposite(), direction])?;

            movement += self
                .compactor
                .graph()
                .groups()
                .map(|group| group.delta_normalized().abs())
                .sum::<f64>();
        }
        Ok(movement)
    }

    fn reset_deltas(&mut self) {
        for group in self.compactor.graph_mut().groups_mut() {
            group.reset_deltas();
        }
    }
}
