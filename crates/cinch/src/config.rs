//! Configuration types for Cinch compaction.
//!
//! This module provides configuration structures that select the
//! algorithms and parameters of a compaction run. All types implement
//! [`serde::Deserialize`] for loading from external sources. Every field
//! is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`CompactionConfig`] - Top-level configuration combining all sections.
//! - [`SpacingConfig`] - Uniform horizontal and vertical gaps.
//! - [`StabilizeConfig`] - Round limit and tolerance of the [`Stabilizer`].
//!
//! # Example
//!
//! ```
//! # use cinch::config::CompactionConfig;
//! # use cinch::constraints::ConstraintAlgorithm;
//! let config = CompactionConfig::default();
//! assert_eq!(config.constraints(), ConstraintAlgorithm::Scanline);
//! assert!(config.validate().is_ok());
//! ```
//!
//! [`Stabilizer`]: crate::stabilize::Stabilizer

use serde::Deserialize;

use crate::{
    compaction::CompactionAlgorithm,
    constraints::ConstraintAlgorithm,
    error::CompactionError,
    spacing::UniformSpacing,
    stabilize::{DEFAULT_MAX_ROUNDS, DEFAULT_TOLERANCE},
};

/// Top-level compaction configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompactionConfig {
    /// Constraint calculation strategy.
    #[serde(default)]
    constraints: ConstraintAlgorithm,

    /// Compaction strategy.
    #[serde(default)]
    compaction: CompactionAlgorithm,

    /// Spacing section.
    #[serde(default)]
    spacing: SpacingConfig,

    /// Stabilizer section.
    #[serde(default)]
    stabilize: StabilizeConfig,
}

impl CompactionConfig {
    /// Creates a new [`CompactionConfig`] from its sections.
    pub fn new(
        constraints: ConstraintAlgorithm,
        compaction: CompactionAlgorithm,
        spacing: SpacingConfig,
        stabilize: StabilizeConfig,
    ) -> Self {
        Self {
            constraints,
            compaction,
            spacing,
            stabilize,
        }
    }

    /// Returns the [`ConstraintAlgorithm`].
    pub fn constraints(&self) -> ConstraintAlgorithm {
        self.constraints
    }

    /// Returns the [`CompactionAlgorithm`].
    pub fn compaction(&self) -> CompactionAlgorithm {
        self.compaction
    }

    /// Returns the spacing configuration.
    pub fn spacing(&self) -> &SpacingConfig {
        &self.spacing
    }

    /// Returns the stabilizer configuration.
    pub fn stabilize(&self) -> &StabilizeConfig {
        &self.stabilize
    }

    /// Checks that all values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`CompactionError::InvalidConfig`] for negative or non-finite
    /// spacing, a zero round limit or a negative or non-finite tolerance.
    pub fn validate(&self) -> Result<(), CompactionError> {
        for (axis, value) in [
            ("horizontal", self.spacing.horizontal),
            ("vertical", self.spacing.vertical),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CompactionError::InvalidConfig(format!(
                    "{axis} spacing must be a finite, non-negative number, got {value}"
                )));
            }
        }
        if self.stabilize.max_rounds == 0 {
            return Err(CompactionError::InvalidConfig(
                "stabilize.max_rounds must be at least 1".to_string(),
            ));
        }
        let tolerance = self.stabilize.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(CompactionError::InvalidConfig(format!(
                "stabilize.tolerance must be a finite, non-negative number, got {tolerance}"
            )));
        }
        Ok(())
    }
}

/// Uniform spacing between nodes.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SpacingConfig {
    /// Minimum gap along the x-axis.
    #[serde(default)]
    horizontal: f64,

    /// Minimum gap along the y-axis.
    #[serde(default)]
    vertical: f64,
}

impl SpacingConfig {
    /// Creates a new [`SpacingConfig`].
    pub fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.horizontal
    }

    pub fn vertical(&self) -> f64 {
        self.vertical
    }

    /// Returns the spacing handler described by this section.
    pub fn handler(&self) -> UniformSpacing {
        UniformSpacing::new(self.horizontal, self.vertical)
    }
}

/// Limits of the [`Stabilizer`](crate::stabilize::Stabilizer).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StabilizeConfig {
    /// Maximum number of rounds.
    #[serde(default = "default_max_rounds")]
    max_rounds: usize,

    /// Total movement per round below which the layout counts as stable.
    #[serde(default = "default_tolerance")]
    tolerance: f64,
}

fn default_max_rounds() -> usize {
    DEFAULT_MAX_ROUNDS
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl StabilizeConfig {
    /// Creates a new [`StabilizeConfig`].
    pub fn new(max_rounds: usize, tolerance: f64) -> Self {
        Self {
            max_rounds,
            tolerance,
        }
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for StabilizeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROUNDS, DEFAULT_TOLERANCE)
    }
}
