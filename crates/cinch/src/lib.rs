//! Cinch - One-dimensional compaction of rectangles.
//!
//! Given rectangles that already have a layout, Cinch pulls them as close
//! together as possible along one axis without introducing overlaps. The
//! caller chooses the direction, the spacing between rectangles, which
//! rectangles move together as a rigid group and which may not be pulled
//! below their current position.
//!
//! # Overview
//!
//! - [`graph`] - The box model: nodes, groups and constraint edges.
//! - [`compactor`] - The [`Compactor`] driving individual passes.
//! - [`stabilize`] - Repeated passes until the layout is stable.
//! - [`constraints`] - Quadratic and scanline constraint calculation.
//! - [`compaction`] - Longest-path compaction.
//! - [`locking`] - Direction-dependent locking of nodes.
//! - [`spacing`] - Spacing policies.
//! - [`config`] - Serde-deserializable configuration.
//!
//! # Example
//!
//! ```
//! use cinch::{Compactor, Graph, Node, UniformSpacing};
//! use cinch_core::{direction::Direction, geometry::Rect};
//!
//! let mut graph = Graph::new();
//! let a = graph.add_node(Node::new(Rect::new(0.0, 0.0, 20.0, 20.0)));
//! let b = graph.add_node(Node::new(Rect::new(30.0, 0.0, 20.0, 20.0)));
//!
//! let mut compactor =
//!     Compactor::new(&mut graph).with_spacing_handler(UniformSpacing::uniform(5.0));
//! compactor
//!     .compact_sequence(&[Direction::Right, Direction::Left])
//!     .expect("all directions are supported");
//! drop(compactor);
//!
//! assert_eq!(graph.node(a).hitbox().x(), 5.0);
//! assert_eq!(graph.node(b).hitbox().x(), 30.0);
//! ```

pub mod compaction;
pub mod compactor;
pub mod config;
pub mod constraints;
pub mod graph;
pub mod locking;
pub mod spacing;
pub mod stabilize;

mod canonical;
mod error;

pub use cinch_core::{direction, fuzzy, geometry};

pub use compactor::{Compactor, PassReport};
pub use error::CompactionError;
pub use graph::{Graph, Group, GroupId, Node, NodeId, SpacingIgnore};
pub use spacing::{SpacingHandler, UniformSpacing};
pub use stabilize::{StabilizeReport, Stabilizer};
