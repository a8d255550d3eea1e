//! Error types for Cinch operations.
//!
//! This module provides the main error type [`CompactionError`]. Only the
//! caller-facing setup can fail: building groups, validating a
//! configuration and choosing a direction the graph does not support. The
//! compaction itself assumes validated input and does not return errors.

use thiserror::Error;

use cinch_core::direction::Direction;

use crate::graph::NodeId;

/// The main error type for Cinch operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompactionError {
    #[error("direction `{0}` is not supported by this graph")]
    UnsupportedDirection(Direction),

    #[error("node {0} does not belong to this graph")]
    UnknownNode(NodeId),

    #[error("node {0} already belongs to a group")]
    AlreadyGrouped(NodeId),

    #[error("a group needs at least one node")]
    EmptyGroup,

    #[error("reference node {0} is not a member of its group")]
    ReferenceNotMember(NodeId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CompactionError::UnsupportedDirection(Direction::Up).to_string(),
            "direction `up` is not supported by this graph"
        );
        assert_eq!(
            CompactionError::AlreadyGrouped(NodeId::new(3)).to_string(),
            "node #3 already belongs to a group"
        );
        assert_eq!(
            CompactionError::InvalidConfig("negative spacing".to_string()).to_string(),
            "Invalid configuration: negative spacing"
        );
    }
}
