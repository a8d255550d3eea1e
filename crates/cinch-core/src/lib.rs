//! Cinch Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Cinch
//! compaction engine. It includes:
//!
//! - **Geometry**: Points, sizes and rectangles ([`geometry`] module)
//! - **Directions**: The four compaction directions and their canonical
//!   coordinate transforms ([`direction`] module)
//! - **Fuzzy comparison**: Tolerant float comparisons ([`fuzzy`] module)

pub mod direction;
pub mod fuzzy;
pub mod geometry;
