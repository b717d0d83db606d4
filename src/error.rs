//! Error types for the octree engine
//!
//! Per the engine's error-handling design, insert/remove/query/raycast never
//! fail — out-of-bounds inserts and removals of unknown ids are silent
//! no-ops, observable only through subsequent queries. The one legitimate
//! fallible boundary is construction: an [`crate::config::OctreeConfig`]
//! with a degenerate root box or a zero depth/capacity is a programmer
//! mistake worth surfacing before any insert runs.

use std::fmt;

/// Result type for fallible octree engine operations.
pub type Result<T> = std::result::Result<T, OctreeError>;

/// Octree engine errors.
#[derive(Debug, Clone, PartialEq)]
pub enum OctreeError {
    /// The configured root box has `min.c > max.c` on some axis.
    DegenerateRootBox,

    /// `max_depth` or `max_objects` was configured as zero.
    InvalidConfig(String),
}

impl fmt::Display for OctreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OctreeError::DegenerateRootBox => {
                write!(f, "root box has min > max on at least one axis")
            }
            OctreeError::InvalidConfig(msg) => write!(f, "invalid octree config: {}", msg),
        }
    }
}

impl std::error::Error for OctreeError {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
