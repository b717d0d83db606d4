//! Octree construction parameters.
//!
//! A plain data struct with chained `with_*` setters and a validating
//! `build()` that is the one fallible boundary in the whole crate.

use crate::error::{OctreeError, Result};
use crate::geometry::Aabb;
use glam::Vec3;

/// Half the side length of the default root cube.
const DEFAULT_ROOT_HALF_EXTENT: f32 = 5.0;

/// Construction parameters for an [`crate::octree::Octree`]: the root box,
/// the max recursion depth, and the per-node object threshold that triggers
/// a split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctreeConfig {
    root_box: Aabb,
    max_depth: u32,
    max_objects: usize,
}

impl OctreeConfig {
    /// A builder seeded with the defaults: `max_depth = 8`, `max_objects =
    /// 16`, `root_box` a cube of side 10 centered at the origin.
    pub fn default() -> Self {
        Self {
            root_box: Aabb::new(
                Vec3::splat(-DEFAULT_ROOT_HALF_EXTENT),
                Vec3::splat(DEFAULT_ROOT_HALF_EXTENT),
            ),
            max_depth: 8,
            max_objects: 16,
        }
    }

    pub fn with_root_box(mut self, root_box: Aabb) -> Self {
        self.root_box = root_box;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = max_objects;
        self
    }

    pub fn root_box(&self) -> Aabb {
        self.root_box
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn max_objects(&self) -> usize {
        self.max_objects
    }

    /// Validate and freeze the configuration.
    ///
    /// Rejects a root box with `min.c > max.c` on any axis, `max_depth ==
    /// 0`, and `max_objects == 0` (a zero threshold would split on every
    /// single insert forever).
    pub fn build(self) -> Result<OctreeConfig> {
        let min = self.root_box.min;
        let max = self.root_box.max;
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(OctreeError::DegenerateRootBox);
        }
        if self.max_depth == 0 {
            return Err(OctreeError::InvalidConfig(
                "max_depth must be >= 1".to_string(),
            ));
        }
        if self.max_objects == 0 {
            return Err(OctreeError::InvalidConfig(
                "max_objects must be >= 1".to_string(),
            ));
        }
        Ok(self)
    }
}

impl Default for OctreeConfig {
    fn default() -> Self {
        OctreeConfig::default()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
