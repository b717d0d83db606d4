/*!
# Octree Engine

A dynamic loose octree spatial index over axis-aligned bounding boxes, with
AABB queries, frustum culling, and combined frustum+raycast picking.

## Architecture

- **geometry**: `Aabb`, `Ray` (slab test), `Frustum` (Gribb & Hartmann
  plane extraction and positive-vertex culling).
- **store**: the index-addressed record pool backing every node's object
  list.
- **node**: the octree itself — a growable arena of nodes, split-on-demand,
  with straddling objects held at their nearest ancestor.
- **octree**: the public façade tying a record store, a node arena, a
  configuration, and a per-instance scratch together.

Single-threaded and synchronous throughout: every operation runs to
completion in the calling context, and there is no locking because there is
no sharing.
*/

// Error handling module
pub mod error;

// Logging module
pub mod log;

// Construction parameters
pub mod config;

// Geometry primitives: AABB, Ray, Frustum
pub mod geometry;

// Record store: the index-addressed object pool
pub mod store;

// The octree itself (node arena)
mod node;

// Per-instance scratch space for the iterative tree walks
mod scratch;

// The public façade
pub mod octree;

// Re-export error types at crate root
pub use error::{OctreeError, Result};

// Re-export the façade and its configuration
pub use octree::Octree;
pub use config::OctreeConfig;

// Re-export geometry primitives
pub use geometry::{Aabb, Frustum, Ray};

// Re-export node-level result/visitor types used by the façade's API
pub use node::{RayHit, VisibleNode};
pub use store::Traversal;

// Re-export math library
pub use glam;
