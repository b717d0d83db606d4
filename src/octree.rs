//! The public façade: owns the record store, the node arena, the
//! configuration, and a per-instance scratch, and does nothing but
//! delegate to them.

use crate::config::OctreeConfig;
use crate::geometry::{Aabb, Frustum, Ray};
use crate::node::{OctreeArena, RayHit, VisibleNode, ROOT};
use crate::octree_trace;
use crate::scratch::Scratch;
use crate::store::{RecordStore, Traversal};

/// A dynamic loose octree over 3D axis-aligned bounding boxes.
///
/// Single-threaded and synchronous: every operation here runs to completion
/// in the calling context. There is no locking because there is no sharing —
/// an `Octree` owns its store, tree, and scratch exclusively.
pub struct Octree {
    arena: OctreeArena,
    store: RecordStore,
    config: OctreeConfig,
    scratch: Scratch,
}

impl Octree {
    /// Build a new, empty octree from a validated configuration.
    pub fn new(config: OctreeConfig) -> Self {
        Self {
            arena: OctreeArena::new(config.root_box()),
            store: RecordStore::new(),
            config,
            scratch: Scratch::new(),
        }
    }

    /// Insert an object with the given `bounds`. A missing `id` (`None`)
    /// defaults to `0`, matching the façade contract for callers that don't
    /// track per-object correlation ids.
    pub fn insert(&mut self, bounds: Aabb, id: Option<i32>) {
        let id = id.unwrap_or(0);
        self.arena.insert(&mut self.store, &self.config, ROOT, bounds, id);
    }

    /// Remove the object with `id`. `bounds: None` disables intersection
    /// pruning during the downward search — used when the caller (e.g. a
    /// transport that only carries ids on remove) doesn't have the box.
    pub fn remove(&mut self, bounds: Option<Aabb>, id: i32) -> bool {
        self.arena.remove(&mut self.store, ROOT, bounds, id)
    }

    /// Remove then reinsert under new bounds. Equivalent to
    /// `remove(None, id); insert(new_bounds, Some(id))` — the old bounds
    /// aren't required because removal doesn't need them to find the
    /// record by id. If `new_bounds` falls entirely outside the root box,
    /// the insert silently drops the object while the remove still
    /// succeeds; callers streaming objects beyond the configured root must
    /// expand it first.
    pub fn update(&mut self, new_bounds: Aabb, id: i32) {
        self.remove(None, id);
        self.insert(new_bounds, Some(id));
    }

    /// Visit every live id whose bounds intersect `query`.
    pub fn aabb_query(&self, query: Aabb, mut visit: impl FnMut(i32)) {
        self.arena.aabb_query(&self.store, ROOT, query, &mut visit);
    }

    /// Visit every live id whose bounds intersect `frustum`.
    pub fn frustum_query(&self, frustum: &Frustum, mut visit: impl FnMut(i32)) {
        self.arena.frustum_query(&self.store, ROOT, frustum, &mut visit);
    }

    /// Cast `ray` through the tree, appending every hit to `out`. `out` is
    /// reset to empty (its storage is preserved) before the walk starts.
    /// Takes `&mut self` because the walk reuses the instance's scratch
    /// stack rather than allocating one per call.
    pub fn raycast(&mut self, ray: &Ray, out: &mut Vec<RayHit>) {
        let stack = self.scratch.stack_mut();
        self.arena.raycast(&self.store, stack, ray, out);
    }

    /// Run `frustum_raycast` (see [`Self::frustum_raycast`]) against the
    /// combined frustum+ray walk, invoking `visit` once per node traversed.
    /// The visitor may return [`Traversal::Stop`] to end the walk early.
    pub fn frustum_raycast(
        &mut self,
        frustum: &Frustum,
        ray: &Ray,
        mut visit: impl FnMut(VisibleNode) -> Traversal,
    ) {
        let stack = self.scratch.stack_mut();
        self.arena
            .frustum_raycast(&self.store, stack, frustum, ray, &mut visit);
    }

    /// Wipe the tree and the store: after this, every query is empty and
    /// the store's `next_slot`/free list are reset.
    pub fn clear(&mut self) {
        octree_trace!("octree_engine::octree", "clearing octree");
        self.store.clear();
        self.arena.clear();
    }
}

#[cfg(test)]
#[path = "octree_tests.rs"]
mod tests;
