//! The octree itself: a growable arena of nodes addressed by index, rather
//! than `Box`/`Rc` pointers. The tree grows on demand — nodes are pushed
//! onto the arena when a leaf splits — instead of being pre-allocated for a
//! fixed depth up front.
//!
//! Canonical octant numbering throughout: bit0 = x, bit1 = y, bit2 = z,
//! `0` selects the low half of an axis and `1` the high half.

use crate::config::OctreeConfig;
use crate::geometry::{Aabb, Frustum, Ray};
use crate::octree_debug;
use crate::store::{RecordStore, Traversal, NIL};
use glam::Vec3;

pub(crate) const ROOT: usize = 0;

/// One node of the arena. `children` holds arena indices of the eight
/// octants once this node has split; `None` means leaf. `head` is the
/// record-store list head for objects held directly at this node (either
/// because it is a leaf, or because they straddle this node's midplanes).
struct OctreeNode {
    aabb: Aabb,
    depth: u32,
    children: Option<[u32; 8]>,
    head: i32,
}

/// A single ray hit: the object id and the slab distance along the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub id: i32,
    pub distance: f32,
}

/// Envelope handed to the `frustum_raycast` visitor for each node visited.
#[derive(Debug, Clone, Copy)]
pub struct VisibleNode {
    pub aabb: Aabb,
    pub distance: f32,
    pub mouse_hit: Option<RayHit>,
}

pub(crate) struct OctreeArena {
    nodes: Vec<OctreeNode>,
}

impl OctreeArena {
    pub fn new(root_box: Aabb) -> Self {
        Self {
            nodes: vec![OctreeNode {
                aabb: root_box,
                depth: 0,
                children: None,
                head: NIL,
            }],
        }
    }

    /// Classify `bounds` against `parent`'s midplanes. Returns the octant
    /// `0..8` that fully contains `bounds`, or `None` if it straddles any
    /// midplane (tested with `bmax.c <= c.c` or `bmin.c >= c.c` per axis).
    fn classify(parent: &Aabb, bounds: &Aabb) -> Option<usize> {
        let center = parent.center();
        let mut octant = 0usize;
        for axis in 0..3 {
            let fits_low = bounds.max[axis] <= center[axis];
            let fits_high = bounds.min[axis] >= center[axis];
            if fits_high {
                octant |= 1 << axis;
            } else if !fits_low {
                return None;
            }
        }
        Some(octant)
    }

    /// The box of `octant` (`0..8`) within `parent`, split about its centroid.
    fn octant_box(parent: &Aabb, octant: usize) -> Aabb {
        let center = parent.center();
        let min = Vec3::new(
            if octant & 1 == 0 { parent.min.x } else { center.x },
            if octant & 2 == 0 { parent.min.y } else { center.y },
            if octant & 4 == 0 { parent.min.z } else { center.z },
        );
        let max = Vec3::new(
            if octant & 1 == 0 { center.x } else { parent.max.x },
            if octant & 2 == 0 { center.y } else { parent.max.y },
            if octant & 4 == 0 { center.z } else { parent.max.z },
        );
        Aabb::new(min, max)
    }

    pub fn insert(
        &mut self,
        store: &mut RecordStore,
        config: &OctreeConfig,
        node_idx: usize,
        bounds: Aabb,
        id: i32,
    ) {
        if !self.nodes[node_idx].aabb.intersects(&bounds) {
            return;
        }

        if let Some(children) = self.nodes[node_idx].children {
            if let Some(octant) = Self::classify(&self.nodes[node_idx].aabb, &bounds) {
                self.insert(store, config, children[octant] as usize, bounds, id);
                return;
            }
        }

        let node = &mut self.nodes[node_idx];
        node.head = store.allocate(node.head, bounds, id);

        let is_leaf = node.children.is_none();
        let depth = node.depth;
        let length = store.length(node.head);
        if is_leaf && depth < config.max_depth() && length >= config.max_objects() {
            self.split(store, config, node_idx);
        }
    }

    /// Create the eight children, redistribute this node's own list into
    /// them (straddlers stay), then let each child split again if it's now
    /// over threshold. One-shot: nodes never merge back.
    fn split(&mut self, store: &mut RecordStore, config: &OctreeConfig, node_idx: usize) {
        let parent_box = self.nodes[node_idx].aabb;
        let child_depth = self.nodes[node_idx].depth + 1;

        let mut child_indices = [0u32; 8];
        for octant in 0..8 {
            child_indices[octant] = self.nodes.len() as u32;
            self.nodes.push(OctreeNode {
                aabb: Self::octant_box(&parent_box, octant),
                depth: child_depth,
                children: None,
                head: NIL,
            });
        }
        self.nodes[node_idx].children = Some(child_indices);
        octree_debug!(
            "octree_engine::node",
            "split node at depth {} into 8 children",
            child_depth - 1
        );

        let old_head = self.nodes[node_idx].head;
        self.nodes[node_idx].head = NIL;

        let mut displaced = Vec::new();
        let mut cur = old_head;
        while cur != NIL {
            let rec = store.read_raw(cur);
            displaced.push((rec.bounds(), rec.id));
            let next = rec.next;
            store.recycle(cur);
            cur = next;
        }

        for (bounds, id) in displaced {
            self.insert(store, config, node_idx, bounds, id);
        }
    }

    /// Downward search with intersect-guard pruning. `bounds: None` (the
    /// worker transport's id-only remove messages carry no box) disables
    /// pruning — every node is visited.
    pub fn remove(
        &mut self,
        store: &mut RecordStore,
        node_idx: usize,
        bounds: Option<Aabb>,
        id: i32,
    ) -> bool {
        if let Some(b) = bounds {
            if !self.nodes[node_idx].aabb.intersects(&b) {
                return false;
            }
        }

        let head = self.nodes[node_idx].head;
        let len_before = store.length(head);
        let new_head = store.free(head, id);
        self.nodes[node_idx].head = new_head;
        if store.length(new_head) < len_before {
            return true;
        }

        if let Some(children) = self.nodes[node_idx].children {
            for child_idx in children {
                if self.remove(store, child_idx as usize, bounds, id) {
                    return true;
                }
            }
        }
        false
    }

    pub fn aabb_query(
        &self,
        store: &RecordStore,
        node_idx: usize,
        query: Aabb,
        visit: &mut dyn FnMut(i32),
    ) {
        let node = &self.nodes[node_idx];
        if !node.aabb.intersects(&query) {
            return;
        }
        if let Some(children) = node.children {
            for child_idx in children {
                self.aabb_query(store, child_idx as usize, query, visit);
            }
        }
        store.traverse(node.head, |rec| {
            if rec.bounds().intersects(&query) {
                visit(rec.id);
            }
            Traversal::Continue
        });
    }

    pub fn frustum_query(
        &self,
        store: &RecordStore,
        node_idx: usize,
        frustum: &Frustum,
        visit: &mut dyn FnMut(i32),
    ) {
        let node = &self.nodes[node_idx];
        if !frustum.intersects_aabb(&node.aabb) {
            return;
        }
        if let Some(children) = node.children {
            for child_idx in children {
                self.frustum_query(store, child_idx as usize, frustum, visit);
            }
        }
        store.traverse(node.head, |rec| {
            if frustum.intersects_aabb(&rec.bounds()) {
                visit(rec.id);
            }
            Traversal::Continue
        });
    }

    /// Iterative stack walk. Children are ranked near-to-far by `t_enter`
    /// and pushed in reverse so the nearest is popped first; every visited
    /// node's own list is slab-tested regardless of depth, and no global
    /// far-pruning is applied — every hit anywhere on the ray is emitted.
    pub fn raycast(
        &self,
        store: &RecordStore,
        stack: &mut Vec<usize>,
        ray: &Ray,
        out: &mut Vec<RayHit>,
    ) {
        out.clear();
        stack.clear();
        let inv_dir = ray.inv_dir();

        stack.push(ROOT);
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx];

            if let Some(children) = node.children {
                let mut ranked: Vec<(usize, f32)> = children
                    .iter()
                    .filter_map(|&c| {
                        let c = c as usize;
                        ray.slab_t_enter(&self.nodes[c].aabb, &inv_dir).map(|t| (c, t))
                    })
                    .collect();
                ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
                for &(child_idx, _) in ranked.iter().rev() {
                    stack.push(child_idx);
                }
            }

            store.traverse(node.head, |rec| {
                if let Some(distance) = ray.slab_intersect_with(&rec.bounds(), &inv_dir) {
                    out.push(RayHit { id: rec.id, distance });
                }
                Traversal::Continue
            });
        }
    }

    /// Single DFS stack walk combining frustum culling with a nearest-hit
    /// raycast. Children are pushed without near-to-far sorting — documented
    /// behaviour, not an oversight, since the visitor also drives LOD
    /// selection which wants breadth-first-ish traversal of siblings.
    pub fn frustum_raycast(
        &self,
        store: &RecordStore,
        stack: &mut Vec<usize>,
        frustum: &Frustum,
        ray: &Ray,
        visit: &mut dyn FnMut(VisibleNode) -> Traversal,
    ) {
        stack.clear();
        let inv_dir = ray.inv_dir();
        let mut closest_hit_distance = f32::INFINITY;

        stack.push(ROOT);
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx];

            if !frustum.intersects_aabb(&node.aabb) {
                continue;
            }
            if node.head == NIL && node.children.is_none() {
                continue;
            }

            let distance = node.aabb.center().distance(ray.origin);
            let mut mouse_hit = None;

            if let Some(node_t_enter) = ray.slab_t_enter(&node.aabb, &inv_dir) {
                if node_t_enter < closest_hit_distance && node.head != NIL {
                    store.traverse(node.head, |rec| {
                        if let Some(t_enter) = ray.slab_t_enter(&rec.bounds(), &inv_dir) {
                            if t_enter < closest_hit_distance {
                                closest_hit_distance = t_enter;
                                mouse_hit = Some(RayHit { id: rec.id, distance: t_enter });
                            }
                        }
                        Traversal::Continue
                    });
                }
            }

            let envelope = VisibleNode {
                aabb: node.aabb,
                distance,
                mouse_hit,
            };
            if visit(envelope) == Traversal::Stop {
                return;
            }

            if let Some(children) = node.children {
                for child_idx in children {
                    stack.push(child_idx as usize);
                }
            }
        }
    }

    /// Drop every node but the root and reset the root to an empty leaf.
    pub fn clear(&mut self) {
        let root_box = self.nodes[ROOT].aabb;
        self.nodes.clear();
        self.nodes.push(OctreeNode {
            aabb: root_box,
            depth: 0,
            children: None,
            head: NIL,
        });
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
