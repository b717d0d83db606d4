/// Ray and the ray-AABB slab test.
///
/// The slab test intersects the ray with three pairs of parallel planes and
/// combines the per-axis `[tmin, tmax]` intervals. A ray component of zero
/// produces signed-infinity intermediates; the comparisons below still
/// resolve to the correct hit/miss under IEEE-754 semantics, so the formula
/// is left exactly as stated rather than special-cased per axis.

use glam::Vec3;
use super::aabb::Aabb;

/// A ray defined by an origin and a (not necessarily normalized) direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    /// Componentwise reciprocal of the direction. May contain signed infinities.
    pub fn inv_dir(&self) -> Vec3 {
        Vec3::new(1.0 / self.dir.x, 1.0 / self.dir.y, 1.0 / self.dir.z)
    }

    /// Slab-intersect this ray against `aabb`.
    ///
    /// Returns `Some(t_enter)` if `t_enter >= 0`, else `Some(t_exit)` if
    /// `t_exit >= 0` (the ray origin is inside the box), else `None` (miss).
    pub fn slab_intersect(&self, aabb: &Aabb) -> Option<f32> {
        self.slab_intersect_with(aabb, &self.inv_dir())
    }

    /// Same as [`Self::slab_intersect`] but takes a precomputed `inv_dir`,
    /// so callers walking many boxes against one ray pay for the three
    /// divisions once.
    pub fn slab_intersect_with(&self, aabb: &Aabb, inv_dir: &Vec3) -> Option<f32> {
        let (t_min, t_max) = self.slab_interval(aabb, inv_dir)?;
        if t_min >= 0.0 {
            Some(t_min)
        } else if t_max >= 0.0 {
            Some(t_max)
        } else {
            None
        }
    }

    /// Raw `t_enter` (`t_min`), possibly negative, or `None` on a miss.
    ///
    /// Used by the stack-based tree walks to rank children near-to-far —
    /// unlike [`Self::slab_intersect_with`] this does not fold a negative
    /// `t_enter` into `t_exit`; the walk only needs "does the ray cross this
    /// box at all, and how soon."
    pub fn slab_t_enter(&self, aabb: &Aabb, inv_dir: &Vec3) -> Option<f32> {
        self.slab_interval(aabb, inv_dir).map(|(t_min, _)| t_min)
    }

    fn slab_interval(&self, aabb: &Aabb, inv_dir: &Vec3) -> Option<(f32, f32)> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let o = self.origin[axis];
            let d_inv = inv_dir[axis];
            let mut t1 = (aabb.min[axis] - o) * d_inv;
            let mut t2 = (aabb.max[axis] - o) * d_inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        Some((t_min, t_max))
    }
}

#[cfg(test)]
#[path = "ray_tests.rs"]
mod tests;
