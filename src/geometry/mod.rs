//! Geometry primitives module
//!
//! Provides the AABB, Ray, and Frustum types and the numeric predicates
//! the octree core runs against them: box-box overlap, the ray-AABB slab
//! test, and frustum-AABB overlap.

mod aabb;
mod frustum;
mod ray;

pub use aabb::Aabb;
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use ray::Ray;
