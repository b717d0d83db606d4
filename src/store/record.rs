/// The fixed-size record stored in the pool.
///
/// Exactly 32 bytes: six f32 bounds components, a caller-supplied i32 id,
/// and an i32 `next` pointer (index of the following record in the same
/// singly linked list, or [`crate::store::NIL`]). `#[repr(C)]` plus
/// `bytemuck::Pod`/`Zeroable` let the store reinterpret its raw byte
/// buffer as a `&[Record]`/`&mut [Record]` slice without per-record copies.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::geometry::Aabb;
use super::NIL;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Record {
    pub min_x: f32,
    pub min_y: f32,
    pub min_z: f32,
    pub max_x: f32,
    pub max_y: f32,
    pub max_z: f32,
    pub id: i32,
    pub next: i32,
}

const _: () = assert!(std::mem::size_of::<Record>() == 32);

impl Record {
    pub fn new(bounds: Aabb, id: i32, next: i32) -> Self {
        Self {
            min_x: bounds.min.x,
            min_y: bounds.min.y,
            min_z: bounds.min.z,
            max_x: bounds.max.x,
            max_y: bounds.max.y,
            max_z: bounds.max.z,
            id,
            next,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec3::new(self.min_x, self.min_y, self.min_z),
            Vec3::new(self.max_x, self.max_y, self.max_z),
        )
    }
}

/// A zero-copy view into a single record in the store's backing buffer.
///
/// Borrowed from the store; the caller must not retain it across a write
/// that might grow the buffer (the grow reallocates and copies, so any
/// `&Record` handed out before it points at freed memory once dropped by
/// the allocator that owned the old buffer).
pub type RecordView<'a> = &'a Record;
