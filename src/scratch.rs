//! Small reusable scratch space for the hot query paths.
//!
//! `raycast` and `frustum_raycast` both walk an explicit stack instead of
//! recursing, and both want a pre-sized stack array so the walk never
//! allocates. One [`Scratch`] lives per [`crate::octree::Octree`] instance
//! and is never shared across instances or threads.

/// Maximum stack depth for the iterative tree walks. Bounded by `max_depth`
/// in practice (≤ 8 by default) but sized generously against the 64-frame
/// ceiling called out for the combined walk.
pub const MAX_STACK_FRAMES: usize = 64;

/// Per-walk scratch: a capacity-preallocated stack of node indices plus a
/// tiny general-purpose 3-vector used by distance computations that would
/// otherwise allocate a temporary.
pub struct Scratch {
    stack: Vec<usize>,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            stack: Vec::with_capacity(MAX_STACK_FRAMES),
        }
    }

    /// Borrow the stack for a walk. The node-level walk clears it itself at
    /// the start of every `raycast`/`frustum_raycast` call, so callers don't
    /// need to reset it between uses.
    pub fn stack_mut(&mut self) -> &mut Vec<usize> {
        &mut self.stack
    }

    /// Empty the stack, keeping its allocated capacity.
    pub fn reset(&mut self) {
        self.stack.clear();
    }
}

impl Default for Scratch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scratch_tests.rs"]
mod tests;
