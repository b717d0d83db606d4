//! Record store module
//!
//! A growable, contiguous byte-buffer-backed pool of fixed-size object
//! records, threaded into singly linked lists by index. Replaces
//! per-object heap allocation with index arithmetic over one buffer.

mod record;
mod record_store;

pub use record::{Record, RecordView};
pub use record_store::{RecordStore, Traversal};

/// Sentinel meaning "no record" / "end of list", matching the 32-bit
/// signed `next`/head convention used throughout the store and node layers.
pub const NIL: i32 = -1;
