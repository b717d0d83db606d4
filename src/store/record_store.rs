/// Growable, contiguous pool of [`Record`]s threaded into singly linked
/// lists by index.
///
/// Backed by a single `Vec<Record>` acting as the fixed-size-record byte
/// buffer described by the data model: `Record` is `#[repr(C)]` and exactly
/// 32 bytes, so a `Vec<Record>` of length `capacity` *is* the
/// `capacity * 32`-byte buffer, laid out identically to an explicit
/// `Vec<u8>` plus `bytemuck` casts would be — the AoS alternative the design
/// notes call out as an equally valid reading of the contract, and the one
/// that avoids unsafe byte-level reinterpretation entirely.

use bytemuck::Zeroable;
use super::record::Record;
use super::NIL;
use crate::geometry::Aabb;
use crate::octree_debug;

/// Initial buffer capacity, in records. Doubles on demand thereafter.
const INITIAL_CAPACITY: usize = 1024;

/// Result of a [`RecordStore::traverse`] visitor: whether to keep walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Continue,
    Stop,
}

/// The pool itself.
pub struct RecordStore {
    buffer: Vec<Record>,
    next_slot: usize,
    free_list: Vec<usize>,
}

impl RecordStore {
    /// Create an empty store with the default initial capacity (1024 records).
    pub fn new() -> Self {
        Self {
            buffer: vec![Record::zeroed(); INITIAL_CAPACITY],
            next_slot: 0,
            free_list: Vec::new(),
        }
    }

    /// Current buffer capacity, in records.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Doubles the backing buffer. Old data is preserved; any `&Record`
    /// obtained before this call must not be used afterward — the
    /// reallocation does not invalidate indices, only raw references.
    fn grow(&mut self) {
        let new_capacity = self.buffer.len() * 2;
        octree_debug!("octree_engine::RecordStore", "growing store {} -> {} records", self.buffer.len(), new_capacity);
        self.buffer.resize(new_capacity, Record::zeroed());
    }

    fn next_free_slot(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            return idx;
        }
        if self.next_slot == self.buffer.len() {
            self.grow();
        }
        let idx = self.next_slot;
        self.next_slot += 1;
        idx
    }

    /// Push a new record at the front of the list rooted at `head`.
    /// Returns the new head (the allocated index).
    pub fn allocate(&mut self, head: i32, bounds: Aabb, id: i32) -> i32 {
        let idx = self.next_free_slot();
        self.buffer[idx] = Record::new(bounds, id, head);
        idx as i32
    }

    /// Remove the first record with the given `id` from the list rooted at
    /// `head`. Returns the (possibly unchanged) new head. A no-op (head
    /// returned unchanged) if `id` is not present.
    pub fn free(&mut self, head: i32, id: i32) -> i32 {
        if head == NIL {
            return NIL;
        }

        let mut prev: Option<usize> = None;
        let mut cur = head;

        while cur != NIL {
            let cur_idx = cur as usize;
            if self.buffer[cur_idx].id == id {
                let next = self.buffer[cur_idx].next;
                self.free_list.push(cur_idx);
                return match prev {
                    Some(p) => {
                        self.buffer[p].next = next;
                        head
                    }
                    None => next,
                };
            }
            prev = Some(cur_idx);
            cur = self.buffer[cur_idx].next;
        }

        head
    }

    /// Return a slot directly to the free list without scanning any list for
    /// it. Used when a node's whole list is being detached (split) and every
    /// record is about to be reinserted as a fresh allocation elsewhere.
    pub(crate) fn recycle(&mut self, idx: i32) {
        self.free_list.push(idx as usize);
    }

    /// `O(n)` length of the list rooted at `head`.
    pub fn length(&self, head: i32) -> usize {
        let mut count = 0;
        let mut cur = head;
        while cur != NIL {
            count += 1;
            cur = self.buffer[cur as usize].next;
        }
        count
    }

    /// Owned copy of the record at `idx`.
    pub fn read_boxed(&self, idx: i32) -> Record {
        self.buffer[idx as usize]
    }

    /// Zero-copy view into the record at `idx`. See [`Record`]'s docs for
    /// the across-grow invalidation rule.
    pub fn read_raw(&self, idx: i32) -> &Record {
        &self.buffer[idx as usize]
    }

    /// Walk the list rooted at `head` front-to-back, invoking `visit` on
    /// each record. `visit` receives a borrowed [`Record`] — callers that
    /// want an owned ("boxed") copy can simply dereference/copy it; this
    /// collapses the "chooser of boxed/raw reader" into a single borrowing
    /// traversal rather than two near-identical code paths.
    pub fn traverse<F>(&self, head: i32, mut visit: F)
    where
        F: FnMut(&Record) -> Traversal,
    {
        let mut cur = head;
        while cur != NIL {
            let record = &self.buffer[cur as usize];
            let next = record.next;
            if visit(record) == Traversal::Stop {
                return;
            }
            cur = next;
        }
    }

    /// Drop all records. The buffer is retained (not shrunk).
    pub fn clear(&mut self) {
        self.next_slot = 0;
        self.free_list.clear();
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "record_store_tests.rs"]
mod tests;
