//! Growable record sequence with explicit capacity bookkeeping.
//!
//! [`Slots`] is the backing store of every container. It tracks its own
//! allocated slot count (`capacity`) instead of trusting `Vec::capacity`,
//! which the allocator may round up, so fixed-capacity containers can
//! refuse pushes at exactly the requested bound.
//!
//! All reservations go through [`growth::checked_bytes_of`] first and then
//! `Vec::try_reserve_exact`, so a failed reservation leaves the sequence
//! exactly as it was.
//!
//! [`growth::checked_bytes_of`]: crate::growth::checked_bytes_of

use std::slice;

use crate::error::Fault;
use crate::growth;

/// A sequence of fixed-size records with capacity `n_alloc` and length
/// `n <= n_alloc`.
#[derive(Debug)]
pub struct Slots<T> {
    items: Vec<T>,
    /// Allocated slot count promised to the owner.
    n_alloc: usize,
}

impl<T> Slots<T> {
    /// An empty sequence with no storage.
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            n_alloc: 0,
        }
    }

    /// A sequence with room for exactly `capacity` records.
    pub fn with_capacity(capacity: usize) -> Result<Self, Fault> {
        let mut slots = Self::new();
        slots.reserve_to(capacity)?;
        Ok(slots)
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no record is live.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Allocated slot count.
    pub fn capacity(&self) -> usize {
        self.n_alloc
    }

    /// Whether every allocated slot is occupied.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.n_alloc
    }

    /// Free slots left before the next growth.
    pub fn spare(&self) -> usize {
        self.n_alloc - self.items.len()
    }

    /// Grow the allocation to at least `capacity` slots. Never shrinks.
    pub fn reserve_to(&mut self, capacity: usize) -> Result<(), Fault> {
        if capacity <= self.n_alloc {
            return Ok(());
        }
        growth::checked_bytes_of::<T>(capacity)?;
        self.items.try_reserve_exact(capacity - self.items.len())?;
        tracing::trace!(from = self.n_alloc, to = capacity, "slots grown");
        self.n_alloc = capacity;
        Ok(())
    }

    /// Set the allocation to exactly `capacity` slots.
    ///
    /// Shrinking truncates the live records past the new bound.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), Fault> {
        if capacity >= self.n_alloc {
            return self.reserve_to(capacity);
        }
        self.items.truncate(capacity);
        self.items.shrink_to(capacity);
        tracing::trace!(from = self.n_alloc, to = capacity, "slots shrunk");
        self.n_alloc = capacity;
        Ok(())
    }

    /// Append `item` if a slot is free, otherwise hand it back.
    pub fn push_within(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    /// Append `item`. The caller must have reserved room.
    pub fn push(&mut self, item: T) {
        debug_assert!(!self.is_full(), "push into a full Slots");
        self.items.push(item);
    }

    /// Remove the record at `index`, shifting every later record down by
    /// one slot. Survivors keep their relative order.
    pub fn shift_remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        Some(self.items.remove(index))
    }

    /// Remove the last record.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Keep only the first `len` records. Capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Drop every record. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable record at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Last record.
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Live records as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterate over live records in order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Clone> Slots<T> {
    /// Deep copy that keeps the full capacity, not just the live length.
    pub fn duplicate(&self) -> Result<Self, Fault> {
        let mut copy = Self::with_capacity(self.n_alloc)?;
        copy.items.extend_from_slice(&self.items);
        Ok(copy)
    }
}

impl Slots<u8> {
    /// Append `bytes`. The caller must have reserved room.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        debug_assert!(bytes.len() <= self.spare(), "extend past capacity");
        self.items.extend_from_slice(bytes);
    }

    /// Overwrite every allocated byte with zero, then drop all records.
    pub fn wipe(&mut self) {
        self.items.fill(0);
        self.items.resize(self.n_alloc, 0);
        std::hint::black_box(self.items.as_slice());
        self.items.clear();
    }
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Slots<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
