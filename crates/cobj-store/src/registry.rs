//! Reference-counted registry of externally-owned objects.
//!
//! [`RefRegistry`] counts how many independent owners hold the *same*
//! object. Keys are identities ([`PtrKey`](cobj_core::PtrKey) by default),
//! so two equal-valued objects at different addresses are distinct
//! entries. The registry never touches the referents.
//!
//! Entries live in an insertion-ordered `IndexMap`, which gives positional
//! access and O(1) identity lookup. Capacity is tracked separately and
//! doubles when an insert finds the registry full.

use std::hash::Hash;
use std::mem;

use cobj_core::{growth, or_placeholder, FailSoft, Fault, FaultState, PtrKey};
use indexmap::IndexMap;

use crate::config::RegistryConfig;

const OWNER: &str = "ref_registry";

/// Fail-soft multiset of identity keys with per-key reference counts.
#[derive(Debug)]
pub struct RefRegistry<K = PtrKey> {
    entries: IndexMap<K, u32>,
    /// Allocated entry count; doubles when `entries` reaches it.
    n_alloc: usize,
    default_ptr: Option<K>,
    fault: FaultState,
}

impl<K: Copy + Eq + Hash> RefRegistry<K> {
    /// Create a registry with the default initial capacity.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry, or the placeholder if `config` is invalid or the
    /// storage cannot be allocated.
    pub fn with_config(config: RegistryConfig) -> Self {
        or_placeholder(OWNER, Self::try_with_config(config), Self::placeholder)
    }

    /// Create a registry, reporting why construction failed.
    pub fn try_with_config(config: RegistryConfig) -> Result<Self, Fault> {
        config.validate()?;
        let mut registry = Self {
            entries: IndexMap::new(),
            n_alloc: 0,
            default_ptr: None,
            fault: FaultState::clean(),
        };
        registry.grow(config.slots)?;
        Ok(registry)
    }

    /// The permanently invalid registry.
    pub fn placeholder() -> Self {
        Self {
            entries: IndexMap::new(),
            n_alloc: 0,
            default_ptr: None,
            fault: FaultState::invalid(),
        }
    }

    /// Add one reference to `key`.
    ///
    /// A known key has its count incremented; a count already at `u32::MAX`
    /// is a [`Fault::Overflow`]. A new key is appended with count 1,
    /// doubling the capacity first if the registry is full.
    pub fn push(&mut self, key: K) {
        if self.fault.is_set() {
            return;
        }
        let result = self.try_push(key);
        self.fault.record(OWNER, result);
    }

    fn try_push(&mut self, key: K) -> Result<(), Fault> {
        if let Some(count) = self.entries.get_mut(&key) {
            *count = count.checked_add(1).ok_or(Fault::Overflow)?;
            return Ok(());
        }
        if self.entries.len() >= self.n_alloc {
            self.grow(growth::doubled(self.n_alloc)?)?;
        }
        self.entries.insert(key, 1);
        Ok(())
    }

    /// Drop one reference from the entry at `index`, removing the entry
    /// when its count reaches zero.
    pub fn pull_index(&mut self, index: usize) {
        if self.fault.is_set() {
            return;
        }
        let Some((_, count)) = self.entries.get_index_mut(index) else {
            return;
        };
        *count -= 1;
        if *count == 0 {
            self.entries.shift_remove_index(index);
        }
    }

    /// Drop one reference from `key`, if registered.
    pub fn pull_ptr(&mut self, key: K) {
        if let Some(index) = self.index_of(key) {
            self.pull_index(index);
        }
    }

    /// Remove the entry at `index` whatever its count.
    pub fn purge_index(&mut self, index: usize) {
        if self.fault.is_set() {
            return;
        }
        self.entries.shift_remove_index(index);
    }

    /// Remove `key` whatever its count.
    pub fn purge_ptr(&mut self, key: K) {
        if let Some(index) = self.index_of(key) {
            self.purge_index(index);
        }
    }

    /// Reference count of `key`, 0 when absent.
    pub fn find(&self, key: K) -> u32 {
        if self.fault.is_set() {
            return 0;
        }
        self.entries.get(&key).copied().unwrap_or(0)
    }

    /// Position of `key` in insertion order.
    pub fn index_of(&self, key: K) -> Option<usize> {
        if self.fault.is_set() {
            return None;
        }
        self.entries.get_index_of(&key)
    }

    /// Reference count at `index`, 0 when out of range.
    pub fn count(&self, index: usize) -> u32 {
        if self.fault.is_set() {
            return 0;
        }
        self.entries.get_index(index).map_or(0, |(_, &count)| count)
    }

    /// Key at `index`, or the default key when out of range.
    pub fn ptr(&self, index: usize) -> Option<K> {
        if self.fault.is_set() {
            return self.default_ptr;
        }
        match self.entries.get_index(index) {
            Some((&key, _)) => Some(key),
            None => self.default_ptr,
        }
    }

    /// Key returned by [`ptr`](RefRegistry::ptr) for an invalid index.
    pub fn set_default_ptr(&mut self, key: Option<K>) {
        if self.fault.is_set() {
            return;
        }
        self.default_ptr = key;
    }

    /// Reserve room for `slots` entries ahead of a bulk insert. Never
    /// shrinks and never changes the length.
    pub fn prealloc(&mut self, slots: usize) {
        if self.fault.is_set() {
            return;
        }
        let result = self.grow(slots);
        self.fault.record(OWNER, result);
    }

    /// Drop every entry, keeping the storage.
    pub fn clear(&mut self) {
        if self.fault.is_set() {
            return;
        }
        self.entries.clear();
    }

    /// Number of distinct keys.
    pub fn length(&self) -> usize {
        if self.fault.is_set() {
            return 0;
        }
        self.entries.len()
    }

    /// Allocated entry count.
    pub fn capacity(&self) -> usize {
        if self.fault.is_set() {
            return 0;
        }
        self.n_alloc
    }

    /// Iterate over `(key, count)` in insertion order. Empty while faulted.
    pub fn iter(&self) -> impl Iterator<Item = (K, u32)> + '_ {
        let live = if self.fault.is_set() {
            None
        } else {
            Some(self.entries.iter())
        };
        live.into_iter().flatten().map(|(&key, &count)| (key, count))
    }

    /// Storage cost of one entry: the map's bucket (cached hash, key and
    /// count) plus its slot in the hash index.
    fn entry_bytes() -> usize {
        mem::size_of::<(usize, K, u32)>() + mem::size_of::<usize>()
    }

    fn grow(&mut self, n_alloc: usize) -> Result<(), Fault> {
        if n_alloc <= self.n_alloc {
            return Ok(());
        }
        growth::checked_bytes(n_alloc, Self::entry_bytes())?;
        self.entries
            .try_reserve_exact(n_alloc - self.entries.len())
            .map_err(|_| Fault::Memory)?;
        tracing::trace!(from = self.n_alloc, to = n_alloc, "registry grown");
        self.n_alloc = n_alloc;
        Ok(())
    }
}

impl<K: Copy + Eq + Hash> Default for RefRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> FailSoft for RefRegistry<K> {
    fn fault(&self) -> Option<Fault> {
        self.fault.get()
    }

    fn repair(&mut self) {
        self.fault.repair();
    }
}

impl<K: Copy + Eq + Hash> Clone for RefRegistry<K> {
    /// Copy the full capacity and entries into a healthy registry, or the
    /// placeholder when `self` is faulted or allocation fails.
    fn clone(&self) -> Self {
        let copy = self.fault.check().and_then(|()| {
            let mut registry = Self {
                entries: IndexMap::new(),
                n_alloc: 0,
                default_ptr: self.default_ptr,
                fault: FaultState::clean(),
            };
            registry.grow(self.n_alloc)?;
            registry.entries.extend(self.entries.iter().map(|(&k, &c)| (k, c)));
            Ok(registry)
        });
        or_placeholder(OWNER, copy, Self::placeholder)
    }
}
