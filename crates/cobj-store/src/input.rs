//! Fixed-capacity table of active inputs.
//!
//! [`InputTable`] associates an [`InputId`] with a 2D position and an opaque
//! payload. It models a bounded hardware resource (simultaneous pointer or
//! touch contacts), so its capacity never grows implicitly: a push into a
//! full table is dropped. Only [`resize`](InputTable::resize) changes the
//! capacity.
//!
//! Entries are kept in push order. Lookup by id is a linear scan.

use std::slice;

use cobj_core::{or_placeholder, FailSoft, Fault, FaultState, InputId, Slots};

const OWNER: &str = "input_table";

/// One live input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputSlot<P> {
    /// Caller-chosen id, unique within the table.
    pub id: InputId,
    /// Horizontal position.
    pub x: i16,
    /// Vertical position.
    pub y: i16,
    /// Opaque payload, never dereferenced by the table.
    pub payload: P,
}

/// Fail-soft, fixed-capacity slot table keyed by [`InputId`].
#[derive(Debug)]
pub struct InputTable<P> {
    slots: Slots<InputSlot<P>>,
    default_payload: Option<P>,
    fault: FaultState,
}

impl<P: Copy> InputTable<P> {
    /// Create a table with room for `max_inputs` entries.
    ///
    /// Returns the [placeholder](InputTable::placeholder) when `max_inputs`
    /// is zero or the storage cannot be allocated.
    pub fn new(max_inputs: usize) -> Self {
        or_placeholder(OWNER, Self::try_new(max_inputs), Self::placeholder)
    }

    /// Create a table, reporting why construction failed.
    pub fn try_new(max_inputs: usize) -> Result<Self, Fault> {
        if max_inputs == 0 {
            return Err(Fault::Param);
        }
        Ok(Self {
            slots: Slots::with_capacity(max_inputs)?,
            default_payload: None,
            fault: FaultState::clean(),
        })
    }

    /// The permanently invalid table: no storage, every operation a no-op.
    pub const fn placeholder() -> Self {
        Self {
            slots: Slots::new(),
            default_payload: None,
            fault: FaultState::invalid(),
        }
    }

    /// Insert or replace the entry for `id`.
    ///
    /// Any existing entry with the same id is removed first, then the new
    /// entry is appended at the end. When the table is full the new entry
    /// is silently dropped.
    pub fn push(&mut self, id: InputId, x: i16, y: i16, payload: P) {
        if self.fault.is_set() {
            return;
        }
        self.pull_id(id);
        let dropped = self
            .slots
            .push_within(InputSlot { id, x, y, payload })
            .is_err();
        if dropped {
            tracing::trace!(
                %id,
                capacity = self.slots.capacity(),
                "input table full, push dropped"
            );
        }
    }

    /// Index of the entry for `id`.
    pub fn find(&self, id: InputId) -> Option<usize> {
        if self.fault.is_set() {
            return None;
        }
        self.slots.iter().position(|slot| slot.id == id)
    }

    /// Whether an entry for `id` is live.
    pub fn contains(&self, id: InputId) -> bool {
        self.find(id).is_some()
    }

    /// Remove the entry at `index`, shifting later entries down.
    pub fn pull_index(&mut self, index: usize) {
        if self.fault.is_set() {
            return;
        }
        self.slots.shift_remove(index);
    }

    /// Remove the entry for `id`, if any.
    pub fn pull_id(&mut self, id: InputId) {
        if let Some(index) = self.find(id) {
            self.pull_index(index);
        }
    }

    /// Change the capacity to `max_inputs`.
    ///
    /// Shrinking below the current load drops the newest entries. Zero is a
    /// [`Fault::Param`].
    pub fn resize(&mut self, max_inputs: usize) {
        if self.fault.is_set() {
            return;
        }
        let result = if max_inputs == 0 {
            Err(Fault::Param)
        } else {
            self.slots.set_capacity(max_inputs)
        };
        self.fault.record(OWNER, result);
    }

    /// Drop every entry, keeping the storage.
    pub fn clear(&mut self) {
        if self.fault.is_set() {
            return;
        }
        self.slots.clear();
    }

    /// Payload returned by [`payload`](InputTable::payload) for an invalid
    /// index.
    pub fn set_default_payload(&mut self, payload: Option<P>) {
        if self.fault.is_set() {
            return;
        }
        self.default_payload = payload;
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<InputSlot<P>> {
        if self.fault.is_set() {
            return None;
        }
        self.slots.get(index).copied()
    }

    /// Id at `index`, `InputId(0)` when out of range.
    pub fn id(&self, index: usize) -> InputId {
        self.get(index).map(|slot| slot.id).unwrap_or_default()
    }

    /// Horizontal position at `index`, 0 when out of range.
    pub fn x(&self, index: usize) -> i16 {
        self.get(index).map_or(0, |slot| slot.x)
    }

    /// Vertical position at `index`, 0 when out of range.
    pub fn y(&self, index: usize) -> i16 {
        self.get(index).map_or(0, |slot| slot.y)
    }

    /// Payload at `index`, or the default payload when out of range.
    pub fn payload(&self, index: usize) -> Option<P> {
        match self.get(index) {
            Some(slot) => Some(slot.payload),
            None => self.default_payload,
        }
    }

    /// Number of live entries.
    pub fn load(&self) -> usize {
        if self.fault.is_set() {
            return 0;
        }
        self.slots.len()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        if self.fault.is_set() {
            return 0;
        }
        self.slots.capacity()
    }

    /// Iterate over live entries in push order. Empty while faulted.
    pub fn iter(&self) -> slice::Iter<'_, InputSlot<P>> {
        let live: &[InputSlot<P>] = if self.fault.is_set() {
            &[]
        } else {
            self.slots.as_slice()
        };
        live.iter()
    }
}

impl<P> FailSoft for InputTable<P> {
    fn fault(&self) -> Option<Fault> {
        self.fault.get()
    }

    fn repair(&mut self) {
        self.fault.repair();
    }
}

impl<P: Copy> Clone for InputTable<P> {
    /// Copy the full capacity and live entries into a healthy table, or the
    /// placeholder when `self` is faulted or allocation fails.
    fn clone(&self) -> Self {
        let copy = self.fault.check().and_then(|()| {
            Ok(Self {
                slots: self.slots.duplicate()?,
                default_payload: self.default_payload,
                fault: FaultState::clean(),
            })
        });
        or_placeholder(OWNER, copy, Self::placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(cap: usize) -> InputTable<u64> {
        InputTable::new(cap)
    }

    #[test]
    fn new_table_is_empty() {
        let t = table(4);
        assert_eq!(t.fault(), None);
        assert_eq!(t.load(), 0);
        assert_eq!(t.capacity(), 4);
    }

    #[test]
    fn zero_capacity_yields_placeholder() {
        let t = table(0);
        assert!(t.is_placeholder());
        assert_eq!(InputTable::<u64>::try_new(0).unwrap_err(), Fault::Param);
    }

    #[test]
    fn push_appends_in_order() {
        let mut t = table(4);
        t.push(InputId(7), 1, 2, 70);
        t.push(InputId(3), -4, 5, 30);
        assert_eq!(t.load(), 2);
        assert_eq!(t.id(0), InputId(7));
        assert_eq!((t.x(1), t.y(1)), (-4, 5));
        assert_eq!(t.payload(1), Some(30));
    }

    #[test]
    fn push_same_id_moves_to_end_and_overwrites() {
        let mut t = table(4);
        t.push(InputId(1), 0, 0, 10);
        t.push(InputId(2), 0, 0, 20);
        t.push(InputId(1), 9, 9, 11);
        assert_eq!(t.load(), 2);
        assert_eq!(t.find(InputId(1)), Some(1));
        assert_eq!(t.payload(1), Some(11));
        assert_eq!(t.x(1), 9);
    }

    #[test]
    fn push_into_full_table_is_dropped() {
        let mut t = table(2);
        t.push(InputId(1), 0, 0, 1);
        t.push(InputId(2), 0, 0, 2);
        t.push(InputId(3), 0, 0, 3);
        assert_eq!(t.load(), 2);
        assert!(!t.contains(InputId(3)));
        assert_eq!(t.fault(), None);
    }

    #[test]
    fn repush_in_full_table_still_fits() {
        let mut t = table(2);
        t.push(InputId(1), 0, 0, 1);
        t.push(InputId(2), 0, 0, 2);
        t.push(InputId(1), 5, 5, 3);
        assert_eq!(t.load(), 2);
        assert_eq!(t.find(InputId(1)), Some(1));
    }

    #[test]
    fn pull_shifts_survivors() {
        let mut t = table(4);
        for id in 1..=4 {
            t.push(InputId(id), 0, 0, id as u64);
        }
        t.pull_index(1);
        t.pull_id(InputId(4));
        let ids: Vec<_> = t.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        t.pull_index(9);
        t.pull_id(InputId(42));
        assert_eq!(t.load(), 2);
    }

    #[test]
    fn out_of_range_accessors_return_defaults() {
        let mut t = table(2);
        assert_eq!(t.id(0), InputId(0));
        assert_eq!(t.x(0), 0);
        assert_eq!(t.payload(0), None);
        t.set_default_payload(Some(99));
        assert_eq!(t.payload(5), Some(99));
        assert_eq!(t.get(5), None);
    }

    #[test]
    fn resize_shrink_truncates_load() {
        let mut t = table(4);
        for id in 1..=4 {
            t.push(InputId(id), 0, 0, 0);
        }
        t.resize(2);
        assert_eq!(t.capacity(), 2);
        assert_eq!(t.load(), 2);
        assert!(t.contains(InputId(2)));
        assert!(!t.contains(InputId(3)));
    }

    #[test]
    fn resize_grow_keeps_entries() {
        let mut t = table(1);
        t.push(InputId(1), 0, 0, 0);
        t.resize(3);
        t.push(InputId(2), 0, 0, 0);
        assert_eq!(t.load(), 2);
        assert_eq!(t.capacity(), 3);
    }

    #[test]
    fn resize_zero_is_param_fault() {
        let mut t = table(2);
        t.push(InputId(1), 0, 0, 0);
        t.resize(0);
        assert_eq!(t.fault(), Some(Fault::Param));
        t.repair();
        assert_eq!(t.capacity(), 2);
        assert_eq!(t.load(), 1);
    }

    #[test]
    fn oversized_resize_overflows_without_change() {
        let mut t = table(2);
        t.push(InputId(1), 3, 4, 5);
        t.resize(usize::MAX);
        assert_eq!(t.fault(), Some(Fault::Overflow));
        t.repair();
        assert_eq!(t.capacity(), 2);
        assert_eq!(t.get(0), Some(InputSlot { id: InputId(1), x: 3, y: 4, payload: 5 }));
    }

    #[test]
    fn faulted_table_ignores_mutation() {
        let mut t = table(3);
        t.push(InputId(1), 0, 0, 1);
        t.resize(0);
        t.push(InputId(2), 0, 0, 2);
        t.pull_id(InputId(1));
        t.clear();
        t.set_default_payload(Some(7));
        assert_eq!(t.load(), 0);
        assert_eq!(t.find(InputId(1)), None);
        assert_eq!(t.iter().count(), 0);
        t.repair();
        assert_eq!(t.load(), 1);
        assert!(t.contains(InputId(1)));
        assert!(!t.contains(InputId(2)));
        assert_eq!(t.payload(4), None);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut t = table(3);
        t.push(InputId(1), 0, 0, 0);
        t.clear();
        assert_eq!(t.load(), 0);
        assert_eq!(t.capacity(), 3);
    }

    #[test]
    fn placeholder_cannot_be_repaired() {
        let mut t = InputTable::<u64>::placeholder();
        t.repair();
        t.push(InputId(1), 0, 0, 0);
        assert!(t.is_placeholder());
        assert_eq!(t.load(), 0);
        assert_eq!(t.capacity(), 0);
    }

    #[test]
    fn clone_preserves_capacity_and_entries() {
        let mut t = table(8);
        t.push(InputId(5), 1, 1, 50);
        t.set_default_payload(Some(1));
        let c = t.clone();
        assert_eq!(c.fault(), None);
        assert_eq!(c.capacity(), 8);
        assert_eq!(c.get(0), t.get(0));
        assert_eq!(c.payload(3), Some(1));
    }

    #[test]
    fn clone_of_faulted_table_is_placeholder() {
        let mut t = table(2);
        t.resize(0);
        assert!(t.clone().is_placeholder());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashSet;

        proptest! {
            #[test]
            fn ids_stay_unique(
                ops in proptest::collection::vec((0u32..8, any::<bool>()), 1..64),
                cap in 1usize..6,
            ) {
                let mut t = InputTable::new(cap);
                for (id, pull) in ops {
                    if pull {
                        t.pull_id(InputId(id));
                    } else {
                        t.push(InputId(id), 0, 0, id);
                    }
                    let ids: HashSet<_> = t.iter().map(|s| s.id).collect();
                    prop_assert_eq!(ids.len(), t.load());
                    prop_assert!(t.load() <= cap);
                }
            }
        }
    }
}
