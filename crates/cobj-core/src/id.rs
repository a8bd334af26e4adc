//! Strongly-typed identifiers stored by the containers.

use std::fmt;

/// Identifies one active input (pointer, touch contact, hit-test target).
///
/// Ids are chosen by the caller; the input table only guarantees that at
/// most one live slot carries a given id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputId(pub u32);

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for InputId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identity of an externally-owned object: its address, never its contents.
///
/// Two `PtrKey`s are equal exactly when they were taken from the same
/// place in memory. The key is never dereferenced, so it stays valid to
/// compare after the referent is gone; the owner decides when a key is
/// stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PtrKey(usize);

impl PtrKey {
    /// Key for the object behind `value`.
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self::from_ptr(value as *const T)
    }

    /// Key for a raw pointer. Fat pointers are keyed by their data address.
    pub fn from_ptr<T: ?Sized>(ptr: *const T) -> Self {
        Self(ptr.cast::<()>() as usize)
    }

    /// The address this key was taken from.
    pub fn addr(self) -> usize {
        self.0
    }
}

impl fmt::Display for PtrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl<T: ?Sized> From<&T> for PtrKey {
    fn from(value: &T) -> Self {
        Self::of(value)
    }
}
