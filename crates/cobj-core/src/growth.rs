//! Overflow-checked capacity arithmetic.
//!
//! Every growth path computes its new capacity here before touching any
//! storage. A request whose byte size cannot be allocated is rejected with
//! [`Fault::Overflow`] and the caller mutates nothing.

use crate::error::Fault;

/// Largest byte count a single allocation may span.
///
/// Rust allocations are limited to `isize::MAX` bytes.
pub const MAX_ALLOC_BYTES: usize = isize::MAX as usize;

/// Byte size of `count` elements of `elem_size` bytes each.
///
/// Returns `Err(Fault::Overflow)` when the product exceeds
/// [`MAX_ALLOC_BYTES`].
pub fn checked_bytes(count: usize, elem_size: usize) -> Result<usize, Fault> {
    match count.checked_mul(elem_size) {
        Some(bytes) if bytes <= MAX_ALLOC_BYTES => Ok(bytes),
        _ => Err(Fault::Overflow),
    }
}

/// [`checked_bytes`] for `count` values of `T`.
pub fn checked_bytes_of<T>(count: usize) -> Result<usize, Fault> {
    checked_bytes(count, std::mem::size_of::<T>())
}

/// `n * 2`, or `Err(Fault::Overflow)`.
pub fn doubled(n: usize) -> Result<usize, Fault> {
    n.checked_mul(2).ok_or(Fault::Overflow)
}

/// Double `capacity` until at least `needed` slots remain past `used`.
///
/// A zero capacity starts from one so the loop always makes progress.
/// Returns the capacity unchanged when it already fits.
pub fn grow_until(capacity: usize, used: usize, needed: usize) -> Result<usize, Fault> {
    let target = used.checked_add(needed).ok_or(Fault::Overflow)?;
    let mut capacity = capacity.max(1).max(used);
    while capacity < target {
        capacity = doubled(capacity)?;
    }
    Ok(capacity)
}

/// Next capacity for an append into a sequence of `len` items that has
/// `capacity` slots: doubled when full, unchanged otherwise.
pub fn next_capacity(capacity: usize, len: usize) -> Result<usize, Fault> {
    if len >= capacity {
        doubled(capacity.max(1))
    } else {
        Ok(capacity)
    }
}
