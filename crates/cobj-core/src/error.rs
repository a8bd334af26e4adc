//! Fault taxonomy and the sticky fault cell carried by every container.
//!
//! A container never returns an error to its caller. Instead the first
//! failure is stored in a [`FaultState`] and every later operation becomes a
//! no-op until the fault is repaired.

use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;

/// Why a container stopped accepting operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fault {
    /// The instance is a construction-failure placeholder. Permanent.
    Invalid,
    /// The caller passed an argument the operation cannot honour
    /// (e.g. a zero capacity).
    Param,
    /// A size computation exceeded the largest allocatable byte count.
    Overflow,
    /// The allocator refused a (re)allocation.
    Memory,
}

impl Fault {
    /// Whether [`FaultState::repair`] can clear this fault.
    pub fn is_repairable(self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid => write!(f, "placeholder instance"),
            Self::Param => write!(f, "invalid parameter"),
            Self::Overflow => write!(f, "size computation overflow"),
            Self::Memory => write!(f, "memory allocation failed"),
        }
    }
}

impl Error for Fault {}

/// Growth paths reject oversized requests with [`growth::checked_bytes`]
/// before reserving, so a reservation that still fails is an allocator
/// refusal.
///
/// [`growth::checked_bytes`]: crate::growth::checked_bytes
impl From<TryReserveError> for Fault {
    fn from(_: TryReserveError) -> Self {
        Self::Memory
    }
}

/// Sticky fault cell.
///
/// `None` is the healthy state. Once a fault is recorded it stays until
/// [`repair`](FaultState::repair) is called, and `Invalid` never leaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaultState(Option<Fault>);

impl FaultState {
    /// A healthy cell.
    pub const fn clean() -> Self {
        Self(None)
    }

    /// The permanent placeholder cell.
    pub const fn invalid() -> Self {
        Self(Some(Fault::Invalid))
    }

    /// The stored fault, if any.
    pub fn get(&self) -> Option<Fault> {
        self.0
    }

    /// Whether any fault is stored.
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// `Err` with the stored fault, so fallible paths can start with `?`.
    pub fn check(&self) -> Result<(), Fault> {
        match self.0 {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    /// Store the fault carried by `result`, if any, and unwrap the success.
    ///
    /// `owner` names the container in the emitted event.
    pub fn record<T>(&mut self, owner: &'static str, result: Result<T, Fault>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(fault) => {
                self.set(owner, fault);
                None
            }
        }
    }

    /// Store `fault`. An `Invalid` cell is never overwritten.
    pub fn set(&mut self, owner: &'static str, fault: Fault) {
        if self.0 == Some(Fault::Invalid) {
            return;
        }
        tracing::debug!(container = owner, %fault, "container faulted");
        self.0 = Some(fault);
    }

    /// Clear any fault except `Invalid`.
    pub fn repair(&mut self) {
        if self.0.is_some_and(Fault::is_repairable) {
            self.0 = None;
        }
    }
}

/// Convert a failed constructor into its placeholder, logging the cause.
///
/// Every container constructor that cannot report an error funnels through
/// this.
pub fn or_placeholder<T>(
    owner: &'static str,
    result: Result<T, Fault>,
    placeholder: fn() -> T,
) -> T {
    result.unwrap_or_else(|fault| {
        tracing::debug!(container = owner, %fault, "construction failed, using placeholder");
        placeholder()
    })
}
