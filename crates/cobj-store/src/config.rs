//! Initial-capacity configuration for the growable containers.

use cobj_core::Fault;

/// Initial allocation of a [`Book`](crate::Book).
///
/// All three buffers double on demand, so these only matter for avoiding
/// early reallocations. Validated at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookConfig {
    /// Byte buffer capacity, terminators included.
    ///
    /// Default: 1. Must be non-zero.
    pub bytes: usize,

    /// Word offset table capacity.
    ///
    /// Default: 1. Must be non-zero.
    pub words: usize,

    /// Group offset table capacity.
    ///
    /// Default: 1. Must be non-zero.
    pub groups: usize,
}

impl BookConfig {
    /// Default byte capacity.
    pub const DEFAULT_BYTES: usize = 1;

    /// Default word capacity.
    pub const DEFAULT_WORDS: usize = 1;

    /// Default group capacity.
    pub const DEFAULT_GROUPS: usize = 1;

    /// Create a config with explicit capacities.
    pub fn new(bytes: usize, words: usize, groups: usize) -> Self {
        Self {
            bytes,
            words,
            groups,
        }
    }

    /// Reject zero capacities, which doubling could never grow.
    pub fn validate(&self) -> Result<(), Fault> {
        if self.bytes == 0 || self.words == 0 || self.groups == 0 {
            return Err(Fault::Param);
        }
        Ok(())
    }
}

impl Default for BookConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_BYTES,
            Self::DEFAULT_WORDS,
            Self::DEFAULT_GROUPS,
        )
    }
}

/// Initial allocation of a [`RefRegistry`](crate::RefRegistry).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Entry capacity before the first doubling.
    ///
    /// Default: 1. Must be non-zero.
    pub slots: usize,
}

impl RegistryConfig {
    /// Default entry capacity.
    pub const DEFAULT_SLOTS: usize = 1;

    /// Create a config with the given entry capacity.
    pub fn new(slots: usize) -> Self {
        Self { slots }
    }

    /// Reject a zero capacity.
    pub fn validate(&self) -> Result<(), Fault> {
        if self.slots == 0 {
            return Err(Fault::Param);
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SLOTS)
    }
}
