//! Core types for the cobj containers.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! pieces every container is built from: the [`Fault`] taxonomy and its
//! sticky [`FaultState`] cell, the overflow-checked [`growth`] arithmetic,
//! the [`Slots`] record sequence, identity types, and the [`FailSoft`]
//! trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod growth;
pub mod id;
pub mod slots;
pub mod traits;

pub use error::{or_placeholder, Fault, FaultState};
pub use id::{InputId, PtrKey};
pub use slots::Slots;
pub use traits::FailSoft;
