//! Fail-soft containers for the cobj object model.
//!
//! Three containers share one contract: a failed operation records a
//! sticky [`Fault`](cobj_core::Fault) instead of panicking or returning an
//! error, and every later call on the faulted container is a no-op until
//! [`FailSoft::repair`](cobj_core::FailSoft::repair). A container that could
//! not be built at all is a permanently invalid placeholder.
//!
//! ```text
//! InputTable<P>   fixed capacity, unique ids, order-preserving removal
//! RefRegistry<K>  reference counts keyed by identity, doubling growth
//! Book            words in groups, one byte buffer, stack discipline
//! ```
//!
//! All growth goes through [`cobj_core::growth`], so an oversized request
//! is rejected before any storage is touched.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod book;
pub mod config;
pub mod input;
pub mod registry;

// Public re-exports for the primary API surface.
pub use book::Book;
pub use config::{BookConfig, RegistryConfig};
pub use input::{InputSlot, InputTable};
pub use registry::RefRegistry;
