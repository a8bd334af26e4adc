//! Test fixtures for cobj development.
//!
//! Provides builders that bring each container into a known state in one
//! call, a [`BookState`] snapshot for comparing books across operations,
//! and [`overflowed`] containers for exercising the fault path.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{book_from_groups, overflowed, registry_with_counts, table_with_ids, BookState};
