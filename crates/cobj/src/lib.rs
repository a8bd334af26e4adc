//! cobj: fail-soft growable containers for the object layer of a GUI toolkit.
//!
//! This is the top-level facade crate that re-exports the public API of
//! the cobj sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use cobj::prelude::*;
//!
//! // Active pointer inputs, at most two at a time.
//! let mut inputs: InputTable<u32> = InputTable::new(2);
//! inputs.push(InputId(1), 10, 20, 100);
//! inputs.push(InputId(2), 30, 40, 200);
//! inputs.push(InputId(3), 50, 60, 300); // dropped: table is full
//! assert_eq!(inputs.load(), 2);
//! assert_eq!(inputs.find(InputId(3)), None);
//!
//! // Shared objects counted by identity.
//! let widget = String::from("button");
//! let mut refs = RefRegistry::new();
//! refs.push(PtrKey::of(&widget));
//! refs.push(PtrKey::of(&widget));
//! refs.pull_ptr(PtrKey::of(&widget));
//! assert_eq!(refs.find(PtrKey::of(&widget)), 1);
//!
//! // Words grouped into lines.
//! let mut book = Book::new();
//! book.write("hello");
//! book.write("world");
//! book.prepare_new_group();
//! book.write("bye");
//! assert_eq!(book.groups_number(), 2);
//! assert_eq!(book.group_words(0).collect::<Vec<_>>(), ["hello", "world"]);
//!
//! // An oversized request faults the book and leaves it untouched.
//! book.prealloc(usize::MAX, 1, 1);
//! assert_eq!(book.fault(), Some(Fault::Overflow));
//! book.write("ignored");
//! book.repair();
//! assert_eq!(book.words_number(), 3);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cobj-core` | Faults, growth arithmetic, `Slots`, ids, `FailSoft` |
//! | [`store`] | `cobj-store` | `InputTable`, `RefRegistry`, `Book` and their configs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types shared by every container (`cobj-core`).
///
/// Contains the [`types::Fault`] taxonomy, the [`types::growth`] policy
/// and the [`types::FailSoft`] trait.
pub use cobj_core as types;

/// The containers (`cobj-store`).
///
/// [`store::InputTable`] for fixed-capacity input slots,
/// [`store::RefRegistry`] for identity-keyed reference counts and
/// [`store::Book`] for grouped strings.
pub use cobj_store as store;

/// Common imports for typical cobj usage.
///
/// ```rust
/// use cobj::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use cobj_core::{FailSoft, Fault, InputId, PtrKey};

    // Containers
    pub use cobj_store::{Book, BookConfig, InputSlot, InputTable, RefRegistry, RegistryConfig};
}
