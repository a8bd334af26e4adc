//! Container builders and state snapshots.
//!
//! - [`book_from_groups`]: a [`Book`] holding the given words, one group
//!   per inner slice.
//! - [`table_with_ids`]: an [`InputTable`] filled with sequential payloads.
//! - [`registry_with_counts`]: a [`RefRegistry`] with given reference counts.
//! - [`overflowed`]: one faulted container of each kind.
//! - [`BookState`]: the observable shape of a book.

use cobj_core::InputId;
use cobj_store::{Book, InputTable, RefRegistry};

/// Build a book with one group per entry of `groups`.
///
/// An empty inner slice prepares a group that never opens, the same as
/// calling [`Book::prepare_new_group`] and writing nothing.
pub fn book_from_groups(groups: &[&[&str]]) -> Book {
    let mut book = Book::new();
    for group in groups {
        book.prepare_new_group();
        for word in *group {
            book.write(word);
        }
    }
    book
}

/// Build a table of capacity `max_inputs` holding `ids` in order.
///
/// Input `i` is placed at `(i, -i)` and carries payload `i`. Coordinates
/// saturate at `i16::MAX`.
pub fn table_with_ids(max_inputs: usize, ids: &[u32]) -> InputTable<usize> {
    let mut table = InputTable::new(max_inputs);
    for (i, &id) in ids.iter().enumerate() {
        let coord = coord_of(i);
        table.push(InputId(id), coord, -coord, i);
    }
    table
}

fn coord_of(index: usize) -> i16 {
    i16::try_from(index).unwrap_or(i16::MAX)
}

/// Build a registry where key `k` holds reference count `n` for each
/// `(k, n)` pair.
pub fn registry_with_counts(counts: &[(u64, u32)]) -> RefRegistry<u64> {
    let mut registry = RefRegistry::new();
    for &(key, n) in counts {
        for _ in 0..n {
            registry.push(key);
        }
    }
    registry
}

/// One container of each kind, each faulted with
/// [`Fault::Overflow`](cobj_core::Fault::Overflow) by an
/// oversized growth request after holding one entry.
///
/// [`FailSoft::repair`](cobj_core::FailSoft::repair) brings each back to
/// that one-entry state.
pub fn overflowed() -> (InputTable<usize>, RefRegistry<u64>, Book) {
    let mut table = table_with_ids(2, &[1]);
    let mut registry = registry_with_counts(&[(1, 1)]);
    let words: [&[&str]; 1] = [&["a"]];
    let mut book = book_from_groups(&words);
    table.resize(usize::MAX);
    registry.prealloc(usize::MAX);
    book.prealloc(usize::MAX, 1, 1);
    (table, registry, book)
}

/// Observable shape of a [`Book`]: every group as its list of words, plus
/// the byte length and the pending-group flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookState {
    pub groups: Vec<Vec<String>>,
    pub length: usize,
    pub group_pending: bool,
}

impl BookState {
    /// Capture the current state of `book`.
    pub fn of(book: &Book) -> Self {
        let groups = (0..book.groups_number())
            .map(|g| book.group_words(g).map(str::to_owned).collect())
            .collect();
        Self {
            groups,
            length: book.length(),
            group_pending: book.is_group_pending(),
        }
    }

    /// Total words across all groups.
    pub fn words(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobj_core::{FailSoft, Fault};

    #[test]
    fn book_from_groups_matches_state() {
        let groups: [&[&str]; 2] = [&["a", "bc"], &["d"]];
        let book = book_from_groups(&groups);
        let state = BookState::of(&book);
        assert_eq!(state.groups, vec![vec!["a", "bc"], vec!["d"]]);
        assert_eq!(state.length, 7);
        assert_eq!(state.words(), 3);
        assert!(!state.group_pending);
    }

    #[test]
    fn table_with_ids_places_payloads() {
        let table = table_with_ids(4, &[7, 9]);
        assert_eq!(table.load(), 2);
        assert_eq!(table.payload(1), Some(1));
        assert_eq!(table.y(1), -1);
    }

    #[test]
    fn coordinates_saturate_past_i16_range() {
        assert_eq!(coord_of(7), 7);
        assert_eq!(coord_of(32_767), i16::MAX);
        assert_eq!(coord_of(32_768), i16::MAX);
        assert_eq!(coord_of(usize::MAX), i16::MAX);
    }

    #[test]
    fn registry_with_counts_accumulates() {
        let registry = registry_with_counts(&[(1, 3), (2, 1)]);
        assert_eq!(registry.find(1), 3);
        assert_eq!(registry.length(), 2);
    }

    #[test]
    fn overflowed_repairs_to_one_entry() {
        let (mut table, mut registry, mut book) = overflowed();
        assert_eq!(table.fault(), Some(Fault::Overflow));
        assert_eq!(registry.fault(), Some(Fault::Overflow));
        assert_eq!(book.fault(), Some(Fault::Overflow));
        table.repair();
        registry.repair();
        book.repair();
        assert_eq!(table.load(), 1);
        assert_eq!(registry.length(), 1);
        assert_eq!(book.words_number(), 1);
    }
}
