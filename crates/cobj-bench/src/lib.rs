//! Benchmark workloads for the cobj containers.
//!
//! Provides deterministic inputs for the criterion benches:
//!
//! - [`id_sequence`]: pseudo-random input ids with repeats, via seed
//! - [`word_list`]: words of varying length for book writes
//! - [`grouped_words`]: the same words split into lines

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cobj_core::InputId;
use cobj_store::Book;

const LCG_MUL: u64 = 6364136223846793005;
const LCG_INC: u64 = 1442695040888963407;

fn lcg(state: u64) -> u64 {
    state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC)
}

/// Generate `n` input ids drawn from `0..distinct`. A `distinct` of 0 is
/// treated as 1.
///
/// Ids repeat, so pushing the sequence exercises the replace path as well
/// as plain appends.
pub fn id_sequence(n: usize, distinct: u32, seed: u64) -> Vec<InputId> {
    let distinct = u64::from(distinct.max(1));
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = lcg(state);
            InputId(((state >> 33) % distinct) as u32)
        })
        .collect()
}

/// Generate `n` lowercase words of length 1 to `max_len`. A `max_len` of 0
/// is treated as 1.
pub fn word_list(n: usize, max_len: usize, seed: u64) -> Vec<String> {
    let max_len = max_len.max(1);
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = lcg(state);
            let len = 1 + (state >> 33) as usize % max_len;
            (0..len)
                .map(|i| (b'a' + ((state >> (i % 32)) % 26) as u8) as char)
                .collect()
        })
        .collect()
}

/// Split `words` into consecutive groups of `per_group` words.
pub fn grouped_words(words: &[String], per_group: usize) -> Vec<Vec<&str>> {
    words
        .chunks(per_group)
        .map(|chunk| chunk.iter().map(String::as_str).collect())
        .collect()
}

/// Write `groups` into a fresh book, one book group per inner list.
pub fn fill_book(groups: &[Vec<&str>]) -> Book {
    let mut book = Book::new();
    for group in groups {
        book.prepare_new_group();
        for word in group {
            book.write(word);
        }
    }
    book
}
