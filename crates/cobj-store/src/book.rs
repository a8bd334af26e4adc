//! Append-only string book with stack discipline.
//!
//! A [`Book`] stores words (NUL-terminated byte strings) grouped into
//! contiguous runs. All words of all groups live in one byte buffer:
//!
//! ```text
//! chars:  a \0 b b \0 c c c \0
//!         ^    ^       ^
//! words:  0    2       5          (byte offsets)
//! groups: 0            2          (word offsets; last group runs to the end)
//! ```
//!
//! Words and groups can only be appended or popped from the end, so
//! removal is a counter rewind and no hole ever forms in the buffers. All
//! three buffers double on demand under the same checked growth policy.

use std::ops::Range;

use cobj_core::{growth, or_placeholder, FailSoft, Fault, FaultState, Slots};

use crate::config::BookConfig;

const OWNER: &str = "book";

/// Fail-soft three-level string arena.
#[derive(Debug)]
pub struct Book {
    /// Word bytes, each word followed by a NUL terminator.
    chars: Slots<u8>,
    /// Byte offset of each word's first byte.
    words: Slots<usize>,
    /// Word offset of each group's first word.
    groups: Slots<usize>,
    /// The next write opens a new group.
    new_group: bool,
    fault: FaultState,
}

impl Book {
    /// Create a book with the default initial capacities.
    pub fn new() -> Self {
        Self::with_config(BookConfig::default())
    }

    /// Create a book, or the placeholder if `config` is invalid or the
    /// storage cannot be allocated.
    pub fn with_config(config: BookConfig) -> Self {
        or_placeholder(OWNER, Self::try_with_config(config), Self::placeholder)
    }

    /// Create a book, reporting why construction failed.
    pub fn try_with_config(config: BookConfig) -> Result<Self, Fault> {
        config.validate()?;
        let mut book = Self {
            chars: Slots::new(),
            words: Slots::new(),
            groups: Slots::new(),
            new_group: true,
            fault: FaultState::clean(),
        };
        book.grow(config.bytes, config.words, config.groups)?;
        Ok(book)
    }

    /// The permanently invalid book.
    pub const fn placeholder() -> Self {
        Self {
            chars: Slots::new(),
            words: Slots::new(),
            groups: Slots::new(),
            new_group: false,
            fault: FaultState::invalid(),
        }
    }

    /// Append `word`, opening a new group first if one was prepared.
    ///
    /// The stored word ends at the first NUL byte of `word`, if any.
    pub fn write(&mut self, word: &str) {
        if self.fault.is_set() {
            return;
        }
        let result = self.try_write(word);
        self.fault.record(OWNER, result);
    }

    fn try_write(&mut self, word: &str) -> Result<(), Fault> {
        let bytes = word.as_bytes();
        let bytes = match bytes.iter().position(|&b| b == 0) {
            Some(nul) => &bytes[..nul],
            None => bytes,
        };
        let needed = bytes.len().checked_add(1).ok_or(Fault::Overflow)?;

        let n_chars = growth::grow_until(self.chars.capacity(), self.chars.len(), needed)?;
        let n_words = growth::next_capacity(self.words.capacity(), self.words.len())?;
        let n_groups = growth::next_capacity(self.groups.capacity(), self.groups.len())?;
        self.grow(n_chars, n_words, n_groups)?;

        if self.new_group {
            self.groups.push(self.words.len());
            self.new_group = false;
        }
        self.words.push(self.chars.len());
        self.chars.extend_from_slice(bytes);
        self.chars.extend_from_slice(&[0]);
        Ok(())
    }

    /// Make the next [`write`](Book::write) open a new group.
    pub fn prepare_new_group(&mut self) {
        if self.fault.is_set() {
            return;
        }
        self.new_group = true;
    }

    /// Cancel a prepared group, so the next write extends the last group.
    ///
    /// No-op while the book has no group: the first word always opens one.
    pub fn undo_new_group(&mut self) {
        if self.fault.is_set() || self.groups.is_empty() {
            return;
        }
        self.new_group = false;
    }

    /// Whether the next write opens a new group.
    pub fn is_group_pending(&self) -> bool {
        !self.fault.is_set() && self.new_group
    }

    /// Remove the last word. A group left without words is removed too.
    pub fn pop_word(&mut self) {
        if self.fault.is_set() {
            return;
        }
        let Some(start) = self.words.pop() else {
            return;
        };
        if self.groups.last() == Some(&self.words.len()) {
            self.groups.pop();
        }
        if self.groups.is_empty() {
            self.new_group = true;
        }
        self.chars.truncate(start);
    }

    /// Remove the last group and every word in it.
    pub fn pop_group(&mut self) {
        if self.fault.is_set() {
            return;
        }
        let Some(first_word) = self.groups.pop() else {
            return;
        };
        if let Some(&start) = self.words.get(first_word) {
            self.chars.truncate(start);
        }
        self.words.truncate(first_word);
        if self.groups.is_empty() {
            self.new_group = true;
        }
    }

    /// Drop every word and group, keeping the storage.
    pub fn clear(&mut self) {
        if self.fault.is_set() {
            return;
        }
        self.chars.clear();
        self.words.clear();
        self.groups.clear();
        self.new_group = true;
    }

    /// Like [`clear`](Book::clear), but first overwrite the whole byte
    /// buffer with zeros.
    pub fn zero(&mut self) {
        if self.fault.is_set() {
            return;
        }
        self.chars.wipe();
        self.words.clear();
        self.groups.clear();
        self.new_group = true;
    }

    /// Grow the buffers to at least the given capacities. Never shrinks.
    pub fn prealloc(&mut self, bytes: usize, words: usize, groups: usize) {
        if self.fault.is_set() {
            return;
        }
        let result = self.grow(bytes, words, groups);
        self.fault.record(OWNER, result);
    }

    /// Word at global `index`, `""` when out of range.
    pub fn word(&self, index: usize) -> &str {
        if self.fault.is_set() {
            return "";
        }
        let Some(&start) = self.words.get(index) else {
            return "";
        };
        let end = match self.words.get(index + 1) {
            Some(&next) => next,
            None => self.chars.len(),
        };
        // `end - 1` skips the terminator.
        std::str::from_utf8(&self.chars.as_slice()[start..end - 1]).unwrap_or("")
    }

    /// Word `local` of group `group`, `""` when out of range.
    pub fn word_in_group(&self, group: usize, local: usize) -> &str {
        match self.resolve(group, local) {
            Some(index) => self.word(index),
            None => "",
        }
    }

    /// Global index of word `local` in group `group`, 0 when out of range.
    pub fn word_index(&self, group: usize, local: usize) -> usize {
        self.resolve(group, local).unwrap_or(0)
    }

    /// Number of words in `group`, 0 when out of range.
    pub fn group_length(&self, group: usize) -> usize {
        if self.fault.is_set() {
            return 0;
        }
        self.group_size(group)
    }

    /// Global word indices spanned by `group`. Empty when out of range.
    pub fn group_range(&self, group: usize) -> Range<usize> {
        if self.fault.is_set() {
            return 0..0;
        }
        match self.groups.get(group) {
            Some(&first) => first..first + self.group_size(group),
            None => 0..0,
        }
    }

    /// Words of `group` in order; `.rev()` walks them backwards.
    pub fn group_words(&self, group: usize) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.group_range(group).map(move |index| self.word(index))
    }

    /// Number of groups.
    pub fn groups_number(&self) -> usize {
        if self.fault.is_set() {
            return 0;
        }
        self.groups.len()
    }

    /// Number of words across all groups.
    pub fn words_number(&self) -> usize {
        if self.fault.is_set() {
            return 0;
        }
        self.words.len()
    }

    /// Bytes in use, terminators included.
    pub fn length(&self) -> usize {
        if self.fault.is_set() {
            return 0;
        }
        self.chars.len()
    }

    /// Current buffer capacities. All zero while faulted.
    pub fn capacities(&self) -> BookConfig {
        if self.fault.is_set() {
            return BookConfig::new(0, 0, 0);
        }
        BookConfig::new(
            self.chars.capacity(),
            self.words.capacity(),
            self.groups.capacity(),
        )
    }

    fn resolve(&self, group: usize, local: usize) -> Option<usize> {
        if self.fault.is_set() || local >= self.group_size(group) {
            return None;
        }
        self.groups.get(group).map(|&first| first + local)
    }

    fn group_size(&self, group: usize) -> usize {
        let Some(&first) = self.groups.get(group) else {
            return 0;
        };
        match self.groups.get(group + 1) {
            Some(&next) => next - first,
            None => self.words.len() - first,
        }
    }

    /// Check every size first so an overflow leaves all three buffers
    /// untouched.
    fn grow(&mut self, chars: usize, words: usize, groups: usize) -> Result<(), Fault> {
        growth::checked_bytes_of::<u8>(chars)?;
        growth::checked_bytes_of::<usize>(words)?;
        growth::checked_bytes_of::<usize>(groups)?;
        self.chars.reserve_to(chars)?;
        self.words.reserve_to(words)?;
        self.groups.reserve_to(groups)?;
        Ok(())
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

impl FailSoft for Book {
    fn fault(&self) -> Option<Fault> {
        self.fault.get()
    }

    fn repair(&mut self) {
        self.fault.repair();
    }
}

impl Clone for Book {
    /// Copy all three buffers at full capacity into a healthy book, or the
    /// placeholder when `self` is faulted or allocation fails.
    fn clone(&self) -> Self {
        let copy = self.fault.check().and_then(|()| {
            Ok(Self {
                chars: self.chars.duplicate()?,
                words: self.words.duplicate()?,
                groups: self.groups.duplicate()?,
                new_group: self.new_group,
                fault: FaultState::clean(),
            })
        });
        or_placeholder(OWNER, copy, Self::placeholder)
    }
}
