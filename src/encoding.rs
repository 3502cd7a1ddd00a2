use itertools::Itertools;
use std::fmt;

/// Number of letters a [`LetterMask`] can hold, `a` through `z`.
pub const ALPHABET_SIZE: usize = 26;

/// One bit per letter: bit `i` is set iff the letter `b'a' + i` occurs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LetterMask(u32);

impl LetterMask {
    pub const EMPTY: LetterMask = LetterMask(0);

    pub fn from_bits(bits: u32) -> Self {
        debug_assert!(bits >> ALPHABET_SIZE == 0);
        LetterMask(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Number of distinct letters.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_disjoint(self, other: LetterMask) -> bool {
        self.0 & other.0 == 0
    }

    pub fn union(self, other: LetterMask) -> LetterMask {
        LetterMask(self.0 | other.0)
    }

    pub fn contains_letter(self, letter: u8) -> bool {
        letter_index(letter).map_or(false, |idx| self.0 & (1 << idx) != 0)
    }

    /// Letters present in the mask, in alphabetical order.
    pub fn letters(self) -> impl Iterator<Item = char> {
        (0..ALPHABET_SIZE as u8)
            .filter(move |idx| self.0 & (1 << idx) != 0)
            .map(|idx| (b'a' + idx) as char)
    }
}

impl fmt::Display for LetterMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.letters() {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

fn letter_index(c: u8) -> Option<u32> {
    c.is_ascii_lowercase().then(|| (c - b'a') as u32)
}

/// Encodes `word` as a letter mask.
///
/// Returns `None` if a letter repeats (such a word can never be part of a
/// disjoint tuple) or if the word holds anything but `a..=z`.
pub fn encode(word: &str) -> Option<LetterMask> {
    let mut mask = 0u32;
    for c in word.bytes() {
        let bit = 1 << letter_index(c)?;
        if mask & bit != 0 {
            return None;
        }
        mask |= bit;
    }
    Some(LetterMask(mask))
}

/// True if some letter occurs more than once in `word`.
pub fn has_duplicate_letters(word: &str) -> bool {
    !word.bytes().all_unique()
}

/// A word takes part in the search iff it has exactly `word_len` distinct
/// lowercase letters.
pub fn is_candidate(word: &str, word_len: usize) -> bool {
    encode_candidate(word, word_len).is_some()
}

/// The mask of `word` if it is a candidate of length `word_len`.
pub fn encode_candidate(word: &str, word_len: usize) -> Option<LetterMask> {
    if word.len() != word_len {
        return None;
    }
    encode(word)
}
