//! Depth-first enumeration of letter-disjoint word tuples.
//!
//! A branch starts from a single word and grows a [`PartialClique`] one word
//! at a time. Candidates come from the [`AdjacencyIndex`] row of the word
//! chosen last, which guarantees disjointness with that word and ascending
//! indices; the accumulated letter mask rules out overlap with the words
//! chosen before it.

use crate::adjacency::AdjacencyIndex;
use crate::dictionary::{Dictionary, WordIndex};
use crate::encoding::{LetterMask, ALPHABET_SIZE};
use std::convert::Infallible;

/// A complete tuple of `N` pairwise disjoint words, indices ascending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Solution<const N: usize> {
    indices: [WordIndex; N],
    letters: LetterMask,
}

impl<const N: usize> Solution<N> {
    pub fn indices(&self) -> &[WordIndex; N] {
        &self.indices
    }

    /// Union of the letters of all words.
    pub fn letters(&self) -> LetterMask {
        self.letters
    }

    pub fn texts<'d>(&self, dictionary: &'d Dictionary) -> Vec<&'d str> {
        self.indices.iter().map(|&i| dictionary.text(i)).collect()
    }
}

/// The words chosen so far on one branch. Fixed capacity, reused in place:
/// every [`push`](Self::push) is undone by a [`pop`](Self::pop) before the
/// next sibling is tried.
#[derive(Clone, Debug)]
pub struct PartialClique<const N: usize> {
    indices: [WordIndex; N],
    len: usize,
    seen: LetterMask,
}

impl<const N: usize> PartialClique<N> {
    pub fn new(start: WordIndex, mask: LetterMask) -> Self {
        let mut indices = [0; N];
        indices[0] = start;
        PartialClique {
            indices,
            len: 1,
            seen: mask,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_complete(&self) -> bool {
        self.len == N
    }

    pub fn last(&self) -> WordIndex {
        self.indices[self.len - 1]
    }

    pub fn seen(&self) -> LetterMask {
        self.seen
    }

    pub fn as_slice(&self) -> &[WordIndex] {
        &self.indices[..self.len]
    }

    /// Appends `idx` and returns the letter mask to hand back to `pop`.
    pub fn push(&mut self, idx: WordIndex, mask: LetterMask) -> LetterMask {
        let prev = self.seen;
        self.indices[self.len] = idx;
        self.len += 1;
        self.seen = prev.union(mask);
        prev
    }

    pub fn pop(&mut self, prev: LetterMask) {
        self.len -= 1;
        self.seen = prev;
    }

    fn to_solution(&self) -> Solution<N> {
        debug_assert!(self.is_complete());
        Solution {
            indices: self.indices,
            letters: self.seen,
        }
    }
}

/// Searches for tuples of `N` words. Holds only shared, read-only tables, so
/// one instance can serve any number of concurrent branches.
#[derive(Clone, Copy, Debug)]
pub struct CliqueSearch<'a, const N: usize> {
    masks: &'a [LetterMask],
    adjacency: &'a AdjacencyIndex,
}

impl<'a, const N: usize> CliqueSearch<'a, N> {
    /// # Panics
    ///
    /// If `N` is zero or larger than the alphabet, or if the tables were not
    /// built from the same words.
    pub fn new(masks: &'a [LetterMask], adjacency: &'a AdjacencyIndex) -> Self {
        assert!((1..=ALPHABET_SIZE).contains(&N), "tuple size {} out of range", N);
        assert_eq!(masks.len(), adjacency.len());
        CliqueSearch { masks, adjacency }
    }

    /// Runs the branch rooted at `start`, passing every tuple to `emit`.
    ///
    /// Tuples come out in depth-first order with candidates taken by ascending
    /// index. The first error returned by `emit` ends the branch.
    pub fn search<E, F>(&self, start: WordIndex, mut emit: F) -> Result<(), E>
    where
        F: FnMut(&Solution<N>) -> Result<(), E>,
    {
        let mut clique = PartialClique::new(start, self.masks[start]);
        self.extend(&mut clique, &mut emit)
    }

    /// Number of tuples on the branch rooted at `start`.
    pub fn count(&self, start: WordIndex) -> usize {
        let mut found = 0;
        let counted: Result<(), Infallible> = self.search(start, |_| {
            found += 1;
            Ok(())
        });
        match counted {
            Ok(()) => found,
            Err(never) => match never {},
        }
    }

    fn extend<E, F>(&self, clique: &mut PartialClique<N>, emit: &mut F) -> Result<(), E>
    where
        F: FnMut(&Solution<N>) -> Result<(), E>,
    {
        if clique.is_complete() {
            return emit(&clique.to_solution());
        }
        for &next in self.adjacency.neighbors(clique.last()) {
            let mask = self.masks[next];
            // The row only vouches for the last word.
            if !clique.seen().is_disjoint(mask) {
                continue;
            }
            let prev = clique.push(next, mask);
            let extended = self.extend(clique, emit);
            clique.pop(prev);
            extended?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode;

    fn tables(words: &[&str]) -> (Vec<LetterMask>, AdjacencyIndex) {
        let masks: Vec<_> = words.iter().map(|w| encode(w).unwrap()).collect();
        let adjacency = AdjacencyIndex::build(&masks);
        (masks, adjacency)
    }

    fn collect<const N: usize>(search: &CliqueSearch<N>, start: WordIndex) -> Vec<[WordIndex; N]> {
        let mut found = Vec::new();
        let done: Result<(), Infallible> = search.search(start, |s| {
            found.push(*s.indices());
            Ok(())
        });
        assert!(done.is_ok());
        found
    }

    #[test]
    fn partial_clique_push_pop_restores_state() {
        let a = encode("ab").unwrap();
        let c = encode("cd").unwrap();
        let mut clique = PartialClique::<3>::new(4, a);
        assert_eq!(clique.as_slice(), &[4]);
        let prev = clique.push(7, c);
        assert_eq!(clique.as_slice(), &[4, 7]);
        assert_eq!(clique.last(), 7);
        assert_eq!(clique.seen(), a.union(c));
        clique.pop(prev);
        assert_eq!(clique.as_slice(), &[4]);
        assert_eq!(clique.seen(), a);
        assert!(!clique.is_complete());
    }

    #[test]
    fn pairs_from_each_start() {
        let (masks, adj) = tables(&["ab", "cd", "ef", "ac"]);
        let search = CliqueSearch::<2>::new(&masks, &adj);
        assert_eq!(collect(&search, 0), [[0, 1], [0, 2]]);
        assert_eq!(collect(&search, 1), [[1, 2]]);
        assert_eq!(collect(&search, 2), [[2, 3]]);
        assert!(collect(&search, 3).is_empty());
    }

    #[test]
    fn checks_every_chosen_word_not_just_the_last() {
        // "ab" -> "cd" -> "ae" is allowed by the row of "cd" but overlaps "ab".
        let (masks, adj) = tables(&["ab", "cd", "ae", "ef"]);
        let search = CliqueSearch::<3>::new(&masks, &adj);
        assert_eq!(collect(&search, 0), [[0, 1, 3]]);
        assert!(collect(&search, 1).is_empty());
    }

    #[test]
    fn solution_letters_cover_all_words() {
        let (masks, adj) = tables(&["abc", "def", "ghi", "adg"]);
        let search = CliqueSearch::<3>::new(&masks, &adj);
        let mut letters = Vec::new();
        let _: Result<(), Infallible> = search.search(0, |s| {
            letters.push(s.letters());
            Ok(())
        });
        assert_eq!(letters.len(), 1);
        assert_eq!(letters[0].len(), 9);
    }

    #[test]
    fn single_word_tuples() {
        let (masks, adj) = tables(&["ab", "ac"]);
        let search = CliqueSearch::<1>::new(&masks, &adj);
        assert_eq!(collect(&search, 1), [[1]]);
    }

    #[test]
    fn count_matches_emitted() {
        let (masks, adj) = tables(&["ab", "cd", "ef", "gh", "ac", "bd", "eg"]);
        let search = CliqueSearch::<3>::new(&masks, &adj);
        for start in 0..masks.len() {
            assert_eq!(search.count(start), collect(&search, start).len());
        }
    }

    #[test]
    fn emit_error_stops_the_branch() {
        let (masks, adj) = tables(&["ab", "cd", "ef", "gh"]);
        let search = CliqueSearch::<2>::new(&masks, &adj);
        let mut calls = 0;
        let result = search.search(0, |_| {
            calls += 1;
            Err("disk full")
        });
        assert_eq!(result, Err("disk full"));
        assert_eq!(calls, 1);
    }

    #[test]
    #[should_panic]
    fn zero_sized_tuples_are_rejected() {
        let (masks, adj) = tables(&["ab"]);
        CliqueSearch::<0>::new(&masks, &adj);
    }
}
