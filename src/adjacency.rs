use crate::dictionary::WordIndex;
use crate::encoding::LetterMask;
use rayon::prelude::*;

/// For every word, the later words it shares no letter with.
///
/// Only partners with a strictly greater index are listed. Disjointness is
/// symmetric, so this is enough to reach every tuple, and reaching each one in
/// ascending index order only is what keeps a tuple from being found once per
/// permutation.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyIndex {
    neighbors: Vec<Vec<WordIndex>>,
}

impl AdjacencyIndex {
    /// Compares every pair of masks once. Rows are independent, so they are
    /// filled in parallel.
    pub fn build(masks: &[LetterMask]) -> Self {
        let neighbors: Vec<Vec<WordIndex>> = masks
            .par_iter()
            .enumerate()
            .map(|(i, &mask)| {
                masks[i + 1..]
                    .iter()
                    .enumerate()
                    .filter(|&(_, &m)| m.is_disjoint(mask))
                    .map(|(offset, _)| i + 1 + offset)
                    .collect::<Vec<_>>()
            })
            .collect();
        AdjacencyIndex { neighbors }
    }

    /// Ascending partners of `idx`, all greater than `idx`.
    pub fn neighbors(&self, idx: WordIndex) -> &[WordIndex] {
        &self.neighbors[idx]
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Number of disjoint pairs.
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum()
    }
}
