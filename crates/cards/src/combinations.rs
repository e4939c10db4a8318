// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Lazy k-subsets iteration.
use std::iter::FusedIterator;

/// Returns the binomial coefficient for n choose k.
pub fn nck(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }

    // Use the smaller k, the running product is always divisible.
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

/// An iterator over all the k-subsets of a slice.
///
/// Subsets are yielded in lexicographic order of their indices, one at a time,
/// so that at most one subset is alive for each `next` call. The iterator can
/// be cloned to restart from the current position.
///
/// ```
/// # use freeroll_cards::combinations;
/// let subsets = combinations(&[1, 2, 3, 4], 2).collect::<Vec<_>>();
/// assert_eq!(subsets.len(), 6);
/// assert_eq!(subsets[0], vec![1, 2]);
/// assert_eq!(subsets[5], vec![3, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    remaining: usize,
}

/// Creates an iterator over all the `k` elements subsets of `items`.
///
/// The iterator is empty if `k` is greater than the number of items.
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Combinations<'_, T> {
    Combinations {
        items,
        indices: (0..k).collect(),
        remaining: nck(items.len(), k),
    }
}

impl<T: Clone> Combinations<'_, T> {
    /// Moves the indices to the next subset, the rightmost index that can be
    /// incremented is bumped and the following indices reset after it.
    fn advance(&mut self) {
        let n = self.items.len();
        let k = self.indices.len();

        if let Some(i) = (0..k).rev().find(|&i| self.indices[i] != n - k + i) {
            self.indices[i] += 1;
            for j in (i + 1)..k {
                self.indices[j] = self.indices[j - 1] + 1;
            }
        }
    }
}

impl<T: Clone> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let subset = self
            .indices
            .iter()
            .map(|&idx| self.items[idx].clone())
            .collect();

        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }

        Some(subset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for Combinations<'_, T> {}

impl<T: Clone> FusedIterator for Combinations<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Deck;
    use ahash::HashSet;

    #[test]
    fn binomial() {
        assert_eq!(nck(52, 5), 2_598_960);
        assert_eq!(nck(7, 5), 21);
        assert_eq!(nck(4, 2), 6);
        assert_eq!(nck(5, 0), 1);
        assert_eq!(nck(3, 4), 0);
    }

    #[test]
    fn lexicographic_order() {
        let subsets = combinations(&['a', 'b', 'c', 'd'], 3).collect::<Vec<_>>();
        assert_eq!(
            subsets,
            vec![
                vec!['a', 'b', 'c'],
                vec!['a', 'b', 'd'],
                vec!['a', 'c', 'd'],
                vec!['b', 'c', 'd'],
            ]
        );
    }

    #[test]
    fn edge_sizes() {
        assert_eq!(combinations(&[1, 2, 3], 4).count(), 0);
        assert_eq!(combinations(&[1, 2, 3], 3).collect::<Vec<_>>(), vec![vec![1, 2, 3]]);

        // There is exactly one empty subset.
        let empty = combinations(&[1, 2, 3], 0).collect::<Vec<_>>();
        assert_eq!(empty, vec![Vec::<i32>::new()]);

        let none: [u8; 0] = [];
        assert_eq!(combinations(&none, 0).count(), 1);
        assert_eq!(combinations(&none, 1).count(), 0);
    }

    #[test]
    fn restartable() {
        let items = [1, 2, 3, 4, 5];
        let mut iter = combinations(&items, 2);
        assert_eq!(iter.len(), 10);

        iter.next();
        let restart = iter.clone();
        assert_eq!(iter.len(), 9);
        assert_eq!(iter.collect::<Vec<_>>(), restart.collect::<Vec<_>>());
    }

    #[test]
    fn deck_subsets() {
        let cards = Deck::default().into_iter().take(10).collect::<Vec<_>>();

        let mut hands = HashSet::default();
        for hand in combinations(&cards, 5) {
            assert_eq!(hand.len(), 5);
            hands.insert(hand);
        }

        assert_eq!(hands.len(), 252);
    }
}
