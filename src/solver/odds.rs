use std::{cmp::Ordering, collections::BTreeSet};

use itertools::Itertools;

use super::WordScores;
use crate::Word;

/// How likely the solver thinks each unused candidate is to be the solution.
///
/// Each estimate is the word's score divided by the summed score of every
/// candidate, used ones included. Used words are left out of the listing, so
/// the estimates can add up to less than one. When every candidate scores
/// zero, every estimate is zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Probabilities {
    entries: Vec<(Word, f64)>,
}

impl Probabilities {
    pub(super) fn new(candidates: &[Word], used: &BTreeSet<Word>, scores: &WordScores) -> Self {
        let total = scores.total(candidates);
        let entries = candidates
            .iter()
            .filter(|w| !used.contains(*w))
            .map(|&w| {
                let estimate = if total == 0 {
                    0.0
                } else {
                    f64::from(scores.get(&w)) / total as f64
                };
                (w, estimate)
            })
            .collect();

        Probabilities { entries }
    }

    pub fn get(&self, word: &Word) -> Option<f64> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|&(_, p)| p)
    }

    /// Iterates in candidate order.
    pub fn iter(&self) -> impl Iterator<Item = (Word, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Returns the `n` most likely words, most likely first.
    pub fn top(&self, n: usize) -> Vec<(Word, f64)> {
        self.entries
            .iter()
            .copied()
            .sorted_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
            .take(n)
            .collect()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
