use std::collections::HashMap;

use crate::{Dictionary, Word};

/// The solver's learned bias toward each dictionary word.
///
/// Every word starts at zero. Scores only ever grow, through partial credit
/// for correct letters and through the bonus for solving a training puzzle.
/// They outlive any single game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordScores {
    scores: HashMap<Word, u32>,
}

impl WordScores {
    pub(crate) fn new(dictionary: &Dictionary) -> Self {
        WordScores {
            scores: dictionary.iter().map(|&w| (w, 0)).collect(),
        }
    }

    pub fn get(&self, word: &Word) -> u32 {
        self.scores.get(word).copied().unwrap_or(0)
    }

    pub(crate) fn add(&mut self, word: &Word, amount: u32) {
        let score = self.scores.entry(*word).or_insert(0);
        *score = score.saturating_add(amount);
    }

    /// Sums the scores of `words`.
    pub fn total<'a>(&self, words: impl IntoIterator<Item = &'a Word>) -> u64 {
        words.into_iter().map(|w| u64::from(self.get(w))).sum()
    }

    /// Finds the highest scored word, preferring the earliest on ties.
    pub fn best<'a>(&self, words: impl IntoIterator<Item = &'a Word>) -> Option<Word> {
        words
            .into_iter()
            .fold(None, |best: Option<(Word, u32)>, w| {
                let score = self.get(w);
                match best {
                    Some((_, top)) if top >= score => best,
                    _ => Some((*w, score)),
                }
            })
            .map(|(w, _)| w)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Word, u32)> + '_ {
        self.scores.iter().map(|(w, &s)| (w, s))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::DuelError;

    #[test]
    fn best_prefers_the_first_of_equals() -> Result<(), DuelError> {
        let dictionary = Dictionary::parse("abide\nabode\namuse\n")?;
        let mut scores = WordScores::new(&dictionary);
        assert_eq!(scores.len(), 3);
        assert_eq!(scores.best(dictionary.iter()), Some(dictionary[0]));

        scores.add(&dictionary[1], 2);
        scores.add(&dictionary[2], 2);
        assert_eq!(scores.best(dictionary.iter()), Some(dictionary[1]));
        assert_eq!(scores.best(dictionary[2..].iter()), Some(dictionary[2]));
        assert_eq!(scores.best(std::iter::empty()), None);
        assert_eq!(scores.total(dictionary.iter()), 4);
        Ok(())
    }
}
