use std::fmt::Display;

use crate::{Feedback, Guesser, Result, Word};

/// A guesser that walks through a fixed list of words.
#[derive(Debug, Clone)]
pub(crate) struct Mock {
    guesses: Vec<&'static str>,
    next: usize,
    feedback_seen: usize,
}

impl Mock {
    pub(crate) fn new(guesses: Vec<&'static str>) -> Self {
        Self {
            guesses,
            next: 0,
            feedback_seen: 0,
        }
    }

    pub(crate) fn feedback_seen(&self) -> usize {
        self.feedback_seen
    }
}

impl Default for Mock {
    fn default() -> Self {
        Self::new(vec!["nerds", "tithe", "doubt", "point", "parka", "sword"])
    }
}

impl Guesser for Mock {
    fn reset(&mut self) {
        self.next = 0;
    }

    fn select_guess(&mut self) -> Word {
        let guess = self.guesses[self.next % self.guesses.len()];
        self.next += 1;
        guess.parse().unwrap()
    }

    fn apply_feedback(&mut self, _feedback: Feedback) -> Result<()> {
        self.feedback_seen += 1;
        Ok(())
    }
}

impl Display for Mock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mock {:?}", self.guesses)
    }
}
