#![doc = include_str!("../README.md")]

// Required to rename serde
#[cfg(feature = "serde")]
extern crate serde_crate as serde;

use thiserror::Error;

pub mod words;
pub use words::{Dictionary, LetterSet, Word};

pub mod strategy;
pub use strategy::{evaluate, play, Feedback, Grade, Guesser, Puzzle};

pub mod solver;
pub use solver::{Solver, Trainee};

pub mod harness;
pub use harness::Harness;

pub mod perf;
pub use perf::{Perf, Summary};

mod progress;

#[cfg(test)]
mod mock;

/// Shorthand for results produced by `wordle_duel`.
pub type Result<T, E = DuelError> = std::result::Result<T, E>;

/// The errors that `wordle_duel` can produce.
#[derive(Debug, Error)]
pub enum DuelError {
    #[error("puzzle encountered error")]
    Puzzle {
        #[from]
        kind: PuzzleError,
    },

    #[error("could not build the dictionary")]
    Dictionary {
        #[from]
        kind: DictionaryError,
    },

    #[error("the solver rejected its input")]
    Solver {
        #[from]
        kind: SolverError,
    },

    #[error("general IO error")]
    Printing(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("trouble serializing a performance summary")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PuzzleError {
    /// The string provided when constructing a [`Word`] is not five ASCII
    /// letters.
    #[error("the string \"{0}\" is not a five letter word")]
    InvalidWord(String),

    /// A character in a feedback string does not name a grade.
    #[error("the character '{0}' does not describe a grade")]
    InvalidGrade(char),

    /// Feedback must grade every letter of a guess, no more and no fewer.
    #[error("feedback must have {expected} grades, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// The puzzle has already evaluated six guesses.
    #[error("the puzzle has already evaluated six guesses")]
    OutOfGuesses,
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    /// No line of the source was a valid five letter word.
    #[error("the dictionary contains no valid words")]
    Empty,

    #[error("could not read the word list")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SolverError {
    /// The oracle can never produce this feedback for this guess, so the
    /// caller graded it by some other rule.
    #[error("feedback {feedback} cannot belong to the guess {guess}")]
    UnrealizableFeedback { guess: Word, feedback: Feedback },
}
