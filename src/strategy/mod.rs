//! Feedback, puzzles, and the trait that every player implements.

use std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
};

use itertools::Itertools;
use log::trace;

use crate::{
    words::{Word, WORD_LEN},
    DuelError, PuzzleError, Result,
};

/// The most guesses a single game allows.
pub const MAX_GUESSES: usize = 6;

/// A Wordle "grade" that indicates the correctness of a letter in a guess.
///
/// `Correct` means that the letter is in the correct position. `Present`
/// means that the solution contains the letter, but not in that position.
/// `Absent` means that the solution has no unclaimed copy of that letter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum Grade {
    /// The letter guessed is in the correct position.
    Correct,

    /// The letter guessed is in the solution, but not there.
    Present,

    /// The letter guessed is not in the solution.
    Absent,
}

impl Grade {
    fn symbol(self) -> char {
        match self {
            Grade::Correct => '🟩',
            Grade::Present => '🟨',
            Grade::Absent => '⬛',
        }
    }
}

impl TryFrom<char> for Grade {
    type Error = DuelError;

    /// Parses `g`, `y` or `b` (green, yellow, black), or `2`, `1` or `0`.
    fn try_from(c: char) -> Result<Self> {
        match c.to_ascii_lowercase() {
            'g' | '2' => Ok(Grade::Correct),
            'y' | '1' => Ok(Grade::Present),
            'b' | '0' => Ok(Grade::Absent),
            other => Err(PuzzleError::InvalidGrade(other).into()),
        }
    }
}

/// The grades for every letter of one guess against one solution.
///
/// # Examples
///
/// ```rust
/// use wordle_duel::{evaluate, Feedback, Word};
///
/// let guess: Word = "props".parse()?;
/// let feedback = evaluate(&guess, &"crimp".parse()?);
/// assert_eq!(feedback, "ygbbb".parse::<Feedback>()?);
/// assert_eq!(feedback.num_correct(), 1);
/// assert!(!feedback.is_solved());
/// #
/// # Ok::<_, wordle_duel::DuelError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback([Grade; WORD_LEN]);

impl Feedback {
    /// The feedback for a guess that is the solution.
    pub const SOLVED: Feedback = Feedback([Grade::Correct; WORD_LEN]);

    pub fn new(grades: [Grade; WORD_LEN]) -> Self {
        Feedback(grades)
    }

    pub fn grades(&self) -> &[Grade; WORD_LEN] {
        &self.0
    }

    /// Counts the letters graded [`Grade::Correct`].
    pub fn num_correct(&self) -> u32 {
        self.0.iter().filter(|&&g| g == Grade::Correct).count() as u32
    }

    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    /// Checks whether [`evaluate()`] could ever grade `guess` this way.
    ///
    /// The oracle hands out [`Grade::Present`] to repeated letters from left
    /// to right, so a letter can never be [`Grade::Absent`] at one position
    /// and then [`Grade::Present`] further right.
    pub fn is_realizable_for(&self, guess: &Word) -> bool {
        let mut exhausted = [false; 26];
        for (&letter, &grade) in guess.letters().iter().zip(self.0.iter()) {
            let i = (letter - b'A') as usize;
            match grade {
                Grade::Correct => {}
                Grade::Present if exhausted[i] => return false,
                Grade::Present => {}
                Grade::Absent => exhausted[i] = true,
            }
        }
        true
    }
}

impl Deref for Feedback {
    type Target = [Grade; WORD_LEN];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<&[Grade]> for Feedback {
    type Error = DuelError;

    fn try_from(grades: &[Grade]) -> Result<Self> {
        <[Grade; WORD_LEN]>::try_from(grades)
            .map(Feedback)
            .map_err(|_| {
                PuzzleError::LengthMismatch {
                    expected: WORD_LEN,
                    found: grades.len(),
                }
                .into()
            })
    }
}

impl FromStr for Feedback {
    type Err = DuelError;

    fn from_str(s: &str) -> Result<Self> {
        let grades = s
            .chars()
            .map(Grade::try_from)
            .collect::<Result<Vec<_>>>()?;
        Feedback::try_from(grades.as_slice())
    }
}

impl Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().map(|g| g.symbol()).join(""))
    }
}

impl Debug for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Feedback({})", self)
    }
}

/// Grades `guess` against `solution`.
///
/// In the case that a guess contains two or more of the same letter,
/// the following is true:
///
/// 1. Every copy in the correct position is [`Grade::Correct`].
/// 2. No more copies are graded [`Grade::Correct`] or [`Grade::Present`]
///    together than the solution has. The remaining copies are handed
///    [`Grade::Present`] from left to right, and the rest are
///    [`Grade::Absent`].
///
/// # Examples
///
/// ```rust
/// use wordle_duel::{evaluate, strategy::Grade::*, Word};
///
/// let feedback = evaluate(&"spool".parse()?, &"sober".parse()?);
/// assert_eq!(*feedback, [Correct, Absent, Present, Absent, Absent]);
/// #
/// # Ok::<_, wordle_duel::DuelError>(())
/// ```
pub fn evaluate(guess: &Word, solution: &Word) -> Feedback {
    let guess = guess.letters();
    let solution = solution.letters();
    let mut grades = [Grade::Absent; WORD_LEN];
    let mut unclaimed = [0_u8; 26];

    // correct letters first, since those get priority
    for i in 0..WORD_LEN {
        if guess[i] == solution[i] {
            grades[i] = Grade::Correct;
        } else {
            unclaimed[(solution[i] - b'A') as usize] += 1;
        }
    }

    for i in 0..WORD_LEN {
        let remaining = &mut unclaimed[(guess[i] - b'A') as usize];
        if grades[i] != Grade::Correct && *remaining > 0 {
            *remaining -= 1;
            grades[i] = Grade::Present;
        }
    }

    Feedback(grades)
}

/// A specific Wordle puzzle to solve.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Puzzle {
    solution: Word,
}

impl Puzzle {
    pub fn new(solution: Word) -> Self {
        Puzzle { solution }
    }

    pub fn solution(&self) -> Word {
        self.solution
    }

    /// Grades a guess and records it in `attempts`.
    ///
    /// Returns an error instead if `attempts` already holds six guesses.
    pub fn check(&self, guess: &Word, attempts: &mut Attempts) -> Result<Feedback> {
        attempts.push(*guess)?;
        Ok(evaluate(guess, &self.solution))
    }
}

/// A collection of attempts to solve a Wordle puzzle.
///
/// This wraps a [`Vec`] that [`Puzzle::check()`] fills, so no game can
/// record more than six guesses.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Attempts {
    inner: Vec<Word>,
}

impl Attempts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attempt, failing if six have already been made.
    pub(crate) fn push(&mut self, word: Word) -> Result<usize> {
        if self.inner.len() < MAX_GUESSES {
            self.inner.push(word);
            Ok(self.inner.len() - 1)
        } else {
            Err(PuzzleError::OutOfGuesses.into())
        }
    }

    /// Returns a slice into the underlying data.
    pub fn inner(&self) -> &[Word] {
        self.inner.as_slice()
    }

    /// Returns true once six guesses have been made.
    pub fn finished(&self) -> bool {
        self.inner.len() >= MAX_GUESSES
    }

    /// Returns true if the last word in this attempt list matches `word`.
    pub fn solved(&self, word: &Word) -> bool {
        matches!(self.inner().last(), Some(s) if s == word)
    }
}

impl Display for Attempts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some((last, rest)) = self.inner.split_last() {
            for word in rest {
                writeln!(f, "{}", word)?;
            }
            write!(f, "{}", last)?;
        }
        Ok(())
    }
}

/// Something that plays Wordle one guess at a time.
///
/// The game loop in [`play()`] drives a guesser: it calls
/// [`reset()`](Guesser::reset()) once, then alternates
/// [`select_guess()`](Guesser::select_guess()) and
/// [`apply_feedback()`](Guesser::apply_feedback()) until the puzzle is solved
/// or six guesses are spent. The [`Display`] implementation names the guesser
/// in reports, so do not use linebreaks.
pub trait Guesser: Display + Debug {
    /// Forgets everything learned about the current puzzle.
    fn reset(&mut self);

    /// Chooses the next word to guess.
    fn select_guess(&mut self) -> Word;

    /// Takes in the grades for the word last returned by
    /// [`select_guess()`](Guesser::select_guess()).
    fn apply_feedback(&mut self, feedback: Feedback) -> Result<()>;
}

/// Plays one full game of `puzzle` with `guesser`.
pub fn play<G: Guesser + ?Sized>(guesser: &mut G, puzzle: &Puzzle) -> Result<Attempts> {
    let mut attempts = Attempts::new();
    guesser.reset();

    while !attempts.finished() {
        let guess = guesser.select_guess();
        let feedback = puzzle.check(&guess, &mut attempts)?;
        trace!("{} guessed {} and got {}", guesser, guess, feedback);
        guesser.apply_feedback(feedback)?;
        if feedback.is_solved() {
            break;
        }
    }

    Ok(attempts)
}
