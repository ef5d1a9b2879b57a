use crate::{Feedback, Grade, Word};

/// Checks whether `word` could still be the solution after `guess` was
/// graded `feedback`.
///
/// A [`Grade::Absent`] letter rules out every word containing that letter
/// anywhere, even when another copy of it in the guess was graded
/// [`Grade::Correct`] or [`Grade::Present`]. For such guesses this throws out
/// more words than [`evaluate()`](crate::evaluate()) would, the true solution
/// included.
pub fn is_consistent(word: &Word, guess: &Word, feedback: &Feedback) -> bool {
    word.letters()
        .iter()
        .zip(guess.letters())
        .zip(feedback.iter())
        .all(|((&w, &g), grade)| match grade {
            Grade::Correct => w == g,
            Grade::Absent => !word.contains(g),
            Grade::Present => word.contains(g) && w != g,
        })
}
