//! The trainable constraint-narrowing solver.
//!
//! A [`Solver`] keeps the words that still fit everything it has been told
//! this game and guesses the best scored of them. Scores come from
//! self-play: build a [`Trainee`], train it, and play with what it returns.

use std::{collections::BTreeSet, fmt::Display};

use log::{debug, trace, warn};

use crate::{
    strategy::{Feedback, Grade, Guesser},
    words::{Dictionary, LetterSet, Word},
    Result, SolverError,
};

mod filter;
pub use filter::is_consistent;

mod odds;
pub use odds::Probabilities;

mod score;
pub use score::WordScores;

mod train;
pub use train::{Trainee, DEFAULT_EPISODES};

/// Everything the solver knows about the game in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Episode {
    candidates: Vec<Word>,
    last_guess: Option<Word>,
    /// The guess still waiting for its feedback.
    pending: Option<Word>,
    used: BTreeSet<Word>,
    present: LetterSet,
}

impl Episode {
    fn new(dictionary: &Dictionary) -> Self {
        Episode {
            candidates: dictionary.to_vec(),
            ..Self::default()
        }
    }
}

/// A trained solver, ready for live games.
///
/// Call [`reset()`](Solver::reset()) before each game, then alternate
/// [`select_guess()`](Solver::select_guess()) and
/// [`apply_feedback()`](Solver::apply_feedback()). Word scores carry over
/// from game to game. Clone the solver to play independent games that
/// should not share what it learns.
#[derive(Debug, Clone)]
pub struct Solver {
    dictionary: Dictionary,
    scores: WordScores,
    episode: Episode,
}

impl Solver {
    fn untrained(dictionary: Dictionary) -> Self {
        Solver {
            scores: WordScores::new(&dictionary),
            episode: Episode::new(&dictionary),
            dictionary,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn scores(&self) -> &WordScores {
        &self.scores
    }

    /// The words that fit all the feedback seen this game, in dictionary
    /// order.
    pub fn candidates(&self) -> &[Word] {
        &self.episode.candidates
    }

    /// The words guessed this game.
    pub fn used_words(&self) -> &BTreeSet<Word> {
        &self.episode.used
    }

    /// The letters known to be in the solution.
    pub fn present_letters(&self) -> LetterSet {
        self.episode.present
    }

    pub fn last_guess(&self) -> Option<Word> {
        self.episode.last_guess
    }

    /// Starts a new game. Word scores are kept.
    pub fn reset(&mut self) {
        self.episode = Episode::new(&self.dictionary);
    }

    /// Chooses the next guess.
    ///
    /// Among the candidates containing every present letter (or all
    /// candidates, if none do), this picks the highest scored word not yet
    /// guessed, and the earliest in dictionary order on ties. If all of them
    /// have been guessed, it picks the highest scored one anyway. When no
    /// candidates remain, the unguessed dictionary words become the
    /// candidates again.
    pub fn select_guess(&mut self) -> Word {
        let episode = &mut self.episode;

        if episode.candidates.is_empty() {
            let used = &episode.used;
            episode.candidates = self
                .dictionary
                .iter()
                .filter(|w| !used.contains(*w))
                .copied()
                .collect();
            if episode.candidates.is_empty() {
                episode.candidates = self.dictionary.to_vec();
            }
            debug!(
                "no candidates left, starting over with {} words",
                episode.candidates.len()
            );
        }

        let present = episode.present;
        let eligible: Vec<&Word> = episode
            .candidates
            .iter()
            .filter(|w| w.contains_all(present))
            .collect();
        let pool = if eligible.is_empty() {
            episode.candidates.iter().collect()
        } else {
            eligible
        };

        let used = &episode.used;
        let guess = self
            .scores
            .best(pool.iter().copied().filter(|w| !used.contains(*w)))
            .or_else(|| self.scores.best(pool.iter().copied()))
            .unwrap_or(self.dictionary[0]);

        episode.last_guess = Some(guess);
        episode.pending = Some(guess);
        episode.used.insert(guess);
        trace!(
            "guessing {} out of {} candidates",
            guess,
            episode.candidates.len()
        );
        guess
    }

    /// Narrows the candidates with the grades for the last guess.
    ///
    /// Calling this without a guess awaiting feedback does nothing but log
    /// a warning. Feedback that [`evaluate()`](crate::evaluate()) could never
    /// produce for the guess is rejected, and the guess keeps waiting.
    pub fn apply_feedback(&mut self, feedback: Feedback) -> Result<()> {
        let guess = match self.episode.pending {
            Some(guess) => guess,
            None => {
                warn!("got feedback {} with no guess to apply it to", feedback);
                return Ok(());
            }
        };

        if !feedback.is_realizable_for(&guess) {
            return Err(SolverError::UnrealizableFeedback { guess, feedback }.into());
        }

        self.absorb(guess, feedback);
        Ok(())
    }

    fn absorb(&mut self, guess: Word, feedback: Feedback) {
        let episode = &mut self.episode;
        episode.pending = None;

        for (&letter, grade) in guess.letters().iter().zip(feedback.iter()) {
            if *grade == Grade::Present {
                episode.present.insert(letter);
            }
        }

        episode
            .candidates
            .retain(|w| is_consistent(w, &guess, &feedback));
        self.scores.add(&guess, feedback.num_correct());
    }

    /// Estimates how likely each unguessed candidate is to be the solution.
    pub fn probabilities(&self) -> Probabilities {
        Probabilities::new(&self.episode.candidates, &self.episode.used, &self.scores)
    }
}

impl Guesser for Solver {
    fn reset(&mut self) {
        Solver::reset(self);
    }

    fn select_guess(&mut self) -> Word {
        Solver::select_guess(self)
    }

    fn apply_feedback(&mut self, feedback: Feedback) -> Result<()> {
        Solver::apply_feedback(self, feedback)
    }
}

impl Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordle_duel::Solver ({} words)", self.dictionary.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{evaluate, play, DuelError, Puzzle};
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    const DISTINCT: &[&str] = &[
        "CRANE", "SLATE", "TRACE", "CRATE", "RAISE", "ARISE", "STARE", "ROAST", "BEAST", "MOIST",
        "ROUTE", "PLUMB", "THING", "WORDY", "JUMPY", "FIGHT", "DWARF",
    ];

    fn dictionary(words: &[&str]) -> Dictionary {
        Dictionary::from_words(words.iter().map(|w| w.parse().unwrap())).unwrap()
    }

    fn untrained(words: &[&str]) -> Solver {
        Trainee::new(dictionary(words)).episodes(0).train()
    }

    fn word(s: &str) -> Word {
        s.parse().unwrap()
    }

    #[test]
    fn zero_episodes_still_guesses() {
        let mut solver = untrained(&["AMUSE", "ABODE", "ABIDE"]);
        assert!(solver.scores().iter().all(|(_, s)| s == 0));
        assert_eq!(solver.select_guess(), word("ABIDE"));
        assert_eq!(solver.last_guess(), Some(word("ABIDE")));
        assert!(solver.used_words().contains(&word("ABIDE")));
    }

    #[test]
    fn abode_against_abide() -> Result<(), DuelError> {
        let mut solver = untrained(&["ABIDE", "ABODE", "AMUSE"]);
        solver.scores.add(&word("ABODE"), 1);

        let guess = solver.select_guess();
        assert_eq!(guess, word("ABODE"));

        let feedback = evaluate(&guess, &word("ABIDE"));
        assert_eq!(feedback, "ggbgg".parse::<Feedback>()?);
        solver.apply_feedback(feedback)?;

        assert_eq!(solver.candidates(), &[word("ABIDE")]);
        assert_eq!(solver.scores().get(&word("ABODE")), 5);
        assert_eq!(solver.select_guess(), word("ABIDE"));
        Ok(())
    }

    #[test]
    fn reset_clears_the_game_but_not_the_scores() -> Result<(), DuelError> {
        let mut solver = untrained(DISTINCT);
        play(&mut solver, &Puzzle::new(word("FIGHT")))?;
        assert!(!solver.used_words().is_empty());
        let scores = solver.scores().clone();

        solver.reset();
        assert!(solver.used_words().is_empty());
        assert!(solver.present_letters().is_empty());
        assert_eq!(solver.last_guess(), None);
        assert_eq!(solver.candidates(), &solver.dictionary()[..]);
        assert_eq!(solver.scores(), &scores);
        Ok(())
    }

    #[test]
    fn feedback_without_a_guess_is_ignored() -> Result<(), DuelError> {
        let mut solver = untrained(DISTINCT);
        solver.apply_feedback(Feedback::SOLVED)?;
        assert_eq!(solver.candidates().len(), DISTINCT.len());
        assert!(solver.scores().iter().all(|(_, s)| s == 0));

        let guess = solver.select_guess();
        solver.apply_feedback("bbbbb".parse()?)?;
        let remaining = solver.candidates().to_vec();

        // a second round of feedback for the same guess changes nothing
        solver.apply_feedback(Feedback::SOLVED)?;
        assert_eq!(solver.candidates(), remaining.as_slice());
        assert_eq!(solver.scores().get(&guess), 0);
        Ok(())
    }

    #[test]
    fn unrealizable_feedback_is_rejected() -> Result<(), DuelError> {
        let mut solver = untrained(&["ASSET", "SASSY"]);
        solver.scores.add(&word("SASSY"), 1);
        assert_eq!(solver.select_guess(), word("SASSY"));

        let result = solver.apply_feedback("bygyb".parse()?);
        assert!(matches!(
            result,
            Err(DuelError::Solver {
                kind: SolverError::UnrealizableFeedback { .. }
            })
        ));
        assert_eq!(solver.candidates().len(), 2);

        // the guess is still waiting for proper feedback
        solver.apply_feedback(evaluate(&word("SASSY"), &word("ASSET")))?;
        assert!(solver.candidates().is_empty());
        Ok(())
    }

    #[test]
    fn present_letters_steer_a_refill() -> Result<(), DuelError> {
        let mut solver = untrained(&["CRANE", "COMET", "MOIST"]);
        solver.scores.add(&word("MOIST"), 3);
        solver.scores.add(&word("CRANE"), 5);

        assert_eq!(solver.select_guess(), word("CRANE"));
        solver.apply_feedback("ybbbb".parse()?)?;
        assert!(solver.candidates().is_empty());
        assert!(solver.present_letters().contains(b'C'));

        // MOIST scores higher, but only COMET has a C
        assert_eq!(solver.select_guess(), word("COMET"));
        Ok(())
    }

    #[test]
    fn refill_without_present_letters_falls_back() -> Result<(), DuelError> {
        let mut solver = untrained(&["CRANE", "MOIST", "ROUTE"]);
        assert_eq!(solver.select_guess(), word("CRANE"));
        solver.apply_feedback("ybbbb".parse()?)?;
        assert!(solver.candidates().is_empty());

        assert_eq!(solver.select_guess(), word("MOIST"));
        Ok(())
    }

    #[test]
    fn every_word_used_repeats_the_best() -> Result<(), DuelError> {
        let mut solver = untrained(&["CRANE"]);
        assert_eq!(solver.select_guess(), word("CRANE"));
        solver.apply_feedback("bbbbb".parse()?)?;
        assert!(solver.candidates().is_empty());

        assert_eq!(solver.select_guess(), word("CRANE"));
        assert_eq!(solver.candidates(), &[word("CRANE")]);
        Ok(())
    }

    #[test]
    fn probabilities_skip_used_words() {
        let mut solver = untrained(&["ABIDE", "ABODE", "AMUSE"]);
        solver.scores.add(&word("ABIDE"), 2);
        solver.scores.add(&word("ABODE"), 1);
        solver.scores.add(&word("AMUSE"), 1);
        assert_eq!(solver.probabilities().total(), 1.0);

        assert_eq!(solver.select_guess(), word("ABIDE"));
        let odds = solver.probabilities();
        assert_eq!(odds.len(), 2);
        assert_eq!(odds.get(&word("ABIDE")), None);
        assert_eq!(odds.get(&word("ABODE")), Some(0.25));
        assert_eq!(odds.get(&word("AMUSE")), Some(0.25));
        assert_eq!(odds.total(), 0.5);
    }

    #[test]
    fn probabilities_with_no_scores_are_zero() {
        let solver = untrained(&["ABIDE", "ABODE", "AMUSE"]);
        let odds = solver.probabilities();
        assert_eq!(odds.len(), 3);
        assert!(odds.iter().all(|(_, p)| p == 0.0));
    }

    #[test]
    fn top_probabilities_are_sorted() {
        let mut solver = untrained(&["ABIDE", "ABODE", "AMUSE", "CRANE"]);
        solver.scores.add(&word("CRANE"), 3);
        solver.scores.add(&word("ABODE"), 1);
        solver.scores.add(&word("AMUSE"), 1);

        let top: Vec<Word> = solver
            .probabilities()
            .top(3)
            .into_iter()
            .map(|(w, _)| w)
            .collect();
        assert_eq!(top, [word("CRANE"), word("ABODE"), word("AMUSE")]);
    }

    #[test]
    fn seeded_training_is_reproducible() {
        let train = |seed| {
            Trainee::new(dictionary(DISTINCT))
                .episodes(200)
                .seed(seed)
                .train()
        };
        let (a, b) = (train(7), train(7));
        assert_eq!(a.scores(), b.scores());
        let c = Trainee::new(dictionary(DISTINCT))
            .verbose()
            .episodes(200)
            .seed(7)
            .quiet()
            .train();
        assert_eq!(a.scores(), c.scores());
        assert!(a.scores().iter().any(|(_, s)| s > 0));
        assert!(a.used_words().is_empty());
    }

    #[test]
    fn training_rewards_quick_solves() {
        // one word, so every game is solved on the first guess
        let solver = Trainee::new(dictionary(&["CRANE"]))
            .episodes(3)
            .train_with(&mut StdRng::seed_from_u64(0));
        assert_eq!(solver.scores().get(&word("CRANE")), 3 * (5 + 12));
    }

    proptest! {
        #[test]
        fn candidates_reproduce_the_feedback(target in 0..DISTINCT.len(), seed in any::<u64>()) {
            let mut solver = Trainee::new(dictionary(DISTINCT)).episodes(20).seed(seed).train();
            let solution = word(DISTINCT[target]);

            for _ in 0..6 {
                let guess = solver.select_guess();
                let feedback = evaluate(&guess, &solution);
                solver.apply_feedback(feedback).unwrap();

                for candidate in solver.candidates() {
                    prop_assert_eq!(evaluate(&guess, candidate), feedback);
                }
                prop_assert!(solver.candidates().contains(&solution));

                let odds = solver.probabilities();
                for (w, p) in odds.iter() {
                    prop_assert!(p >= 0.0);
                    prop_assert!(solver.candidates().contains(&w));
                    prop_assert!(!solver.used_words().contains(&w));
                }

                if guess == solution {
                    break;
                }
            }
        }
    }
}
