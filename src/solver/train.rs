use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::Solver;
use crate::{evaluate, progress::Progress, strategy::MAX_GUESSES, Dictionary};

/// How many self-play games a [`Trainee`] plays unless told otherwise.
pub const DEFAULT_EPISODES: usize = 1000;

/// A solver that has not been trained yet.
///
/// Guess selection depends entirely on scores learned through self-play, so
/// the only way to get a [`Solver`] is to train one. Configure the training
/// with the builder methods, then call [`train()`](Trainee::train()) or
/// [`train_with()`](Trainee::train_with()).
///
/// # Examples
///
/// ```rust
/// use wordle_duel::{Dictionary, Trainee};
///
/// let dictionary = Dictionary::parse("crane\nslate\ntrace\ncrate\n")?;
/// let mut solver = Trainee::new(dictionary).episodes(50).seed(3).train();
///
/// let guess = solver.select_guess();
/// assert!(solver.dictionary().contains(&guess));
/// #
/// # Ok::<_, wordle_duel::DuelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Trainee {
    solver: Solver,
    episodes: usize,
    seed: Option<u64>,
    verbose: bool,
}

impl Trainee {
    /// Creates an untrained solver over `dictionary`.
    ///
    /// Defaults:
    /// 1. plays 1000 training games
    /// 2. picks training puzzles with the thread-local random generator
    /// 3. quiet mode
    pub fn new(dictionary: Dictionary) -> Self {
        Trainee {
            solver: Solver::untrained(dictionary),
            episodes: DEFAULT_EPISODES,
            seed: None,
            verbose: false,
        }
    }

    /// Sets how many training games to play.
    pub fn episodes(self, episodes: usize) -> Self {
        Trainee { episodes, ..self }
    }

    /// Picks training puzzles with a generator seeded by `seed`, which makes
    /// the trained scores reproducible.
    pub fn seed(self, seed: u64) -> Self {
        Trainee {
            seed: Some(seed),
            ..self
        }
    }

    /// Shows a progress bar while training.
    pub fn verbose(self) -> Self {
        Trainee {
            verbose: true,
            ..self
        }
    }

    /// Trains silently.
    pub fn quiet(self) -> Self {
        Trainee {
            verbose: false,
            ..self
        }
    }

    /// Plays every training game and hands over the trained solver.
    pub fn train(self) -> Solver {
        match self.seed {
            Some(seed) => self.train_with(&mut StdRng::seed_from_u64(seed)),
            None => self.train_with(&mut rand::thread_rng()),
        }
    }

    /// Like [`train()`](Trainee::train()), but draws puzzles from `rng`
    /// instead of any configured seed.
    pub fn train_with(self, rng: &mut impl Rng) -> Solver {
        let Trainee {
            mut solver,
            episodes,
            verbose,
            ..
        } = self;

        let progress = Progress::new(episodes, verbose);
        let mut solved = 0;
        for _ in 0..episodes {
            if solver.self_play(rng) {
                solved += 1;
            }
            progress.inc();
        }
        progress.finish();

        info!(
            "trained on {} episodes over {} words, solved {}",
            episodes,
            solver.dictionary().len(),
            solved
        );
        solver.reset();
        solver
    }
}

impl Solver {
    /// Plays one game against a random word, returning true if solved.
    fn self_play(&mut self, rng: &mut impl Rng) -> bool {
        let target = self.dictionary.random(rng);
        self.reset();

        for guesses_used in 1..=MAX_GUESSES as u32 {
            let guess = self.select_guess();
            let feedback = evaluate(&guess, &target);
            self.absorb(guess, feedback);

            if guess == target {
                // earlier solves earn more
                self.scores
                    .add(&guess, 2 * (MAX_GUESSES as u32 + 1 - guesses_used));
                return true;
            }
        }

        false
    }
}
