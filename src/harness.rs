//! The test harness for running a guesser over many puzzles.

use rand::{rngs::StdRng, seq::index::sample, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    perf::Perf,
    progress::Progress,
    strategy::{play, Guesser, Puzzle},
    words::{Dictionary, Word},
    Result,
};

/// A test harness that plays a guesser against many puzzles.
///
/// When you want to see how well a guesser does, create a new test harness
/// with [`new()`](Harness::new()). You can then configure it using various
/// methods. Note that these configuration methods consume the existing
/// [`Harness`] and return a new one.
///
/// # Examples
///
/// ```rust
/// # use wordle_duel::harness::Harness;
/// use wordle_duel::{Dictionary, Trainee};
///
/// let dictionary = Dictionary::parse("crane\nslate\ntrace\ncrate\nstare\n")?;
/// let mut solver = Trainee::new(dictionary.clone()).episodes(20).train();
///
/// let harness = Harness::new().quiet().test_num(3).seed(9);
/// let perf = harness.run(&mut solver, &dictionary)?;
/// assert_eq!(perf.num_tried(), 3);
/// #
/// # Ok::<_, wordle_duel::DuelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Harness {
    verbose: bool,
    num_puzzles: Option<usize>,
    isolated: bool,
    seed: Option<u64>,
}

impl Default for Harness {
    fn default() -> Self {
        Harness {
            verbose: false,
            num_puzzles: Some(100),
            isolated: false,
            seed: None,
        }
    }
}

impl Harness {
    /// Creates a new test harness with default configuration.
    ///
    /// Defaults:
    /// 1. quiet mode
    /// 2. plays 100 puzzles chosen at random
    /// 3. plays every puzzle with the same guesser, which keeps what it learns
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the harness verbose while testing.
    ///
    /// As of right now, this consists of a progress bar and nothing else.
    pub fn verbose(self) -> Self {
        Harness {
            verbose: true,
            ..self
        }
    }

    /// Makes the harness silent while testing.
    pub fn quiet(self) -> Self {
        Harness {
            verbose: false,
            ..self
        }
    }

    /// Sets the harness to play every word in the dictionary.
    pub fn test_all(self) -> Self {
        Harness {
            num_puzzles: None,
            ..self
        }
    }

    /// Sets the harness to play `n` random words from the dictionary.
    ///
    /// Asking for more words than the dictionary holds plays all of them.
    pub fn test_num(self, n: usize) -> Self {
        Harness {
            num_puzzles: Some(n),
            ..self
        }
    }

    /// Chooses the random puzzles with a generator seeded by `seed`.
    pub fn seed(self, seed: u64) -> Self {
        Harness {
            seed: Some(seed),
            ..self
        }
    }

    /// Plays each puzzle on a fresh copy of the guesser, so no game learns
    /// from another. With the `parallel` feature the games run in parallel.
    pub fn isolated(self) -> Self {
        Harness {
            isolated: true,
            ..self
        }
    }

    /// Plays every puzzle with the same guesser, one after another.
    pub fn shared(self) -> Self {
        Harness {
            isolated: false,
            ..self
        }
    }

    fn puzzles(&self, dictionary: &Dictionary) -> Vec<Word> {
        match self.num_puzzles {
            Some(n) if n < dictionary.len() => {
                let mut rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                sample(&mut rng, dictionary.len(), n)
                    .iter()
                    .map(|i| dictionary[i])
                    .collect()
            }
            _ => dictionary.to_vec(),
        }
    }

    /// Runs the harness and produces a performance record for the guesser.
    ///
    /// In shared mode, `guesser` is left holding whatever it learned.
    pub fn run<G>(&self, guesser: &mut G, dictionary: &Dictionary) -> Result<Perf>
    where
        G: Guesser + Clone + Send + Sync,
    {
        let puzzles = self.puzzles(dictionary);
        let mut perf = Perf::new(&*guesser);

        if self.isolated {
            perf.tries = self.run_isolated(guesser, &puzzles)?;
        } else {
            let progress = Progress::new(puzzles.len(), self.verbose);
            for &word in &puzzles {
                let attempts = play(guesser, &Puzzle::new(word))?;
                perf.tries.push((word, attempts));
                progress.inc();
            }
            progress.finish();
        }

        Ok(perf)
    }

    #[cfg(feature = "parallel")]
    fn run_isolated<G>(
        &self,
        guesser: &G,
        puzzles: &[Word],
    ) -> Result<Vec<(Word, crate::strategy::Attempts)>>
    where
        G: Guesser + Clone + Send + Sync,
    {
        let progress = Progress::new(puzzles.len(), self.verbose);
        let tries = puzzles
            .par_iter()
            .map(|&word| {
                let mut fresh = guesser.clone();
                let attempts = play(&mut fresh, &Puzzle::new(word));
                progress.inc();
                attempts.map(|a| (word, a))
            })
            .collect::<Result<Vec<_>>>();
        progress.finish();
        tries
    }

    #[cfg(not(feature = "parallel"))]
    fn run_isolated<G>(
        &self,
        guesser: &G,
        puzzles: &[Word],
    ) -> Result<Vec<(Word, crate::strategy::Attempts)>>
    where
        G: Guesser + Clone + Send + Sync,
    {
        let progress = Progress::new(puzzles.len(), self.verbose);
        let tries = puzzles
            .iter()
            .map(|&word| {
                let mut fresh = guesser.clone();
                let attempts = play(&mut fresh, &Puzzle::new(word));
                progress.inc();
                attempts.map(|a| (word, a))
            })
            .collect::<Result<Vec<_>>>();
        progress.finish();
        tries
    }

    /// Runs the harness (see [`run()`](Harness::run())) and prints a
    /// performance summary.
    pub fn run_and_summarize<G>(&self, guesser: &mut G, dictionary: &Dictionary) -> Result<Perf>
    where
        G: Guesser + Clone + Send + Sync,
    {
        let perf = self.run(guesser, dictionary)?;
        println!("{}", perf);
        Ok(perf)
    }
}
