//! Evaluating how well a guesser plays.

use std::{fmt::Display, io::Write, ops::Deref};

#[cfg(feature = "fancy")]
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
#[cfg(feature = "fancy")]
use owo_colors::{AnsiColors, OwoColorize, Stream};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    strategy::{Attempts, Guesser, MAX_GUESSES},
    words::Word,
    Result,
};

/// A record of one guesser's games after run by the
/// [test harness](crate::Harness).
///
/// This struct can provide statistics about the games on its own, but it
/// is recommended to produce a [`Summary`] first to cache the computations.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Perf {
    pub(crate) tries: Vec<(Word, Attempts)>,
    guesser_name: String,
}

impl Perf {
    /// Creates a new empty performance record.
    pub(crate) fn new(guesser: &dyn Guesser) -> Self {
        Perf {
            tries: Vec::new(),
            guesser_name: guesser.to_string(),
        }
    }

    /// Gets the name of the guesser that produced this performance record.
    pub fn guesser_name(&self) -> &str {
        &self.guesser_name
    }

    /// Gets every puzzle played, with the guesses made on it.
    pub fn tries(&self) -> &[(Word, Attempts)] {
        &self.tries
    }

    /// Gets the number of puzzles attempted.
    pub fn num_tried(&self) -> u32 {
        self.tries.len() as u32
    }

    /// Gets the number of puzzles solved.
    ///
    /// This function always returns a number less than or equal to
    /// [`num_tried()`](Self::num_tried()).
    pub fn num_solved(&self) -> u32 {
        self.tries
            .iter()
            .filter(|(word, attempts)| attempts.solved(word))
            .count() as u32
    }

    /// Gets the fraction of puzzles solved.
    pub fn frac_solved(&self) -> f32 {
        ratio(self.num_solved(), self.num_tried())
    }

    /// Gets the number of guesses across all puzzle attempts.
    pub fn cumulative_guesses(&self) -> u32 {
        self.tries.iter().map(|(_, a)| a.inner().len() as u32).sum()
    }

    /// Gets the number of guesses across all solved puzzles.
    pub fn cumulative_guesses_solved(&self) -> u32 {
        self.tries
            .iter()
            .filter(|(word, attempts)| attempts.solved(word))
            .map(|(_, a)| a.inner().len() as u32)
            .sum()
    }

    /// Gets the average number of guesses needed to solve a puzzle.
    ///
    /// This function does not include guesses made on puzzles that were
    /// never solved.
    pub fn guesses_per_solution(&self) -> f32 {
        ratio(self.cumulative_guesses_solved(), self.num_solved())
    }

    /// Gets the number of puzzles left unsolved.
    pub fn num_missed(&self) -> u32 {
        self.num_tried() - self.num_solved()
    }

    /// Gets the fraction of puzzles left unsolved.
    pub fn frac_missed(&self) -> f32 {
        ratio(self.num_missed(), self.num_tried())
    }

    /// Prints the summary and then a table of the guesses for each puzzle.
    #[cfg(feature = "fancy")]
    pub fn print(&self) {
        print!("{}", self);
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Puzzle", "Guesses", "Result"]);
        for (word, attempts) in &self.tries {
            let guesses = attempts.inner().iter().map(Word::to_string).collect::<Vec<_>>();
            let result = if attempts.solved(word) {
                Cell::new(format!("solved in {}", guesses.len())).fg(Color::Green)
            } else {
                Cell::new("missed").fg(Color::Red)
            };
            table.add_row(vec![
                Cell::new(word.to_string()),
                Cell::new(guesses.join(" ")),
                result,
            ]);
        }
        println!("{}", table);
    }

    /// Converts this performance record to a pre-calculated summary.
    pub fn to_summary(&self) -> Summary {
        let mut bins = [0_u32; MAX_GUESSES];

        self.tries
            .iter()
            .filter(|(word, attempts)| attempts.solved(word))
            .map(|(_, attempts)| attempts.inner().len())
            .for_each(|n| bins[n - 1] += 1);

        Summary {
            guesser_name: self.guesser_name.clone(),
            num_tried: self.num_tried(),
            num_solved: self.num_solved(),
            cumulative_guesses: self.cumulative_guesses(),
            histogram: bins.into(),
        }
    }
}

impl Display for Perf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_summary())
    }
}

/// A summary of a guesser's performance generated by the
/// [test harness](crate::Harness).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Summary {
    guesser_name: String,
    num_tried: u32,
    num_solved: u32,
    cumulative_guesses: u32,
    histogram: Histogram,
}

impl Summary {
    /// Gets the name of the guesser that produced this performance record.
    pub fn guesser_name(&self) -> &str {
        &self.guesser_name
    }

    /// Gets the number of puzzles attempted.
    pub fn num_tried(&self) -> u32 {
        self.num_tried
    }

    /// Gets the number of puzzles solved.
    pub fn num_solved(&self) -> u32 {
        self.num_solved
    }

    /// Gets the fraction of puzzles solved.
    pub fn frac_solved(&self) -> f32 {
        ratio(self.num_solved, self.num_tried)
    }

    /// Gets the number of guesses across all puzzle attempts.
    pub fn cumulative_guesses(&self) -> u32 {
        self.cumulative_guesses
    }

    /// Gets the number of guesses across all solved puzzles.
    pub fn cumulative_guesses_solved(&self) -> u32 {
        self.histogram
            .iter()
            .enumerate()
            .map(|(i, v)| (i as u32 + 1) * v)
            .sum::<u32>()
    }

    /// Gets the average number of guesses needed to solve a puzzle.
    pub fn mean_guesses(&self) -> f32 {
        ratio(self.cumulative_guesses_solved(), self.num_solved)
    }

    /// Gets the number of puzzles left unsolved.
    pub fn num_missed(&self) -> u32 {
        self.num_tried - self.num_solved
    }

    /// Gets the fraction of puzzles left unsolved.
    pub fn frac_missed(&self) -> f32 {
        ratio(self.num_missed(), self.num_tried)
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Serializes the summary as JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn print(&self, options: SummaryPrintOptions) -> Result<()> {
        let mut stdout = std::io::stdout();

        writeln!(stdout, "{:-^80}", self.guesser_name)?;
        writeln!(stdout, "Ran {} words", self.num_tried())?;

        #[cfg(feature = "fancy")]
        writeln!(
            stdout,
            "Guessed {} correctly, or {:.1}%, and {} incorrectly",
            self.num_solved(),
            self.frac_solved() * 100.,
            self.num_missed()
                .if_supports_color(Stream::Stdout, |text| text.color(AnsiColors::Red)),
        )?;
        #[cfg(not(feature = "fancy"))]
        writeln!(
            stdout,
            "Guessed {} correctly, or {:.1}%, and {} incorrectly",
            self.num_solved(),
            self.frac_solved() * 100.,
            self.num_missed()
        )?;

        writeln!(
            stdout,
            "Correct guesses took {:.2} attempts on average",
            self.mean_guesses(),
        )?;

        if options.histogram {
            write!(stdout, "{}", self.histogram)?;
        }

        Ok(())
    }

    pub fn print_options() -> SummaryPrintOptions {
        SummaryPrintOptions::default()
    }
}

#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SummaryPrintOptions {
    histogram: bool,
}

impl SummaryPrintOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn histogram(self, histogram: bool) -> Self {
        Self { histogram }
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:-^80}", self.guesser_name)?;
        writeln!(f, "Ran {} words", self.num_tried())?;

        writeln!(
            f,
            "Guessed {} correctly, or {:.1}%, and {} incorrectly",
            self.num_solved(),
            self.frac_solved() * 100.,
            self.num_missed()
        )?;

        writeln!(
            f,
            "Correct guesses took {:.2} attempts on average",
            self.mean_guesses(),
        )?;

        Ok(())
    }
}

/// How many puzzles were solved in each number of guesses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Histogram {
    bins: [u32; MAX_GUESSES],
}

impl From<[u32; MAX_GUESSES]> for Histogram {
    fn from(other: [u32; MAX_GUESSES]) -> Self {
        Self { bins: other }
    }
}

impl Deref for Histogram {
    type Target = [u32; MAX_GUESSES];

    fn deref(&self) -> &Self::Target {
        &self.bins
    }
}

impl Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let max = self.iter().copied().max().unwrap_or(0);
        let digits =
            std::iter::successors(Some(max), |&n| (n >= 10).then(|| n / 10)).count() as u32;
        let count_per_mark = (max as f32 / (80. - digits as f32 - 6.)).max(1.0);

        for (i, &bin) in self.bins.iter().enumerate() {
            write!(f, "{} |", i + 1)?;
            let marks = (bin as f32 / count_per_mark).floor() as usize;
            writeln!(f, "{:■>marks$} ({})", "", bin)?;
        }

        Ok(())
    }
}

/// Divides `num` by `den`, with an empty denominator giving zero.
fn ratio(num: u32, den: u32) -> f32 {
    if den == 0 {
        0.
    } else {
        num as f32 / den as f32
    }
}
