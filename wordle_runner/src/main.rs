use std::{error::Error, path::PathBuf};

use clap::{Parser, Subcommand};
use log::{error, warn};
use wordle_duel::{
    evaluate, harness::Harness, perf::Summary, strategy::MAX_GUESSES, Dictionary, DuelError,
    Solver, Trainee, Word,
};

#[derive(Parser)]
#[clap(version, about = "Train the wordle_duel solver and watch it play")]
struct Cli {
    /// Newline-delimited list of five letter words
    #[clap(short, long, default_value = "five_letter_words.txt")]
    words: PathBuf,

    /// Self-play games to train on before playing
    #[clap(short, long, default_value_t = 1000)]
    episodes: usize,

    /// Seed for training and for choosing puzzles
    #[clap(long)]
    seed: Option<u64>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play many random puzzles and summarize the results
    Bench {
        /// How many puzzles to play
        #[clap(short, long, default_value_t = 200)]
        games: usize,

        /// Play every word in the dictionary instead
        #[clap(long)]
        all: bool,

        /// Play each puzzle on a fresh copy of the trained solver
        #[clap(long)]
        isolated: bool,

        /// Print the summary as JSON
        #[clap(long)]
        json: bool,

        /// Also print every game played
        #[clap(long)]
        table: bool,
    },

    /// Play one game against a known solution
    Solve { solution: String },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        let mut message = e.to_string();
        let mut source = e.source();
        while let Some(cause) = source {
            message.push_str(&format!(": {}", cause));
            source = cause.source();
        }
        error!("{}", message);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), DuelError> {
    let dictionary = Dictionary::from_path(&cli.words)?;

    let mut trainee = Trainee::new(dictionary.clone())
        .episodes(cli.episodes)
        .verbose();
    if let Some(seed) = cli.seed {
        trainee = trainee.seed(seed);
    }
    let mut solver = trainee.train();

    match cli.command {
        Command::Bench {
            games,
            all,
            isolated,
            json,
            table,
        } => {
            let mut harness = Harness::new().verbose().test_num(games);
            if all {
                harness = harness.test_all();
            }
            if isolated {
                harness = harness.isolated();
            }
            if let Some(seed) = cli.seed {
                harness = harness.seed(seed);
            }

            let perf = harness.run(&mut solver, &dictionary)?;
            if table {
                perf.print();
            }

            let summary = perf.to_summary();
            if json {
                println!("{}", summary.to_json()?);
            } else {
                summary.print(Summary::print_options().histogram(true))?;
            }
            Ok(())
        }
        Command::Solve { solution } => solve(&mut solver, solution.parse()?),
    }
}

fn solve(solver: &mut Solver, solution: Word) -> Result<(), DuelError> {
    if !solver.dictionary().contains(&solution) {
        warn!(
            "{} is not in the dictionary, so it will never be guessed",
            solution
        );
    }

    solver.reset();
    for turn in 1..=MAX_GUESSES {
        let guess = solver.select_guess();
        let feedback = evaluate(&guess, &solution);
        println!("{} {} {}", turn, guess, feedback);
        solver.apply_feedback(feedback)?;

        if feedback.is_solved() {
            println!("Puzzle complete, the word was {}", solution);
            return Ok(());
        }

        for (word, probability) in solver.probabilities().top(10) {
            println!("    {} {:>6.2}%", word, probability * 100.);
        }
    }

    println!("Failed to solve {} in six guesses", solution);
    Ok(())
}
