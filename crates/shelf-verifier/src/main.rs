//! CLI entry point for the shelf verifier.
//!
//! Usage:
//!   shelf-verifier check <puzzles.json> [--date YYYY-MM-DD] [options]
//!   shelf-verifier check --stdin [options]
//!   shelf-verifier generate [--date YYYY-MM-DD] [--seed <n>] [--solvable] [options]
//!
//! Options shared by both commands:
//!   --colors <list>          Comma-separated palette (default: red,blue,green,yellow,purple)
//!   --capacity <n>           Tokens a shelf can hold (default: 7)
//!   --per-color <n>          Tokens of each color (default: 6)
//!   --shelves <n>            Number of shelves (default: 6)
//!   --frontier-bound <n>     Boards enqueued before the search gives up (default: 50000)
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shelf_verifier::{
    generate, generate_solvable, solve, validate, BookError, Color, Outcome, PuzzleBook,
    PuzzleRules, RulesError, SolveResult, SolverConfig,
};

#[derive(Parser)]
#[command(name = "shelf-verifier")]
#[command(about = "Bounded solvability checker for shelf-sorting puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a puzzle from a puzzle book can be solved
    Check {
        /// Path to puzzle book JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read puzzle book from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Date of the puzzle to check (default: the latest entry)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[command(flatten)]
        rules: RulesArgs,
    },
    /// Generate a random puzzle as a one-entry puzzle book
    Generate {
        /// Date key for the entry (default: today, UTC)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Seed for reproducible generation
        #[arg(long)]
        seed: Option<u64>,

        /// Keep generating until the puzzle is proven solvable
        #[arg(long)]
        solvable: bool,

        /// Candidates to try with --solvable
        #[arg(long, default_value = "100")]
        attempts: usize,

        #[command(flatten)]
        rules: RulesArgs,
    },
}

#[derive(Args)]
struct RulesArgs {
    /// Comma-separated color palette
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "red,blue,green,yellow,purple",
        value_parser = parse_color
    )]
    colors: Vec<Color>,

    /// Maximum tokens per shelf
    #[arg(long, default_value = "7")]
    capacity: usize,

    /// Tokens of each color
    #[arg(long, default_value = "6")]
    per_color: usize,

    /// Number of shelves
    #[arg(long, default_value = "6")]
    shelves: usize,

    /// Maximum boards enqueued before the search gives up
    #[arg(long, default_value = "50000")]
    frontier_bound: usize,
}

impl RulesArgs {
    fn rules(&self) -> Result<PuzzleRules, RulesError> {
        PuzzleRules::new(
            self.colors.clone(),
            self.capacity,
            self.per_color,
            self.shelves,
        )
    }

    fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            frontier_bound: self.frontier_bound,
        }
    }
}

fn parse_color(s: &str) -> Result<Color, String> {
    Color::ALL
        .into_iter()
        .find(|c| c.name() == s.trim())
        .ok_or_else(|| format!("unknown color '{s}'"))
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read stdin: {0}")]
    Stdin(#[from] io::Error),

    #[error("must provide either a file path or --stdin")]
    NoInput,

    #[error(transparent)]
    Book(#[from] BookError),

    #[error("invalid rules: {0}")]
    Rules(#[from] RulesError),

    #[error("no solvable puzzle found in {0} attempts")]
    NoSolvablePuzzle(usize),
}

/// Output format for a solvability check
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOutput {
    date: NaiveDate,
    solvable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    states_enqueued: usize,
    states_expanded: usize,
    time_elapsed_ms: u64,
}

impl CheckOutput {
    fn from_result(date: NaiveDate, result: &SolveResult) -> Self {
        Self {
            date,
            solvable: result.outcome.is_solvable(),
            outcome: Some(result.outcome),
            error: None,
            states_enqueued: result.states_enqueued,
            states_expanded: result.states_expanded,
            time_elapsed_ms: result.time_elapsed_ms,
        }
    }

    fn rejected(date: NaiveDate, error: String) -> Self {
        Self {
            date,
            solvable: false,
            outcome: None,
            error: Some(error),
            states_enqueued: 0,
            states_expanded: 0,
            time_elapsed_ms: 0,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Commands) -> Result<ExitCode, CliError> {
    match command {
        Commands::Check {
            file,
            stdin,
            date,
            rules,
        } => {
            let book = if stdin {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                PuzzleBook::from_json_str(&buffer)?
            } else if let Some(path) = file {
                PuzzleBook::load(path)?
            } else {
                return Err(CliError::NoInput);
            };

            let (date, board) = match date {
                Some(date) => (date, book.get(date).ok_or(BookError::MissingDate(date))?),
                None => book.latest().ok_or(BookError::Empty)?,
            };

            let puzzle_rules = rules.rules()?;
            let output = match validate(&board, &puzzle_rules) {
                Ok(()) => {
                    info!(%date, "checking puzzle");
                    let result = solve(&board, &puzzle_rules, &rules.solver_config());
                    CheckOutput::from_result(date, &result)
                }
                Err(e) => CheckOutput::rejected(date, e.to_string()),
            };

            print_json(&output)?;
            Ok(if output.solvable {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Generate {
            date,
            seed,
            solvable,
            attempts,
            rules,
        } => {
            let puzzle_rules = rules.rules()?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let board = if solvable {
                generate_solvable(&mut rng, &puzzle_rules, &rules.solver_config(), attempts)
                    .map(|(board, _)| board)
                    .ok_or(CliError::NoSolvablePuzzle(attempts))?
            } else {
                generate(&mut rng, &puzzle_rules)
            };

            let mut book = PuzzleBook::new();
            book.insert(date.unwrap_or_else(|| Utc::now().date_naive()), &board);
            println!("{}", book.to_json_pretty()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_json(output: &CheckOutput) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(output).map_err(BookError::Json)?;
    println!("{json}");
    Ok(())
}
