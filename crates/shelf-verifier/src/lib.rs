//! Solvability checker for shelf-sorting puzzles.
//!
//! Colored tokens sit on fixed-capacity shelves; a move carries the run of
//! same-colored tokens on top of one shelf onto an empty shelf or one whose
//! top matches. This crate decides, by exhaustive breadth-first search with
//! shelf-order-invariant deduplication, whether a configuration can reach the
//! sorted state. The play surface and the puzzle authoring tool both use it.

pub mod book;
pub mod canonical;
pub mod error;
pub mod generator;
pub mod puzzle;
pub mod solver;
pub mod validation;

// Re-export main types
pub use book::PuzzleBook;
pub use error::{BookError, MoveError, RulesError, ValidationError};
pub use generator::{generate, generate_solvable};
pub use puzzle::{Board, Color, PuzzleRules, Shelf, Volume};
pub use solver::{is_solvable, solve, verify, Outcome, SolveResult, SolverConfig};
pub use validation::validate;
