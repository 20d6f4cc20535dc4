//! Random candidate boards for puzzle authoring.
//!
//! The full token multiset is shuffled and dealt `per_color` tokens at a time
//! onto the first `colors.len()` shelves; the remaining shelves start empty.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::puzzle::{Board, PuzzleRules, Shelf};
use crate::solver::{solve, Outcome, SolveResult, SolverConfig};

/// Deal a uniformly shuffled board for `rules`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, rules: &PuzzleRules) -> Board {
    let mut tokens: Vec<_> = rules
        .colors()
        .iter()
        .flat_map(|&color| std::iter::repeat(color).take(rules.per_color()))
        .collect();
    tokens.shuffle(rng);

    let mut shelves: Vec<Shelf> = tokens
        .chunks(rules.per_color())
        .map(Shelf::from_slice)
        .collect();
    shelves.resize_with(rules.shelf_count(), Shelf::new);
    Board::new(shelves)
}

/// Generate boards until one is proven solvable and not already sorted.
///
/// Returns `None` after `max_attempts` candidates without success. Candidates
/// cut off by the frontier bound are rejected like unsolvable ones.
pub fn generate_solvable<R: Rng + ?Sized>(
    rng: &mut R,
    rules: &PuzzleRules,
    config: &SolverConfig,
    max_attempts: usize,
) -> Option<(Board, SolveResult)> {
    for attempt in 1..=max_attempts {
        let board = generate(rng, rules);
        if board.is_win_state(rules) {
            trace!(attempt, "candidate already sorted, skipping");
            continue;
        }

        let result = solve(&board, rules, config);
        trace!(attempt, outcome = ?result.outcome, "candidate checked");
        if result.outcome == Outcome::Solvable {
            debug!(attempt, states = result.states_enqueued, "found solvable puzzle");
            return Some((board, result));
        }
    }

    debug!(max_attempts, "no solvable puzzle generated");
    None
}
