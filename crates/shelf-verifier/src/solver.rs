//! Breadth-first reachability search over the move graph.
//!
//! Every reachable board is enqueued at most once: successors are
//! deduplicated through their [`CanonicalKey`], so boards that differ only by
//! shelf order are explored a single time. The search stops on the first win,
//! when the frontier empties, or when the number of boards ever enqueued
//! passes the frontier bound.

use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use crate::canonical::{canonical_key, CanonicalKey};
use crate::error::ValidationError;
use crate::puzzle::{Board, PuzzleRules};
use crate::validation::validate;

/// Default cap on boards ever enqueued during one search.
pub const DEFAULT_FRONTIER_BOUND: usize = 50_000;

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum number of boards enqueued before the search gives up
    pub frontier_bound: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            frontier_bound: DEFAULT_FRONTIER_BOUND,
        }
    }
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A win state is reachable.
    Solvable,
    /// Every reachable board was visited and none is a win.
    Unsolvable,
    /// The frontier bound was hit first; the true answer is unknown.
    BoundExceeded,
}

impl Outcome {
    pub fn is_solvable(self) -> bool {
        self == Outcome::Solvable
    }

    /// Whether the answer is proven rather than cut off by the bound.
    pub fn is_exhaustive(self) -> bool {
        self != Outcome::BoundExceeded
    }
}

/// Result of the solver search
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub outcome: Outcome,
    /// Boards ever enqueued, the initial board included
    pub states_enqueued: usize,
    /// Boards whose successors were generated
    pub states_expanded: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

/// Decide whether `initial` can reach a win state.
///
/// The board must already satisfy [`validate`]; use [`verify`] to do both.
pub fn solve(initial: &Board, rules: &PuzzleRules, config: &SolverConfig) -> SolveResult {
    let start_time = Instant::now();
    debug!(
        shelves = initial.len(),
        tokens = initial.token_count(),
        frontier_bound = config.frontier_bound,
        "starting solvability search"
    );

    let mut visited: HashSet<CanonicalKey> = HashSet::new();
    visited.insert(canonical_key(initial));

    let mut frontier: VecDeque<Board> = VecDeque::new();
    frontier.push_back(initial.clone());

    let mut states_enqueued: usize = 1;
    let mut states_expanded: usize = 0;

    let finish = |outcome: Outcome, states_enqueued: usize, states_expanded: usize| {
        let result = SolveResult {
            outcome,
            states_enqueued,
            states_expanded,
            time_elapsed_ms: start_time.elapsed().as_millis() as u64,
        };
        debug!(
            ?outcome,
            states_enqueued,
            states_expanded,
            time_elapsed_ms = result.time_elapsed_ms,
            "search finished"
        );
        result
    };

    while let Some(board) = frontier.pop_front() {
        if board.is_win_state(rules) {
            return finish(Outcome::Solvable, states_enqueued, states_expanded);
        }

        states_expanded += 1;
        for (from, to) in board.legal_moves(rules) {
            let next = match board.apply_move(from, to, rules) {
                Ok(next) => next,
                Err(err) => unreachable!("legal move rejected: {err}"),
            };
            if visited.insert(canonical_key(&next)) {
                frontier.push_back(next);
                states_enqueued += 1;
            }
        }

        if states_enqueued > config.frontier_bound {
            warn!(
                states_enqueued,
                frontier_bound = config.frontier_bound,
                "search limit reached, reporting unsolvable"
            );
            return finish(Outcome::BoundExceeded, states_enqueued, states_expanded);
        }
    }

    finish(Outcome::Unsolvable, states_enqueued, states_expanded)
}

/// Boolean entry point: `true` only when a win is proven reachable.
///
/// A search cut off by the frontier bound reports `false`.
pub fn is_solvable(initial: &Board, rules: &PuzzleRules, config: &SolverConfig) -> bool {
    solve(initial, rules, config).outcome.is_solvable()
}

/// Validate `board` against `rules`, then solve it.
pub fn verify(
    board: &Board,
    rules: &PuzzleRules,
    config: &SolverConfig,
) -> Result<SolveResult, ValidationError> {
    validate(board, rules)?;
    Ok(solve(board, rules, config))
}
