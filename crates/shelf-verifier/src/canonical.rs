//! Shelf-order-invariant identity for boards.
//!
//! Shelves are interchangeable, so two boards that hold the same shelf
//! contents in a different physical order are the same search state. The key
//! is the board's shelves sorted lexicographically (bottom to top, by color
//! order). It is structural rather than a delimited string, so no token can
//! ever be confused with a separator.

use crate::puzzle::{Board, Shelf};

/// Totally ordered, hashable fingerprint of a board up to shelf permutation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalKey(Box<[Shelf]>);

impl CanonicalKey {
    pub fn shelves(&self) -> &[Shelf] {
        &self.0
    }
}

/// Compute the canonical key of a board.
pub fn canonical_key(board: &Board) -> CanonicalKey {
    let mut shelves = board.shelves().to_vec();
    shelves.sort_unstable();
    CanonicalKey(shelves.into_boxed_slice())
}
