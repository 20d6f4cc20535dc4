//! Error types shared by the library and the CLI.

use std::path::PathBuf;

use crate::puzzle::Color;

/// Degenerate puzzle rules rejected by [`PuzzleRules::new`](crate::puzzle::PuzzleRules::new).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("rules need at least one color")]
    NoColors,

    #[error("color {0} appears more than once in the palette")]
    DuplicateColor(Color),

    #[error("per-color count must be at least 1")]
    ZeroPerColor,

    #[error("capacity {capacity} cannot hold a full color of {per_color} tokens")]
    CapacityTooSmall { capacity: usize, per_color: usize },

    #[error("{shelves} shelves cannot hold {colors} sorted colors")]
    TooFewShelves { shelves: usize, colors: usize },
}

/// A configuration that must not reach the solver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("expected {expected} shelves, found {found}")]
    ShelfCount { expected: usize, found: usize },

    #[error("shelf {shelf} holds {len} tokens, capacity is {capacity}")]
    Capacity {
        shelf: usize,
        len: usize,
        capacity: usize,
    },

    #[error("color {color} on shelf {shelf} is not part of this puzzle")]
    UnknownColor { shelf: usize, color: Color },

    #[error("incomplete puzzle: need {expected} tokens, found {found}")]
    TotalCount { expected: usize, found: usize },

    #[error("color {color} has {found} tokens, each color needs exactly {expected}")]
    ColorCount {
        color: Color,
        expected: usize,
        found: usize,
    },
}

/// Move primitive misuse. Seeing one of these means a caller skipped `can_move`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("shelf index {index} out of range for a board of {shelves} shelves")]
    ShelfOutOfRange { index: usize, shelves: usize },

    #[error("illegal move from shelf {from} to shelf {to}")]
    IllegalMove { from: usize, to: usize },
}

/// Errors reading or writing a puzzle book.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("failed to read puzzle book {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write puzzle book {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no puzzle for {0}")]
    MissingDate(chrono::NaiveDate),

    #[error("puzzle book is empty")]
    Empty,

    #[error("invalid puzzle for {date}: {source}")]
    Invalid {
        date: chrono::NaiveDate,
        source: ValidationError,
    },
}
