//! Checks a configuration must pass before it reaches the solver.

use crate::error::ValidationError;
use crate::puzzle::{Board, PuzzleRules};

/// Validate `board` against `rules`, reporting the first violation found.
///
/// Checks run in order: shelf count, shelf capacity, palette membership,
/// total token count, then the per-color count.
pub fn validate(board: &Board, rules: &PuzzleRules) -> Result<(), ValidationError> {
    if board.len() != rules.shelf_count() {
        return Err(ValidationError::ShelfCount {
            expected: rules.shelf_count(),
            found: board.len(),
        });
    }

    for (shelf, tokens) in board.shelves().iter().enumerate() {
        if tokens.len() > rules.capacity() {
            return Err(ValidationError::Capacity {
                shelf,
                len: tokens.len(),
                capacity: rules.capacity(),
            });
        }
        if let Some(&color) = tokens.iter().find(|c| !rules.colors().contains(c)) {
            return Err(ValidationError::UnknownColor { shelf, color });
        }
    }

    let total = board.token_count();
    if total != rules.total_tokens() {
        return Err(ValidationError::TotalCount {
            expected: rules.total_tokens(),
            found: total,
        });
    }

    let counts = board.color_counts();
    for &color in rules.colors() {
        let found = counts.get(&color).copied().unwrap_or(0);
        if found != rules.per_color() {
            return Err(ValidationError::ColorCount {
                color,
                expected: rules.per_color(),
                found,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Color::{self, Blue as B, Green as G, Red as R};

    fn two_color_rules() -> PuzzleRules {
        PuzzleRules::new(vec![R, B], 3, 2, 3).unwrap()
    }

    #[test]
    fn test_valid_board_passes() {
        let board = Board::from_vecs(vec![vec![R, B, R], vec![B], vec![]]);
        assert_eq!(validate(&board, &two_color_rules()), Ok(()));
    }

    #[test]
    fn test_wrong_shelf_count() {
        let board = Board::from_vecs(vec![vec![R, B, R], vec![B]]);
        assert_eq!(
            validate(&board, &two_color_rules()),
            Err(ValidationError::ShelfCount {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_over_capacity() {
        let board = Board::from_vecs(vec![vec![], vec![R, B, R, B], vec![]]);
        assert_eq!(
            validate(&board, &two_color_rules()),
            Err(ValidationError::Capacity {
                shelf: 1,
                len: 4,
                capacity: 3
            })
        );
    }

    #[test]
    fn test_unknown_color() {
        let board = Board::from_vecs(vec![vec![R, B], vec![G, R], vec![B]]);
        assert_eq!(
            validate(&board, &two_color_rules()),
            Err(ValidationError::UnknownColor {
                shelf: 1,
                color: Color::Green
            })
        );
    }

    #[test]
    fn test_incomplete_puzzle() {
        let board = Board::from_vecs(vec![vec![R, B], vec![B], vec![]]);
        assert_eq!(
            validate(&board, &two_color_rules()),
            Err(ValidationError::TotalCount {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_unbalanced_colors() {
        let board = Board::from_vecs(vec![vec![R, R, R], vec![B], vec![]]);
        assert_eq!(
            validate(&board, &two_color_rules()),
            Err(ValidationError::ColorCount {
                color: R,
                expected: 2,
                found: 3
            })
        );
    }
}
