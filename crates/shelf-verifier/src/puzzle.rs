//! Shelf-sorting puzzle representation and the legal-move primitives.
//!
//! A [`Board`] is an immutable value: [`Board::apply_move`] returns a new
//! board and leaves the receiver untouched, so boards already queued by the
//! solver can never be disturbed by later exploration.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{MoveError, RulesError};

/// Token color. Serialized by lowercase name, as in the puzzle book.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Pink,
    Cyan,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
        Color::Pink,
        Color::Cyan,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Orange => "orange",
            Color::Pink => "pink",
            Color::Cyan => "cyan",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tokens on one shelf, bottom to top. The last element is the top.
pub type Shelf = SmallVec<[Color; 8]>;

/// The contiguous same-color run on top of a shelf: the unit a move transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volume {
    pub color: Color,
    pub count: usize,
}

/// Immutable description of a puzzle variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleRules {
    colors: Vec<Color>,
    capacity: usize,
    per_color: usize,
    shelf_count: usize,
}

impl PuzzleRules {
    pub const DAILY_COLORS: [Color; 5] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
    ];
    pub const DAILY_CAPACITY: usize = 7;
    pub const DAILY_PER_COLOR: usize = 6;
    pub const DAILY_SHELF_COUNT: usize = 6;

    pub fn new(
        colors: Vec<Color>,
        capacity: usize,
        per_color: usize,
        shelf_count: usize,
    ) -> Result<Self, RulesError> {
        if colors.is_empty() {
            return Err(RulesError::NoColors);
        }
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(RulesError::DuplicateColor(*color));
            }
        }
        if per_color == 0 {
            return Err(RulesError::ZeroPerColor);
        }
        if capacity < per_color {
            return Err(RulesError::CapacityTooSmall {
                capacity,
                per_color,
            });
        }
        if shelf_count < colors.len() {
            return Err(RulesError::TooFewShelves {
                shelves: shelf_count,
                colors: colors.len(),
            });
        }
        Ok(Self {
            colors,
            capacity,
            per_color,
            shelf_count,
        })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn per_color(&self) -> usize {
        self.per_color
    }

    pub fn shelf_count(&self) -> usize {
        self.shelf_count
    }

    /// Number of tokens a valid configuration holds.
    pub fn total_tokens(&self) -> usize {
        self.colors.len() * self.per_color
    }
}

impl Default for PuzzleRules {
    fn default() -> Self {
        Self {
            colors: Self::DAILY_COLORS.to_vec(),
            capacity: Self::DAILY_CAPACITY,
            per_color: Self::DAILY_PER_COLOR,
            shelf_count: Self::DAILY_SHELF_COUNT,
        }
    }
}

/// An ordered collection of shelves. Shelf order carries no meaning for
/// winning or for search identity; see [`crate::canonical`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    shelves: Vec<Shelf>,
}

impl Board {
    pub fn new(shelves: Vec<Shelf>) -> Self {
        Self { shelves }
    }

    /// Build a board from plain vectors, as read from the puzzle book.
    pub fn from_vecs(shelves: Vec<Vec<Color>>) -> Self {
        Self {
            shelves: shelves.into_iter().map(Shelf::from_vec).collect(),
        }
    }

    pub fn to_vecs(&self) -> Vec<Vec<Color>> {
        self.shelves.iter().map(|s| s.to_vec()).collect()
    }

    pub fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    pub fn shelf(&self, index: usize) -> Option<&Shelf> {
        self.shelves.get(index)
    }

    pub fn len(&self) -> usize {
        self.shelves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shelves.is_empty()
    }

    pub fn token_count(&self) -> usize {
        self.shelves.iter().map(|s| s.len()).sum()
    }

    /// Tokens per color across all shelves.
    pub fn color_counts(&self) -> BTreeMap<Color, usize> {
        let mut counts = BTreeMap::new();
        for color in self.shelves.iter().flatten() {
            *counts.entry(*color).or_insert(0) += 1;
        }
        counts
    }

    /// The top volume of a shelf, or `None` if the shelf is empty or absent.
    pub fn volume_at(&self, index: usize) -> Option<Volume> {
        let shelf = self.shelves.get(index)?;
        let color = *shelf.last()?;
        let count = shelf.iter().rev().take_while(|&&c| c == color).count();
        Some(Volume { color, count })
    }

    /// Whether the top volume of `from` may be placed onto `to`.
    pub fn can_move(&self, from: usize, to: usize, rules: &PuzzleRules) -> bool {
        if from == to {
            return false;
        }
        let Some(volume) = self.volume_at(from) else {
            return false;
        };
        let Some(target) = self.shelves.get(to) else {
            return false;
        };
        let color_fits = target.last().map_or(true, |&top| top == volume.color);
        color_fits && target.len() + volume.count <= rules.capacity()
    }

    /// Move the top volume of `from` onto `to`, returning the new board.
    pub fn apply_move(
        &self,
        from: usize,
        to: usize,
        rules: &PuzzleRules,
    ) -> Result<Board, MoveError> {
        for index in [from, to] {
            if index >= self.shelves.len() {
                return Err(MoveError::ShelfOutOfRange {
                    index,
                    shelves: self.shelves.len(),
                });
            }
        }
        let volume = match self.volume_at(from) {
            Some(v) if self.can_move(from, to, rules) => v,
            _ => return Err(MoveError::IllegalMove { from, to }),
        };

        let mut shelves = self.shelves.clone();
        let split = shelves[from].len() - volume.count;
        let moved: Shelf = shelves[from].drain(split..).collect();
        shelves[to].extend(moved);
        Ok(Board { shelves })
    }

    /// All legal `(from, to)` moves in index order.
    pub fn legal_moves<'a>(
        &'a self,
        rules: &'a PuzzleRules,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        let n = self.shelves.len();
        (0..n)
            .filter(move |&from| !self.shelves[from].is_empty())
            .flat_map(move |from| (0..n).map(move |to| (from, to)))
            .filter(move |&(from, to)| self.can_move(from, to, rules))
    }

    /// True when every color sits alone on exactly one full shelf.
    pub fn is_win_state(&self, rules: &PuzzleRules) -> bool {
        let mut occupied = 0;
        for shelf in self.shelves.iter().filter(|s| !s.is_empty()) {
            occupied += 1;
            if shelf.len() != rules.per_color() || shelf.iter().any(|&c| c != shelf[0]) {
                return false;
            }
        }
        occupied == rules.colors().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    use crate::puzzle::Color::{Blue as B, Green as G, Red as R};

    fn rules(colors: usize, per_color: usize, capacity: usize, shelves: usize) -> PuzzleRules {
        PuzzleRules::new(Color::ALL[..colors].to_vec(), capacity, per_color, shelves).unwrap()
    }

    #[test]
    fn test_volume_at() {
        let board = Board::from_vecs(vec![vec![R, B, B], vec![G], vec![], vec![R, R]]);

        assert_eq!(board.volume_at(0), Some(Volume { color: B, count: 2 }));
        assert_eq!(board.volume_at(1), Some(Volume { color: G, count: 1 }));
        assert_eq!(board.volume_at(2), None);
        assert_eq!(board.volume_at(3), Some(Volume { color: R, count: 2 }));
        assert_eq!(board.volume_at(9), None);
    }

    #[test]
    fn test_can_move() {
        let rules = rules(3, 2, 3, 4);
        let board = Board::from_vecs(vec![vec![R, B, B], vec![B], vec![], vec![G, R]]);

        // Same shelf and empty source are never legal
        assert!(!board.can_move(0, 0, &rules));
        assert!(!board.can_move(2, 0, &rules));
        // Empty destination accepts anything that fits
        assert!(board.can_move(0, 2, &rules));
        // Matching top color is still refused when it would overflow
        assert!(!board.can_move(1, 0, &rules));
        assert!(board.can_move(0, 1, &rules));
        // Mismatched top color
        assert!(!board.can_move(3, 1, &rules));
        // Out of range destination
        assert!(!board.can_move(0, 7, &rules));
    }

    #[test]
    fn test_can_move_respects_capacity() {
        let rules = rules(2, 3, 3, 3);

        // Two blues onto one blue fill the shelf exactly
        let board = Board::from_vecs(vec![vec![R, B, B], vec![B], vec![R, R]]);
        assert!(board.can_move(0, 1, &rules));

        let board = Board::from_vecs(vec![vec![R, B, B], vec![B, R, R], vec![R]]);
        assert!(board.can_move(1, 2, &rules));
        // One red onto a full shelf overflows
        assert!(!board.can_move(2, 1, &rules));
    }

    #[test]
    fn test_apply_move_moves_whole_volume() {
        let rules = rules(3, 2, 4, 4);
        let board = Board::from_vecs(vec![vec![G, B, B], vec![B], vec![], vec![R, R, G]]);

        let next = board.apply_move(0, 1, &rules).unwrap();
        assert_eq!(next.to_vecs(), vec![vec![G], vec![B, B, B], vec![], vec![R, R, G]]);

        // The source board is untouched
        assert_eq!(board.to_vecs()[0], vec![G, B, B]);
        assert_eq!(board.color_counts(), next.color_counts());
    }

    #[test]
    fn test_apply_move_rejects_illegal() {
        let rules = rules(2, 2, 2, 2);
        let board = Board::from_vecs(vec![vec![R, B], vec![B, R]]);

        assert_eq!(
            board.apply_move(0, 1, &rules),
            Err(MoveError::IllegalMove { from: 0, to: 1 })
        );
        assert_eq!(
            board.apply_move(0, 5, &rules),
            Err(MoveError::ShelfOutOfRange {
                index: 5,
                shelves: 2
            })
        );
    }

    #[test]
    fn test_legal_moves() {
        let rules = rules(2, 2, 3, 4);
        let board = Board::from_vecs(vec![vec![R], vec![R, B], vec![B], vec![]]);

        let moves: Vec<_> = board.legal_moves(&rules).collect();
        assert_eq!(moves, vec![(0, 3), (1, 2), (1, 3), (2, 1), (2, 3)]);
        for (from, to) in moves {
            let next = board.apply_move(from, to, &rules).unwrap();
            assert!(next.shelves().iter().all(|s| s.len() <= rules.capacity()));
            assert_eq!(next.color_counts(), board.color_counts());
        }
    }

    #[test]
    fn test_is_win_state() {
        let rules = rules(2, 2, 3, 3);

        let won = Board::new(vec![smallvec![R, R], smallvec![], smallvec![B, B]]);
        assert!(won.is_win_state(&rules));

        let mixed = Board::from_vecs(vec![vec![R, B], vec![B, R], vec![]]);
        assert!(!mixed.is_win_state(&rules));

        // A color split across two shelves is not sorted
        let split = Board::from_vecs(vec![vec![R], vec![R], vec![B, B]]);
        assert!(!split.is_win_state(&rules));
    }

    #[test]
    fn test_rules_validation() {
        assert_eq!(PuzzleRules::new(vec![], 3, 2, 3), Err(RulesError::NoColors));
        assert_eq!(
            PuzzleRules::new(vec![R, R], 3, 2, 3),
            Err(RulesError::DuplicateColor(R))
        );
        assert_eq!(
            PuzzleRules::new(vec![R, B], 3, 0, 3),
            Err(RulesError::ZeroPerColor)
        );
        assert_eq!(
            PuzzleRules::new(vec![R, B], 1, 2, 3),
            Err(RulesError::CapacityTooSmall {
                capacity: 1,
                per_color: 2
            })
        );
        assert_eq!(
            PuzzleRules::new(vec![R, B, G], 3, 2, 2),
            Err(RulesError::TooFewShelves {
                shelves: 2,
                colors: 3
            })
        );

        let daily = PuzzleRules::default();
        assert_eq!(daily.total_tokens(), 30);
        assert_eq!(daily.shelf_count(), 6);
    }

    #[test]
    fn test_color_serde_names() {
        let json = serde_json::to_string(&vec![Color::Red, Color::Purple]).unwrap();
        assert_eq!(json, r#"["red","purple"]"#);

        let board: Board = serde_json::from_str(r#"[["red","blue"],[]]"#).unwrap();
        assert_eq!(board.to_vecs(), vec![vec![R, B], vec![]]);
    }
}
