//! The date-keyed puzzle exchange format.
//!
//! A puzzle book maps `YYYY-MM-DD` keys to an ordered list of shelves, each
//! shelf listing color names bottom to top:
//!
//! ```json
//! { "2025-01-31": [["red", "blue"], ["blue", "red"], []] }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::BookError;
use crate::puzzle::{Board, Color, PuzzleRules};
use crate::validation::validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PuzzleBook {
    entries: BTreeMap<NaiveDate, Vec<Vec<Color>>>,
}

impl PuzzleBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(s: &str) -> Result<Self, BookError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| BookError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_pretty(&self) -> Result<String, BookError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BookError> {
        let path = path.as_ref();
        fs::write(path, self.to_json_pretty()?).map_err(|source| BookError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Store `board` under `date`, replacing any earlier entry.
    pub fn insert(&mut self, date: NaiveDate, board: &Board) {
        self.entries.insert(date, board.to_vecs());
    }

    pub fn get(&self, date: NaiveDate) -> Option<Board> {
        self.entries.get(&date).cloned().map(Board::from_vecs)
    }

    /// The entry with the most recent date.
    pub fn latest(&self) -> Option<(NaiveDate, Board)> {
        self.entries
            .iter()
            .next_back()
            .map(|(date, shelves)| (*date, Board::from_vecs(shelves.clone())))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The validated board stored for `date`.
    pub fn board_for(&self, date: NaiveDate, rules: &PuzzleRules) -> Result<Board, BookError> {
        let board = self.get(date).ok_or(BookError::MissingDate(date))?;
        validate(&board, rules).map_err(|source| BookError::Invalid { date, source })?;
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::puzzle::Color::{Blue as B, Red as R};

    const BOOK: &str = r#"{
        "2025-03-02": [["red", "blue"], ["blue", "red"], []],
        "2025-03-01": [["red", "red"], ["blue", "blue"], []]
    }"#;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_and_lookup() {
        let book = PuzzleBook::from_json_str(BOOK).unwrap();

        assert_eq!(book.len(), 2);
        assert_eq!(
            book.get(date("2025-03-01")).unwrap().to_vecs(),
            vec![vec![R, R], vec![B, B], vec![]]
        );
        assert!(book.get(date("2025-03-03")).is_none());

        let (latest, board) = book.latest().unwrap();
        assert_eq!(latest, date("2025-03-02"));
        assert_eq!(board.to_vecs()[0], vec![R, B]);
    }

    #[test]
    fn test_bad_date_key_is_rejected() {
        let result = PuzzleBook::from_json_str(r#"{"March 1st": [[]]}"#);
        assert!(matches!(result, Err(BookError::Json(_))));
    }

    #[test]
    fn test_unknown_color_name_is_rejected() {
        let result = PuzzleBook::from_json_str(r#"{"2025-03-01": [["magenta"]]}"#);
        assert!(matches!(result, Err(BookError::Json(_))));
    }

    #[test]
    fn test_export_format() {
        let mut book = PuzzleBook::new();
        book.insert(date("2025-03-01"), &Board::from_vecs(vec![vec![R, B], vec![]]));

        let json = book.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({ "2025-03-01": [["red", "blue"], []] }));
    }

    #[test]
    fn test_board_for_validates() {
        let book = PuzzleBook::from_json_str(BOOK).unwrap();
        let rules = PuzzleRules::new(vec![R, B], 2, 2, 3).unwrap();

        assert!(book.board_for(date("2025-03-02"), &rules).is_ok());
        assert!(matches!(
            book.board_for(date("2025-04-01"), &rules),
            Err(BookError::MissingDate(_))
        ));

        let strict = PuzzleRules::new(vec![R, B], 2, 2, 4).unwrap();
        assert!(matches!(
            book.board_for(date("2025-03-02"), &strict),
            Err(BookError::Invalid {
                source: ValidationError::ShelfCount { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("shelf-book-{}.json", std::process::id()));
        let book = PuzzleBook::from_json_str(BOOK).unwrap();

        book.save(&path).unwrap();
        let loaded = PuzzleBook::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, book);
    }
}
