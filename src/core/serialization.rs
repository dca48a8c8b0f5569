//! Board ingestion.
//!
//! A board file is a JSON array of rows; each cell is either a palette id
//! (`0..6`) or a case-insensitive palette name (`"red"`, `"Gray"`, ...).

use super::board::Board;
use super::color::{Color, COLOR_COUNT};
use crate::error::{FillerError, Result};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.id())
    }
}

struct ColorVisitor;

impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a color id below {} or a palette name", COLOR_COUNT)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Color, E> {
        u8::try_from(v)
            .ok()
            .and_then(Color::new)
            .ok_or_else(|| E::custom(format!("color id {} is outside 0..{}", v, COLOR_COUNT)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Color, E> {
        if v < 0 {
            return Err(E::custom(format!("negative color id {}", v)));
        }
        self.visit_u64(v as u64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Color, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ColorVisitor)
    }
}

/// Parses a board file's contents.
pub fn board_from_json(text: &str) -> Result<Board> {
    serde_json::from_str(text).map_err(|e| FillerError::InvalidBoard(e.to_string()))
}

pub fn board_to_json(board: &Board) -> String {
    // Vec<Vec<u8>> つまり常に直列化可能
    serde_json::to_string(board).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cell;

    #[test]
    fn test_ids_and_names_mix() {
        let board = board_from_json(r#"[[0, "green"], ["YELLOW", 5]]"#).unwrap();
        assert_eq!(board.color_at(Cell::new(0, 0)), Color::RED);
        assert_eq!(board.color_at(Cell::new(0, 1)), Color::GREEN);
        assert_eq!(board.color_at(Cell::new(1, 0)), Color::YELLOW);
        assert_eq!(board.color_at(Cell::new(1, 1)), Color::GRAY);
        assert_eq!(board_to_json(&board), "[[0,1],[2,5]]");
    }

    #[test]
    fn test_bad_files_are_invalid_boards() {
        for text in [r#"[[0, 9]]"#, r#"[[0, "teal"]]"#, r#"[[0, 1], [2]]"#, "[]", "{"] {
            assert!(
                matches!(board_from_json(text), Err(FillerError::InvalidBoard(_))),
                "{} should be rejected",
                text
            );
        }
    }
}
