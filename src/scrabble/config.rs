use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::board::{Board, STANDARD_BOARD_SIZE};
use super::error::{ConfigError, RackParseError};
use super::multiplier::{Multiplier, Multipliers};
use super::parser;
use super::rack::{Rack, DEFAULT_RACK_CAPACITY};
use super::tile::{LetterValues, ALPHABET_SIZE};
use super::util::Position;

pub const DEFAULT_BINGO_TILE_COUNT: usize = 7;
pub const DEFAULT_BINGO_SCORE: u32 = 50;

/// Fixed scoring rules a board is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub letter_values: LetterValues,
    /// Tiles that have to be placed in one move to earn the bonus
    pub bingo_tile_count: usize,
    pub bingo_score: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            letter_values: LetterValues::STANDARD,
            bingo_tile_count: DEFAULT_BINGO_TILE_COUNT,
            bingo_score: DEFAULT_BINGO_SCORE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPreset {
    Standard,
    WordsWithFriends,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplierCell {
    pub x: usize,
    pub y: usize,
    pub kind: Multiplier,
}

/// Bonus squares, either a named layout or a list of squares
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutConfig {
    Preset(LayoutPreset),
    Custom(Vec<MultiplierCell>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterValuesPreset {
    Standard,
    WordsWithFriends,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LetterValuesConfig {
    Preset(LetterValuesPreset),
    /// Values for a..z in order
    Custom(Vec<u32>),
}

/// Game rules read from a JSON file. Missing fields take the classic values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub layout: LayoutConfig,
    pub letter_values: LetterValuesConfig,
    pub bingo_tile_count: usize,
    pub bingo_score: u32,
    pub rack_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: STANDARD_BOARD_SIZE,
            height: STANDARD_BOARD_SIZE,
            layout: LayoutConfig::Preset(LayoutPreset::Standard),
            letter_values: LetterValuesConfig::Preset(LetterValuesPreset::Standard),
            bingo_tile_count: DEFAULT_BINGO_TILE_COUNT,
            bingo_score: DEFAULT_BINGO_SCORE,
            rack_capacity: DEFAULT_RACK_CAPACITY,
        }
    }
}

impl GameConfig {
    pub fn words_with_friends() -> Self {
        Self {
            layout: LayoutConfig::Preset(LayoutPreset::WordsWithFriends),
            letter_values: LetterValuesConfig::Preset(LetterValuesPreset::WordsWithFriends),
            bingo_score: 35,
            ..Self::default()
        }
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path.as_ref())?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;
        Self::from_json(&data)
    }

    pub fn multipliers(&self) -> Multipliers {
        match &self.layout {
            LayoutConfig::Preset(LayoutPreset::Standard) => Multipliers::standard(),
            LayoutConfig::Preset(LayoutPreset::WordsWithFriends) => Multipliers::words_with_friends(),
            LayoutConfig::Preset(LayoutPreset::None) => Multipliers::new(),
            LayoutConfig::Custom(cells) => {
                let mut layout = Multipliers::new();
                for cell in cells {
                    layout.insert(Position::new(cell.x, cell.y), cell.kind);
                }
                layout
            }
        }
    }

    pub fn letter_values(&self) -> Result<LetterValues, ConfigError> {
        match &self.letter_values {
            LetterValuesConfig::Preset(LetterValuesPreset::Standard) => Ok(LetterValues::STANDARD),
            LetterValuesConfig::Preset(LetterValuesPreset::WordsWithFriends) => {
                Ok(LetterValues::WORDS_WITH_FRIENDS)
            }
            LetterValuesConfig::Custom(values) => {
                let values: [u32; ALPHABET_SIZE] = values
                    .as_slice()
                    .try_into()
                    .map_err(|_| ConfigError::LetterValueCount(values.len()))?;
                Ok(LetterValues::new(values))
            }
        }
    }

    pub fn scoring(&self) -> Result<ScoringConfig, ConfigError> {
        if self.bingo_tile_count == 0 {
            return Err(ConfigError::BingoTileCount(0));
        }
        Ok(ScoringConfig {
            letter_values: self.letter_values()?,
            bingo_tile_count: self.bingo_tile_count,
            bingo_score: self.bingo_score,
        })
    }

    pub fn new_board(&self) -> Result<Board, ConfigError> {
        Ok(Board::new(
            self.width,
            self.height,
            self.multipliers(),
            self.scoring()?,
        )?)
    }

    /// Builds a board and fills it with the tiles drawn in `text`
    pub fn board_from_text(&self, text: &str) -> Result<Board, ConfigError> {
        let mut board = self.new_board()?;
        for placement in parser::parse_tiles(text)? {
            board.put(placement)?;
        }
        Ok(board)
    }

    pub fn new_rack(&self) -> Result<Rack, ConfigError> {
        Ok(Rack::new(self.rack_capacity)?)
    }

    pub fn parse_rack(&self, text: &str) -> Result<Rack, RackParseError> {
        Rack::parse(text, self.rack_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrabble::error::BoardError;
    use crate::scrabble::tile::Tile;

    #[test]
    fn test_defaults() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
        let board = config.new_board().unwrap();
        assert_eq!(board.width(), 15);
        assert_eq!(board.multipliers(), &Multipliers::standard());
        assert_eq!(board.scoring(), &ScoringConfig::default());
    }

    #[test]
    fn test_presets_and_custom_layout() {
        let json = r#"{
            "width": 5,
            "height": 4,
            "layout": [{"x": 1, "y": 1, "kind": "TW"}],
            "letter_values": "words_with_friends",
            "bingo_score": 35
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        let board = config.new_board().unwrap();
        assert_eq!((board.width(), board.height()), (5, 4));
        assert_eq!(
            board.multipliers().get(Position::new(1, 1)),
            Some(Multiplier::TripleWord)
        );
        assert_eq!(board.scoring().letter_values, LetterValues::WORDS_WITH_FRIENDS);
        assert_eq!(board.scoring().bingo_score, 35);
        assert_eq!(board.scoring().bingo_tile_count, 7);

        let wwf = GameConfig::words_with_friends();
        assert_eq!(wwf.multipliers(), Multipliers::words_with_friends());
    }

    #[test]
    fn test_bad_values() {
        let config = GameConfig::from_json(r#"{"letter_values": [1, 2, 3]}"#).unwrap();
        assert!(matches!(
            config.scoring(),
            Err(ConfigError::LetterValueCount(3))
        ));
        let config = GameConfig::from_json(r#"{"width": 1}"#).unwrap();
        assert!(matches!(
            config.new_board(),
            Err(ConfigError::Board(BoardError::TooSmall { width: 1, height: 15 }))
        ));
        let config = GameConfig::from_json(r#"{"bingo_tile_count": 0}"#).unwrap();
        assert!(matches!(
            config.scoring(),
            Err(ConfigError::BingoTileCount(0))
        ));
        assert!(matches!(
            config.new_board(),
            Err(ConfigError::BingoTileCount(0))
        ));
        assert!(GameConfig::from_json("{").is_err());
    }

    #[test]
    fn test_board_from_text() {
        let config = GameConfig {
            width: 3,
            height: 3,
            layout: LayoutConfig::Preset(LayoutPreset::None),
            ..GameConfig::default()
        };
        let board = config.board_from_text("A B\n\n  c").unwrap();
        assert_eq!(board.get(1, 1), Some(Tile::Letter('a')));
        assert_eq!(board.get(2, 1), Some(Tile::Letter('b')));
        assert_eq!(board.get(2, 3), Some(Tile::Blank(Some('c'))));
        assert_eq!(board.tile_count(), 3);
        assert!(matches!(
            config.board_from_text("A B C D"),
            Err(ConfigError::Board(BoardError::OutOfBounds { x: 4, y: 1 }))
        ));
    }
}
