use thiserror::Error;

use super::tile::Tile;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TileError {
    #[error("{0:?} is not a letter or a blank")]
    InvalidCharacter(char),
    #[error("only blank tiles can be assigned a letter")]
    NotABlank,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrieError {
    #[error("illegal word {0:?}, only the letters a-z are allowed")]
    IllegalWord(String),
    #[error("ran out of memory building the trie, roughly {estimated_bytes} bytes are required")]
    OutOfMemory { estimated_bytes: u64 },
}

/// Reasons a list of tile placements cannot be put on the board
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no tiles were placed")]
    Empty,
    #[error("({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },
    #[error("({x}, {y}) already holds a tile")]
    Occupied { x: usize, y: usize },
    #[error("({x}, {y}) is used by more than one tile")]
    Duplicate { x: usize, y: usize },
    #[error("the blank at ({x}, {y}) has no letter assigned")]
    UnassignedBlank { x: usize, y: usize },
    #[error("the first tile must cover the start square, ({x}, {y}) does not")]
    NotOnStart { x: usize, y: usize },
    #[error("({x}, {y}) does not touch any tile on the board")]
    NotConnected { x: usize, y: usize },
    #[error("tiles must be placed in a single row or column")]
    NotInLine,
    #[error("the placed word has a gap at ({x}, {y})")]
    Gap { x: usize, y: usize },
    #[error("the first word must cover the start square")]
    StartNotCovered,
    #[error("the placed word does not touch any tile on the board")]
    Disconnected,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("a board must be at least 2x2, got {width}x{height}")]
    TooSmall { width: usize, height: usize },
    #[error("coordinates are 1-based, got ({x}, {y})")]
    InvalidCoordinate { x: usize, y: usize },
    #[error("({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },
    #[error("({x}, {y}) already holds a tile")]
    Occupied { x: usize, y: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RackError {
    #[error("a rack must hold at least one tile")]
    ZeroCapacity,
    #[error("the rack is full ({capacity} tiles)")]
    Full { capacity: usize },
    #[error("the rack does not hold {0}")]
    Missing(Tile),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RackParseError {
    #[error("{0:?} is not a letter or a blank ('*')")]
    InvalidCharacter(char),
    #[error("a rack holds at most {capacity} tiles")]
    TooManyTiles { capacity: usize },
    #[error(transparent)]
    Rack(#[from] RackError),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct BoardParseError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BagError {
    #[error("the tile counts cannot change once racks have been filled")]
    Locked,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("the rack is empty")]
    EmptyRack,
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("could not read the word list: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not build the word set: {0}")]
    Fst(#[from] fst::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read the config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected 26 letter values, got {0}")]
    LetterValueCount(usize),
    #[error("bingo needs at least one tile, got {0}")]
    BingoTileCount(usize),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Rack(#[from] RackError),
    #[error(transparent)]
    Parse(#[from] BoardParseError),
}
