pub mod bag;
pub mod board;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod gaddag;
mod letter_set;
pub mod multiplier;
pub mod parser;
pub mod rack;
pub mod tile;
pub mod util;
pub mod word_search;

pub use self::board::Board;
pub use self::gaddag::{Trie, TrieBuilder};
pub use self::rack::Rack;
pub use self::tile::Tile;
pub use self::util::{Direction, Move, Position, TilePlacement};
pub use self::word_search::{GaddagAlgorithm, ScrabbleAlgorithm};
