pub mod scrabble;
pub mod utils;
