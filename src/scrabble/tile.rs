use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::TileError;

pub const ALPHABET_SIZE: usize = 26;

/// Index of a letter in the alphabet (a = 0), case-insensitive
pub fn letter_index(letter: char) -> Option<usize> {
    if letter.is_ascii_alphabetic() {
        Some((letter.to_ascii_lowercase() as u8 - b'a') as usize)
    } else {
        None
    }
}

/// Points awarded for each letter a..z
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterValues([u32; ALPHABET_SIZE]);

impl LetterValues {
    pub const STANDARD: LetterValues = LetterValues([
        1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, 1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10,
    ]);

    pub const WORDS_WITH_FRIENDS: LetterValues = LetterValues([
        1, 4, 4, 2, 1, 4, 3, 3, 1, 10, 5, 2, 4, 2, 1, 4, 10, 1, 1, 1, 2, 5, 4, 8, 3, 10,
    ]);

    pub fn new(values: [u32; ALPHABET_SIZE]) -> Self {
        Self(values)
    }

    /// Value of a letter. Anything outside a..z is worth nothing
    pub fn value(&self, letter: char) -> u32 {
        letter_index(letter).map_or(0, |i| self.0[i])
    }
}

impl Default for LetterValues {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A playing piece. Lettered tiles carry a lowercase letter, blanks carry the
/// letter they were assigned once played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tile {
    Letter(char),
    Blank(Option<char>),
}

impl Tile {
    pub fn from_letter(letter: char) -> Result<Self, TileError> {
        if letter.is_ascii_alphabetic() {
            Ok(Tile::Letter(letter.to_ascii_lowercase()))
        } else {
            Err(TileError::InvalidCharacter(letter))
        }
    }

    pub fn blank() -> Self {
        Tile::Blank(None)
    }

    /// Returns a copy of this blank with the given letter assigned
    pub fn assign(&self, letter: char) -> Result<Self, TileError> {
        match self {
            Tile::Blank(_) if letter.is_ascii_alphabetic() => {
                Ok(Tile::Blank(Some(letter.to_ascii_lowercase())))
            }
            Tile::Blank(_) => Err(TileError::InvalidCharacter(letter)),
            Tile::Letter(_) => Err(TileError::NotABlank),
        }
    }

    /// The letter this tile spells, `None` for a blank that hasn't been assigned yet
    pub fn letter(&self) -> Option<char> {
        match *self {
            Tile::Letter(l) => Some(l),
            Tile::Blank(l) => l,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Tile::Blank(_))
    }

    /// Blanks are always worth zero
    pub fn points(&self, values: &LetterValues) -> u32 {
        match *self {
            Tile::Letter(l) => values.value(l),
            Tile::Blank(_) => 0,
        }
    }

    /// Two tiles match when they are the same letter, or both blanks
    pub fn matches(&self, other: &Tile) -> bool {
        match (self, other) {
            (Tile::Blank(_), Tile::Blank(_)) => true,
            (a, b) => a == b,
        }
    }

    /// Uppercase for lettered tiles, lowercase for assigned blanks and `*` otherwise
    pub fn to_char(&self) -> char {
        match *self {
            Tile::Letter(l) => l.to_ascii_uppercase(),
            Tile::Blank(Some(l)) => l,
            Tile::Blank(None) => '*',
        }
    }
}

impl TryFrom<char> for Tile {
    type Error = TileError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '*' | '?' => Ok(Tile::blank()),
            c => Tile::from_letter(c),
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
