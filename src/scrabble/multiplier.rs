use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::util::Position;

/// Bonus printed on a board square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Multiplier {
    #[serde(rename = "DL")]
    DoubleLetter,
    #[serde(rename = "TL")]
    TripleLetter,
    #[serde(rename = "DW")]
    DoubleWord,
    #[serde(rename = "TW")]
    TripleWord,
}

impl Multiplier {
    pub fn letter_factor(&self) -> u32 {
        match self {
            Self::DoubleLetter => 2,
            Self::TripleLetter => 3,
            _ => 1,
        }
    }

    pub fn word_factor(&self) -> u32 {
        match self {
            Self::DoubleWord => 2,
            Self::TripleWord => 3,
            _ => 1,
        }
    }
}

const STANDARD_DL: [(usize, usize); 24] = [
    (4, 1), (12, 1), (7, 3), (9, 3), (1, 4), (8, 4), (15, 4), (3, 7), (7, 7), (9, 7), (13, 7), (4, 8),
    (12, 8), (3, 9), (7, 9), (9, 9), (13, 9), (1, 12), (8, 12), (15, 12), (7, 13), (9, 13), (4, 15),
    (12, 15),
];
const STANDARD_TL: [(usize, usize); 12] = [
    (6, 2), (10, 2), (2, 6), (6, 6), (10, 6), (14, 6), (2, 10), (6, 10), (10, 10), (14, 10), (6, 14),
    (10, 14),
];
const STANDARD_DW: [(usize, usize); 17] = [
    (8, 8), (2, 2), (3, 3), (4, 4), (5, 5), (11, 5), (12, 4), (13, 3), (14, 2), (2, 14), (3, 13),
    (4, 12), (5, 11), (11, 11), (12, 12), (13, 13), (14, 14),
];
const STANDARD_TW: [(usize, usize); 8] = [
    (1, 1), (8, 1), (15, 1), (1, 8), (15, 8), (1, 15), (8, 15), (15, 15),
];

const WWF_DL: [(usize, usize); 24] = [
    (3, 2), (13, 2), (2, 3), (5, 3), (11, 3), (14, 3), (3, 5), (7, 5), (9, 5), (13, 5), (5, 7),
    (11, 7), (5, 9), (11, 9), (3, 11), (7, 11), (9, 11), (13, 11), (2, 13), (5, 13), (11, 13),
    (14, 13), (3, 14), (13, 14),
];
const WWF_TL: [(usize, usize); 16] = [
    (7, 1), (9, 1), (4, 4), (12, 4), (6, 6), (10, 6), (1, 7), (15, 7), (1, 9), (15, 9), (6, 10),
    (10, 10), (4, 12), (12, 12), (7, 15), (9, 15),
];
const WWF_DW: [(usize, usize); 12] = [
    (6, 2), (10, 2), (8, 4), (2, 6), (14, 6), (4, 8), (12, 8), (2, 10), (14, 10), (8, 12), (6, 14),
    (10, 14),
];
const WWF_TW: [(usize, usize); 8] = [
    (4, 1), (12, 1), (1, 4), (15, 4), (1, 12), (15, 12), (4, 15), (12, 15),
];

/// Sparse map of the bonus squares on a board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multipliers {
    cells: HashMap<Position, Multiplier>,
}

impl Multipliers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classic 15x15 layout
    pub fn standard() -> Self {
        Self::from_groups(&[
            (&STANDARD_DL[..], Multiplier::DoubleLetter),
            (&STANDARD_TL[..], Multiplier::TripleLetter),
            (&STANDARD_DW[..], Multiplier::DoubleWord),
            (&STANDARD_TW[..], Multiplier::TripleWord),
        ])
    }

    /// 15x15 layout used by Words With Friends
    pub fn words_with_friends() -> Self {
        Self::from_groups(&[
            (&WWF_DL[..], Multiplier::DoubleLetter),
            (&WWF_TL[..], Multiplier::TripleLetter),
            (&WWF_DW[..], Multiplier::DoubleWord),
            (&WWF_TW[..], Multiplier::TripleWord),
        ])
    }

    fn from_groups(groups: &[(&[(usize, usize)], Multiplier)]) -> Self {
        let mut layout = Self::new();
        for (cells, m) in groups {
            for &(x, y) in cells.iter() {
                layout.insert(Position::new(x, y), *m);
            }
        }
        layout
    }

    pub fn insert(&mut self, pos: Position, multiplier: Multiplier) {
        self.cells.insert(pos, multiplier);
    }

    pub fn get(&self, pos: Position) -> Option<Multiplier> {
        self.cells.get(&pos).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when swapping x and y maps every bonus square onto the same kind
    pub fn is_transpose_symmetric(&self) -> bool {
        self.cells
            .iter()
            .all(|(p, m)| self.get(Position::new(p.y, p.x)) == Some(*m))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, Multiplier)> + '_ {
        self.cells.iter().map(|(p, m)| (*p, *m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let layout = Multipliers::standard();
        assert_eq!(layout.len(), 61);
        assert_eq!(layout.get(Position::new(8, 8)), Some(Multiplier::DoubleWord));
        assert_eq!(layout.get(Position::new(1, 1)), Some(Multiplier::TripleWord));
        assert_eq!(layout.get(Position::new(6, 2)), Some(Multiplier::TripleLetter));
        assert_eq!(layout.get(Position::new(4, 1)), Some(Multiplier::DoubleLetter));
        assert_eq!(layout.get(Position::new(2, 1)), None);
    }

    #[test]
    fn test_words_with_friends_layout() {
        let layout = Multipliers::words_with_friends();
        assert_eq!(layout.len(), 60);
        assert_eq!(layout.get(Position::new(8, 8)), None);
        assert_eq!(layout.get(Position::new(4, 1)), Some(Multiplier::TripleWord));
    }

    #[test]
    fn test_transpose_symmetry() {
        assert!(Multipliers::standard().is_transpose_symmetric());
        assert!(Multipliers::words_with_friends().is_transpose_symmetric());
        assert!(Multipliers::new().is_transpose_symmetric());

        let mut layout = Multipliers::new();
        layout.insert(Position::new(1, 2), Multiplier::DoubleWord);
        assert!(!layout.is_transpose_symmetric());
        layout.insert(Position::new(2, 1), Multiplier::DoubleWord);
        assert!(layout.is_transpose_symmetric());
    }

    #[test]
    fn test_factors() {
        assert_eq!(Multiplier::TripleLetter.letter_factor(), 3);
        assert_eq!(Multiplier::TripleLetter.word_factor(), 1);
        assert_eq!(Multiplier::DoubleWord.word_factor(), 2);
    }
}
