use std::fmt;
use std::slice::Iter;

use serde::{Deserialize, Serialize};

use super::error::BoardError;
use super::tile::Tile;

/// Direction a word is walked in. Words read `Right` and `Down`, the search
/// also walks `Left` and `Up` once it has passed the separator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// The two reading directions
    pub fn iter() -> Iter<'static, Direction> {
        static DIRS: [Direction; 2] = [Direction::Right, Direction::Down];
        DIRS.iter()
    }

    pub fn inverse(&self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }

    /// The reading direction crossing this one
    pub fn perpendicular(&self) -> Self {
        match self {
            Self::Right | Self::Left => Self::Down,
            Self::Down | Self::Up => Self::Right,
        }
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Self::Right | Self::Down)
    }
}

/// 1-based board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position in the given direction. Only the lower
    /// edge is checked here, the board knows its own size.
    pub fn step(&self, dir: Direction) -> Option<Position> {
        match dir {
            Direction::Right => Some(Position::new(self.x + 1, self.y)),
            Direction::Down => Some(Position::new(self.x, self.y + 1)),
            Direction::Left if self.x > 1 => Some(Position::new(self.x - 1, self.y)),
            Direction::Up if self.y > 1 => Some(Position::new(self.x, self.y - 1)),
            _ => None,
        }
    }

    /// All four neighbours that don't fall off the lower edges
    pub fn adjacent(&self) -> impl Iterator<Item = Position> + '_ {
        [Direction::Right, Direction::Down, Direction::Left, Direction::Up]
            .into_iter()
            .filter_map(move |d| self.step(d))
    }
}

impl std::ops::Index<Direction> for Position {
    type Output = usize;

    fn index(&self, index: Direction) -> &Self::Output {
        match index {
            Direction::Right | Direction::Left => &self.x,
            Direction::Down | Direction::Up => &self.y,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A tile put down at a board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePlacement {
    pos: Position,
    tile: Tile,
}

/// An ordered list of placements made in one turn
pub type Move = Vec<TilePlacement>;

impl TilePlacement {
    pub fn new(x: usize, y: usize, tile: Tile) -> Result<Self, BoardError> {
        if x == 0 || y == 0 {
            return Err(BoardError::InvalidCoordinate { x, y });
        }
        Ok(Self::at(Position::new(x, y), tile))
    }

    pub(crate) fn at(pos: Position, tile: Tile) -> Self {
        Self { pos, tile }
    }

    pub fn x(&self) -> usize {
        self.pos.x
    }

    pub fn y(&self) -> usize {
        self.pos.y
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }
}

impl fmt::Display for TilePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tile, self.pos)
    }
}
