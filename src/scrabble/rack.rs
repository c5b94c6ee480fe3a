use std::fmt;
use std::str::FromStr;

use rand::prelude::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{RackError, RackParseError};
use super::tile::Tile;

pub const DEFAULT_RACK_CAPACITY: usize = 7;

/// The tiles a player holds, in the order they hold them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    tiles: Vec<Tile>,
    /// Maximum number of tiles the rack holds
    capacity: usize,
}

impl Rack {
    pub fn new(capacity: usize) -> Result<Self, RackError> {
        if capacity == 0 {
            return Err(RackError::ZeroCapacity);
        }
        Ok(Self {
            tiles: Vec::with_capacity(capacity),
            capacity,
        })
    }

    /// Parses a rack such as `CAT*` with room for `capacity` tiles
    pub fn parse(text: &str, capacity: usize) -> Result<Self, RackParseError> {
        let mut rack = Rack::new(capacity)?;
        for c in text.chars().filter(|c| !c.is_whitespace()) {
            let tile = Tile::try_from(c).map_err(|_| RackParseError::InvalidCharacter(c))?;
            if rack.is_full() {
                return Err(RackParseError::TooManyTiles { capacity });
            }
            rack.add(tile)?;
        }
        Ok(rack)
    }

    /// Adds a tile at the end of the rack. Blanks lose any letter they were assigned.
    pub fn add(&mut self, tile: Tile) -> Result<(), RackError> {
        if self.is_full() {
            return Err(RackError::Full {
                capacity: self.capacity,
            });
        }
        self.tiles.push(match tile {
            Tile::Blank(_) => Tile::blank(),
            t => t,
        });
        Ok(())
    }

    pub fn add_tiles(&mut self, tiles: impl IntoIterator<Item = Tile>) -> Result<(), RackError> {
        for t in tiles {
            self.add(t)?;
        }
        Ok(())
    }

    /// Removes the first tile
    pub fn take(&mut self) -> Option<Tile> {
        if self.tiles.is_empty() {
            None
        } else {
            Some(self.tiles.remove(0))
        }
    }

    /// Removes a tile matching `tile`. Any blank matches any other blank.
    pub fn take_tile(&mut self, tile: &Tile) -> Option<Tile> {
        let idx = self.tiles.iter().position(|t| t.matches(tile))?;
        Some(self.tiles.remove(idx))
    }

    /// Removes all the given tiles, or none of them if one is missing
    pub fn take_tiles(&mut self, tiles: &[Tile]) -> Result<Vec<Tile>, RackError> {
        let mut remaining = self.tiles.clone();
        let mut taken = Vec::with_capacity(tiles.len());
        for tile in tiles {
            match remaining.iter().position(|t| t.matches(tile)) {
                Some(idx) => taken.push(remaining.remove(idx)),
                None => return Err(RackError::Missing(*tile)),
            }
        }
        self.tiles = remaining;
        Ok(taken)
    }

    pub fn take_all(&mut self) -> Vec<Tile> {
        std::mem::take(&mut self.tiles)
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    pub(crate) fn take_at(&mut self, index: usize) -> Tile {
        self.tiles.remove(index)
    }

    pub(crate) fn insert_at(&mut self, index: usize, tile: Tile) {
        self.tiles.insert(index, tile);
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
    }

    pub fn rotate_left(&mut self) {
        if !self.tiles.is_empty() {
            self.tiles.rotate_left(1);
        }
    }

    pub fn rotate_right(&mut self) {
        if !self.tiles.is_empty() {
            self.tiles.rotate_right(1);
        }
    }

    /// Sorts letters alphabetically with the blanks last
    pub fn sort(&mut self) {
        self.tiles.sort_by_key(|t| (t.is_blank(), t.letter()));
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tiles.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Letters in rack order with `*` standing for blanks
    pub fn to_simple_string(&self) -> String {
        self.tiles
            .iter()
            .map(|t| match t {
                Tile::Letter(l) => l.to_ascii_uppercase(),
                Tile::Blank(_) => '*',
            })
            .collect()
    }
}

impl Default for Rack {
    fn default() -> Self {
        Self {
            tiles: Vec::with_capacity(DEFAULT_RACK_CAPACITY),
            capacity: DEFAULT_RACK_CAPACITY,
        }
    }
}

impl FromStr for Rack {
    type Err = RackParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rack::parse(s, DEFAULT_RACK_CAPACITY)
    }
}

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_simple_string())
    }
}
