use log::debug;
use rand::Rng;

use super::error::BagError;
use super::rack::Rack;
use super::tile::{Tile, ALPHABET_SIZE};

/// Number of each letter a..z in a standard set
pub const DEFAULT_TILE_COUNTS: [usize; ALPHABET_SIZE] = [
    9, 2, 2, 4, 12, 2, 3, 2, 9, 1, 1, 4, 2, 6, 8, 2, 1, 6, 4, 6, 4, 2, 2, 1, 2, 1,
];
pub const DEFAULT_BLANK_COUNT: usize = 2;

/// Tiles not yet drawn by any player
#[derive(Debug, Clone)]
pub struct TileBag {
    tiles: Vec<Tile>,
    /// Set once tiles have been drawn, after which the distribution is fixed
    locked: bool,
}

impl TileBag {
    pub fn new(counts: [usize; ALPHABET_SIZE], blanks: usize) -> Self {
        let mut tiles = Vec::with_capacity(counts.iter().sum::<usize>() + blanks);
        for (letter, &n) in ('a'..='z').zip(counts.iter()) {
            tiles.extend(std::iter::repeat(Tile::Letter(letter)).take(n));
        }
        tiles.extend(std::iter::repeat(Tile::blank()).take(blanks));
        Self {
            tiles,
            locked: false,
        }
    }

    pub fn empty() -> Self {
        Self {
            tiles: Vec::new(),
            locked: false,
        }
    }

    /// Replaces the number of copies of `tile` in the bag
    pub fn set_tile_count(&mut self, tile: Tile, count: usize) -> Result<(), BagError> {
        if self.locked {
            return Err(BagError::Locked);
        }
        self.tiles.retain(|t| !t.matches(&tile));
        let tile = if tile.is_blank() { Tile::blank() } else { tile };
        self.tiles.extend(std::iter::repeat(tile).take(count));
        Ok(())
    }

    pub fn tile_count(&self, tile: &Tile) -> usize {
        self.tiles.iter().filter(|t| t.matches(tile)).count()
    }

    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Takes a specific tile out of the bag
    pub fn remove(&mut self, tile: &Tile) -> Option<Tile> {
        let idx = self.tiles.iter().position(|t| t.matches(tile))?;
        Some(self.tiles.swap_remove(idx))
    }

    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Tile> {
        if self.tiles.is_empty() {
            return None;
        }
        self.locked = true;
        let idx = rng.gen_range(0..self.tiles.len());
        Some(self.tiles.swap_remove(idx))
    }

    /// Draws random tiles until the rack is full or the bag runs out.
    /// Returns the number of tiles drawn.
    pub fn fill_rack<R: Rng + ?Sized>(&mut self, rack: &mut Rack, rng: &mut R) -> usize {
        self.locked = true;
        let mut drawn = 0;
        while !rack.is_full() {
            match self.draw(rng) {
                Some(tile) => {
                    // The rack has room, checked above
                    if rack.add(tile).is_err() {
                        self.tiles.push(tile);
                        break;
                    }
                    drawn += 1;
                }
                None => break,
            }
        }
        debug!("Drew {} tiles, {} left in the bag", drawn, self.remaining());
        drawn
    }
}

impl Default for TileBag {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_COUNTS, DEFAULT_BLANK_COUNT)
    }
}
