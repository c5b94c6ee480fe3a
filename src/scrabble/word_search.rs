use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, warn};
use rand::prelude::SliceRandom;
use rand::Rng;
use rayon::prelude::*;

use super::board::Board;
use super::error::SearchError;
use super::gaddag::{Node, Trie};
use super::letter_set::LetterSet;
use super::rack::Rack;
use super::tile::Tile;
use super::util::{Direction, Move, Position, TilePlacement};

/// Strategy for choosing tile placements
pub trait ScrabbleAlgorithm {
    /// Every legal move for the rack, each reported once, in reading order
    fn all_placements(&self, board: &Board, rack: &Rack) -> Result<Vec<Move>, SearchError>;

    /// Any legal move, chosen uniformly
    fn random_placement<R: Rng + ?Sized>(
        &self,
        board: &Board,
        rack: &Rack,
        rng: &mut R,
    ) -> Result<Option<Move>, SearchError> {
        let moves = self.all_placements(board, rack)?;
        Ok(moves.choose(rng).cloned())
    }

    /// The move using the most tiles. The first one found wins ties.
    fn longest_placement(&self, board: &Board, rack: &Rack) -> Result<Option<Move>, SearchError> {
        let mut moves = self.all_placements(board, rack)?;
        moves.sort_by(|a, b| b.len().cmp(&a.len()));
        Ok(moves.into_iter().next())
    }

    /// The best scoring move, ties broken by a coin flip. `None` when nothing scores.
    fn highest_score_placement<R: Rng + ?Sized>(
        &self,
        board: &Board,
        rack: &Rack,
        rng: &mut R,
    ) -> Result<Option<Move>, SearchError> {
        let moves = self.all_placements(board, rack)?;

        let mut best: Option<(u32, Move)> = None;
        for m in moves {
            let score = match board.score(&m, false) {
                Ok(score) => score,
                Err(e) => {
                    warn!("Could not score candidate move: {}", e);
                    continue;
                }
            };
            let replace = match &best {
                None => true,
                Some((top, _)) if score > *top => true,
                Some((top, _)) if score == *top && score > 0 => rng.gen_bool(0.5),
                _ => false,
            };
            if replace {
                best = Some((score, m));
            }
        }

        Ok(best.filter(|(score, _)| *score > 0).map(|(score, m)| {
            debug!("Best move scores {}", score);
            m
        }))
    }
}

/// Move generator walking the GADDAG out from every anchor square
#[derive(Debug, Clone)]
pub struct GaddagAlgorithm {
    trie: Arc<Trie>,
}

impl GaddagAlgorithm {
    pub fn new(trie: Arc<Trie>) -> Self {
        Self { trie }
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }
}

impl ScrabbleAlgorithm for GaddagAlgorithm {
    fn all_placements(&self, board: &Board, rack: &Rack) -> Result<Vec<Move>, SearchError> {
        if rack.is_empty() {
            return Err(SearchError::EmptyRack);
        }

        // Down from the start square mirrors across on a symmetric board
        let starts: Vec<(Position, Direction)> = if board.is_empty() {
            let symmetric = board.width() == board.height()
                && board.multipliers().is_transpose_symmetric();
            if symmetric {
                vec![(board.start(), Direction::Right)]
            } else {
                Direction::iter().map(|&dir| (board.start(), dir)).collect()
            }
        } else {
            board
                .anchors()
                .into_iter()
                .flat_map(|pos| Direction::iter().map(move |&dir| (pos, dir)))
                .collect()
        };

        let root = self.trie.root();
        let found = starts
            .into_par_iter()
            .flat_map(|(anchor, dir)| {
                let mut search = Search {
                    board,
                    root,
                    anchor,
                    rack: rack.clone(),
                    placements: Vec::new(),
                    moves: Vec::new(),
                };
                search.search(anchor, root, dir);
                search.moves
            })
            .collect::<Vec<_>>();

        // The same move is found from each of its anchors
        let mut seen = HashSet::with_capacity(found.len());
        let moves: Vec<Move> = found.into_iter().filter(|m| seen.insert(m.clone())).collect();
        debug!("Found {} moves for {}", moves.len(), rack);
        Ok(moves)
    }
}

/// Backtracking search from a single anchor. The rack and the placements are
/// changed in place and restored before each call returns.
struct Search<'a> {
    board: &'a Board,
    root: Node<'a>,
    anchor: Position,
    rack: Rack,
    placements: Vec<TilePlacement>,
    moves: Vec<Move>,
}

impl<'a> Search<'a> {
    fn search(&mut self, pos: Position, node: Node<'a>, dir: Direction) {
        if let Some(tile) = self.board.tile_at(pos) {
            if let Some(child) = tile.letter().and_then(|l| node.child(l)) {
                self.advance(pos, child, dir);
            }
            return;
        }

        let mut tried = LetterSet::empty();
        let mut tried_blank = false;
        for i in 0..self.rack.len() {
            let tile = self.rack.tiles()[i];
            match tile {
                Tile::Letter(l) => {
                    if tried.insert(l) {
                        self.try_tile(pos, node, dir, i, Tile::Letter(l));
                    }
                }
                Tile::Blank(_) => {
                    if !tried_blank {
                        tried_blank = true;
                        for l in 'a'..='z' {
                            self.try_tile(pos, node, dir, i, Tile::Blank(Some(l)));
                        }
                    }
                }
            }
        }

        // The forward part of the word may end before this square
        if !self.placements.is_empty() {
            if let Some(sep) = node.cross_anchor() {
                self.switch(sep, dir);
            }
        }
    }

    fn try_tile(&mut self, pos: Position, node: Node<'a>, dir: Direction, index: usize, tile: Tile) {
        let letter = match tile.letter() {
            Some(l) => l,
            None => return,
        };
        let child = match node.child(letter) {
            Some(child) => child,
            None => return,
        };
        if !self.cross_word_valid(pos, letter, dir) {
            return;
        }

        let taken = self.rack.take_at(index);
        self.placements.push(TilePlacement::at(pos, tile));
        self.advance(pos, child, dir);
        self.placements.pop();
        self.rack.insert_at(index, taken);
    }

    /// Called once the square at `pos` has been consumed and `child` reached
    fn advance(&mut self, pos: Position, child: Node<'a>, dir: Direction) {
        let next = self.board.neighbour(pos, dir);
        let ends_here = !self.occupied_next(pos, dir)
            && (!dir.is_forward() || !self.occupied_next(self.anchor, dir.inverse()));
        if child.is_terminal() && ends_here {
            self.record();
        }

        match next {
            Some(p) => self.search(p, child, dir),
            None => {
                if let Some(sep) = child.cross_anchor() {
                    self.switch(sep, dir);
                }
            }
        }
    }

    /// Continues with the letters before the anchor, walking backwards
    fn switch(&mut self, sep: Node<'a>, dir: Direction) {
        let back = dir.inverse();
        if let Some(p) = self.board.neighbour(self.anchor, back) {
            self.search(p, sep, back);
        }
    }

    fn occupied_next(&self, pos: Position, dir: Direction) -> bool {
        self.board
            .neighbour(pos, dir)
            .map_or(false, |p| self.board.is_occupied(p))
    }

    /// Checks the word formed across the line of play if `letter` is put at `pos`
    fn cross_word_valid(&self, pos: Position, letter: char, dir: Direction) -> bool {
        let cross = dir.perpendicular();
        let before = self.occupied_next(pos, cross.inverse());
        if !before && !self.occupied_next(pos, cross) {
            return true;
        }
        self.cross_word_node(pos, letter, cross, before)
            .map_or(false, |node| node.is_terminal())
    }

    /// Reads `letter` and the tiles after it, then the tiles before it in reverse
    fn cross_word_node(
        &self,
        pos: Position,
        letter: char,
        cross: Direction,
        before: bool,
    ) -> Option<Node<'a>> {
        let mut node = self.follow_tiles(self.root.child(letter)?, pos, cross)?;
        if before {
            node = self.follow_tiles(node.cross_anchor()?, pos, cross.inverse())?;
        }
        Some(node)
    }

    fn follow_tiles(&self, mut node: Node<'a>, pos: Position, dir: Direction) -> Option<Node<'a>> {
        let mut curr = pos;
        while let Some(next) = self
            .board
            .neighbour(curr, dir)
            .filter(|p| self.board.is_occupied(*p))
        {
            node = node.child(self.board.tile_at(next)?.letter()?)?;
            curr = next;
        }
        Some(node)
    }

    fn record(&mut self) {
        let mut m = self.placements.clone();
        m.sort_by_key(|p| (p.y(), p.x()));
        self.moves.push(m);
    }
}
