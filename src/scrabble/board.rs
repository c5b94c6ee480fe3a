use std::collections::{HashMap, HashSet};
use std::fmt;

use log::debug;
use ndarray::Array2;

use super::config::ScoringConfig;
use super::error::{BoardError, PlacementError};
use super::multiplier::Multipliers;
use super::tile::Tile;
use super::util::{Direction, Position, TilePlacement};

pub const MIN_BOARD_SIZE: usize = 2;
pub const STANDARD_BOARD_SIZE: usize = 15;

/// One square of a word being read off the board
#[derive(Debug, Clone, Copy)]
struct WordCell {
    pos: Position,
    tile: Tile,
    /// Placed this turn, so its multiplier still counts
    fresh: bool,
}

#[derive(Debug, Clone)]
pub struct Board {
    /// Tiles indexed by `[[y - 1, x - 1]]`
    grid: Array2<Option<Tile>>,
    multipliers: Multipliers,
    scoring: ScoringConfig,
    /// Number of occupied squares
    tile_count: usize,
}

impl Board {
    pub fn new(
        width: usize,
        height: usize,
        multipliers: Multipliers,
        scoring: ScoringConfig,
    ) -> Result<Self, BoardError> {
        if width < MIN_BOARD_SIZE || height < MIN_BOARD_SIZE {
            return Err(BoardError::TooSmall { width, height });
        }
        debug!("Created {}x{} board", width, height);
        Ok(Self {
            grid: Array2::from_elem((height, width), None),
            multipliers,
            scoring,
            tile_count: 0,
        })
    }

    /// Empty 15x15 board with the classic bonus squares and scoring
    pub fn standard() -> Self {
        Self {
            grid: Array2::from_elem((STANDARD_BOARD_SIZE, STANDARD_BOARD_SIZE), None),
            multipliers: Multipliers::standard(),
            scoring: ScoringConfig::default(),
            tile_count: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.grid.ncols()
    }

    pub fn height(&self) -> usize {
        self.grid.nrows()
    }

    pub fn multipliers(&self) -> &Multipliers {
        &self.multipliers
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// The square the first word has to cover
    pub fn start(&self) -> Position {
        fn middle(n: usize) -> usize {
            if n % 2 == 1 {
                (n + 1) / 2
            } else {
                n / 2
            }
        }
        Position::new(middle(self.width()), middle(self.height()))
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 1 && pos.y >= 1 && pos.x <= self.width() && pos.y <= self.height()
    }

    /// Next square in the given direction, if it is on the board
    pub fn neighbour(&self, pos: Position, dir: Direction) -> Option<Position> {
        pos.step(dir).filter(|p| self.in_bounds(*p))
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        self.tile_at(Position::new(x, y))
    }

    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        if self.in_bounds(pos) {
            self[pos]
        } else {
            None
        }
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.tile_at(pos).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.tile_count == 0
    }

    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Checks if any of the four neighbours holds a tile
    pub fn has_adjacent_tile(&self, pos: Position) -> bool {
        pos.adjacent().any(|p| self.is_occupied(p))
    }

    /// Empty squares a new word can grow from. On an empty board that is only the start square.
    pub fn anchors(&self) -> Vec<Position> {
        if self.is_empty() {
            return vec![self.start()];
        }
        let mut anchors = Vec::new();
        for y in 1..=self.height() {
            for x in 1..=self.width() {
                let pos = Position::new(x, y);
                if !self.is_occupied(pos) && self.has_adjacent_tile(pos) {
                    anchors.push(pos);
                }
            }
        }
        anchors
    }

    /// Puts a tile down without any of the placement rules. Used when loading saved boards.
    pub fn put(&mut self, placement: TilePlacement) -> Result<(), BoardError> {
        let pos = placement.position();
        if !self.in_bounds(pos) {
            return Err(BoardError::OutOfBounds { x: pos.x, y: pos.y });
        }
        if self.is_occupied(pos) {
            return Err(BoardError::Occupied { x: pos.x, y: pos.y });
        }
        self[pos] = Some(placement.tile());
        self.tile_count += 1;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.grid.fill(None);
        self.tile_count = 0;
    }

    /// Checks that the placements form a legal move on this board
    pub fn validate(&self, placements: &[TilePlacement]) -> Result<(), PlacementError> {
        if placements.is_empty() {
            return Err(PlacementError::Empty);
        }

        let mut placed = HashSet::with_capacity(placements.len());
        for p in placements {
            let (x, y) = (p.x(), p.y());
            if !self.in_bounds(p.position()) {
                return Err(PlacementError::OutOfBounds { x, y });
            }
            if self.is_occupied(p.position()) {
                return Err(PlacementError::Occupied { x, y });
            }
            if !placed.insert(p.position()) {
                return Err(PlacementError::Duplicate { x, y });
            }
            if p.tile().letter().is_none() {
                return Err(PlacementError::UnassignedBlank { x, y });
            }
        }

        if let [single] = placements {
            let pos = single.position();
            if self.is_empty() {
                if pos != self.start() {
                    return Err(PlacementError::NotOnStart { x: pos.x, y: pos.y });
                }
            } else if !self.has_adjacent_tile(pos) {
                return Err(PlacementError::NotConnected { x: pos.x, y: pos.y });
            }
            return Ok(());
        }

        let dir = line_direction(placements).ok_or(PlacementError::NotInLine)?;
        let first = placements[0].position();
        let lo = placements.iter().map(|p| p.position()[dir]).min().unwrap_or(first[dir]);
        let hi = placements.iter().map(|p| p.position()[dir]).max().unwrap_or(first[dir]);
        for i in lo..=hi {
            let pos = match dir {
                Direction::Right => Position::new(i, first.y),
                _ => Position::new(first.x, i),
            };
            if !placed.contains(&pos) && !self.is_occupied(pos) {
                return Err(PlacementError::Gap { x: pos.x, y: pos.y });
            }
        }

        if self.is_empty() {
            if !placed.contains(&self.start()) {
                return Err(PlacementError::StartNotCovered);
            }
        } else if !placements.iter().any(|p| self.has_adjacent_tile(p.position())) {
            return Err(PlacementError::Disconnected);
        }
        Ok(())
    }

    /// Points the placements are worth. Without validation the placements are
    /// assumed to be a legal move and the result is meaningless otherwise.
    pub fn score(&self, placements: &[TilePlacement], validate: bool) -> Result<u32, PlacementError> {
        if validate {
            self.validate(placements)?;
        }
        Ok(self.score_unchecked(placements))
    }

    /// Validates, scores and commits the placements. The board is untouched if the move is illegal.
    pub fn place(&mut self, placements: &[TilePlacement]) -> Result<u32, PlacementError> {
        self.validate(placements)?;
        let score = self.score_unchecked(placements);
        for p in placements {
            self[p.position()] = Some(p.tile());
        }
        self.tile_count += placements.len();
        debug!("Placed {} tiles for {} points", placements.len(), score);
        Ok(score)
    }

    /// The main word a move spells, in lowercase
    pub fn placed_word(
        &self,
        placements: &[TilePlacement],
        validate: bool,
    ) -> Result<String, PlacementError> {
        if validate {
            self.validate(placements)?;
        }
        let first = match placements.first() {
            Some(p) => p.position(),
            None => return Ok(String::new()),
        };
        let placed = placement_map(placements);
        let dir = if placements.len() == 1 {
            if self.word_cells(first, Direction::Right, &placed).len() > 1 {
                Direction::Right
            } else {
                Direction::Down
            }
        } else {
            line_direction(placements).unwrap_or(Direction::Down)
        };
        Ok(spell(&self.word_cells(first, dir, &placed)))
    }

    /// Every word of two or more letters currently on the board, across then down
    pub fn all_words(&self) -> Vec<String> {
        let none = HashMap::new();
        let mut words = Vec::new();
        for &dir in Direction::iter() {
            for y in 1..=self.height() {
                for x in 1..=self.width() {
                    let pos = Position::new(x, y);
                    let starts_word = self.is_occupied(pos)
                        && !pos.step(dir.inverse()).map_or(false, |p| self.is_occupied(p));
                    if starts_word {
                        let cells = self.word_cells(pos, dir, &none);
                        if cells.len() > 1 {
                            words.push(spell(&cells));
                        }
                    }
                }
            }
        }
        words
    }

    /// Every word of two or more letters the placements form, main word first
    pub fn words_formed(&self, placements: &[TilePlacement]) -> Vec<String> {
        self.formed_words(placements).iter().map(|cells| spell(cells)).collect()
    }

    fn formed_words(&self, placements: &[TilePlacement]) -> Vec<Vec<WordCell>> {
        let first = match placements.first() {
            Some(p) => p.position(),
            None => return Vec::new(),
        };
        let placed = placement_map(placements);

        let mut words = Vec::new();
        if placements.len() == 1 {
            // A lone tile is part of a word either way
            for &dir in Direction::iter() {
                words.push(self.word_cells(first, dir, &placed));
            }
        } else {
            let dir = line_direction(placements).unwrap_or(Direction::Down);
            words.push(self.word_cells(first, dir, &placed));
            for p in placements {
                words.push(self.word_cells(p.position(), dir.perpendicular(), &placed));
            }
        }
        words.retain(|cells| cells.len() > 1);
        words
    }

    fn score_unchecked(&self, placements: &[TilePlacement]) -> u32 {
        // Scores saturate, custom letter values can be arbitrarily large
        let mut total = self
            .formed_words(placements)
            .iter()
            .map(|cells| self.word_score(cells))
            .fold(0u32, u32::saturating_add);

        if placements.len() >= self.scoring.bingo_tile_count {
            debug!("Bingo, {} bonus points", self.scoring.bingo_score);
            total = total.saturating_add(self.scoring.bingo_score);
        }
        total
    }

    /// Letter multipliers count for squares filled this turn, and so do word
    /// multipliers, which apply to the whole word
    fn word_score(&self, cells: &[WordCell]) -> u32 {
        let mut sum: u32 = 0;
        let mut word_mult: u32 = 1;
        for cell in cells.iter() {
            let mut points = cell.tile.points(&self.scoring.letter_values);
            if cell.fresh {
                if let Some(m) = self.multipliers.get(cell.pos) {
                    points = points.saturating_mul(m.letter_factor());
                    word_mult = word_mult.saturating_mul(m.word_factor());
                }
            }
            sum = sum.saturating_add(points);
        }

        let score = sum.saturating_mul(word_mult);
        debug!("{} scores {} x {} = {}", spell(cells), sum, word_mult, score);
        score
    }

    /// Contiguous run of tiles through `pos` along `dir`, counting the placed ones
    fn word_cells(&self, pos: Position, dir: Direction, placed: &HashMap<Position, Tile>) -> Vec<WordCell> {
        let cell = |p: Position| match placed.get(&p) {
            Some(&tile) => Some(WordCell { pos: p, tile, fresh: true }),
            None => self.tile_at(p).map(|tile| WordCell { pos: p, tile, fresh: false }),
        };

        let mut start = pos;
        while let Some(prev) = start.step(dir.inverse()).filter(|p| cell(*p).is_some()) {
            start = prev;
        }

        let mut cells = Vec::new();
        let mut curr = Some(start);
        while let Some(c) = curr.and_then(cell) {
            cells.push(c);
            curr = c.pos.step(dir);
        }
        cells
    }
}

fn placement_map(placements: &[TilePlacement]) -> HashMap<Position, Tile> {
    placements.iter().map(|p| (p.position(), p.tile())).collect()
}

/// Direction shared by all placements, `Right` for a single one
fn line_direction(placements: &[TilePlacement]) -> Option<Direction> {
    let first = placements.first()?;
    if placements.iter().all(|p| p.y() == first.y()) {
        Some(Direction::Right)
    } else if placements.iter().all(|p| p.x() == first.x()) {
        Some(Direction::Down)
    } else {
        None
    }
}

fn spell(cells: &[WordCell]) -> String {
    cells.iter().filter_map(|c| c.tile.letter()).collect()
}

impl std::ops::Index<Position> for Board {
    type Output = Option<Tile>;

    fn index(&self, index: Position) -> &Self::Output {
        &self.grid[[index.y - 1, index.x - 1]]
    }
}

impl std::ops::IndexMut<Position> for Board {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        &mut self.grid[[index.y - 1, index.x - 1]]
    }
}

/// One row per line with the squares separated by spaces. Empty bonus squares
/// show as `*`, lettered tiles in uppercase and blanks in lowercase.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 1..=self.height() {
            let row: Vec<String> = (1..=self.width())
                .map(|x| {
                    let pos = Position::new(x, y);
                    let c = match self[pos] {
                        Some(tile) => tile.to_char(),
                        None if self.multipliers.get(pos).is_some() => '*',
                        None => ' ',
                    };
                    c.to_string()
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrabble::multiplier::Multiplier;
    use crate::scrabble::tile::LetterValues;

    fn word(x: usize, y: usize, dir: Direction, letters: &str) -> Vec<TilePlacement> {
        letters
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let (x, y) = match dir {
                    Direction::Right => (x + i, y),
                    _ => (x, y + i),
                };
                TilePlacement::new(x, y, Tile::from_letter(c).unwrap()).unwrap()
            })
            .collect()
    }

    fn plain_board(size: usize) -> Board {
        Board::new(size, size, Multipliers::new(), ScoringConfig::default()).unwrap()
    }

    #[test]
    fn test_minimum_size() {
        assert!(Board::new(2, 2, Multipliers::new(), ScoringConfig::default()).is_ok());
        assert_eq!(
            Board::new(1, 1, Multipliers::new(), ScoringConfig::default()).unwrap_err(),
            BoardError::TooSmall { width: 1, height: 1 }
        );
    }

    #[test]
    fn test_start_square() {
        assert_eq!(Board::standard().start(), Position::new(8, 8));
        assert_eq!(plain_board(2).start(), Position::new(1, 1));
        assert_eq!(plain_board(4).start(), Position::new(2, 2));
        let wide = Board::new(5, 6, Multipliers::new(), ScoringConfig::default()).unwrap();
        assert_eq!(wide.start(), Position::new(3, 3));
    }

    #[test]
    fn test_first_word_scores_center_double() {
        let mut board = Board::standard();
        let cat = word(7, 8, Direction::Right, "cat");
        assert_eq!(board.score(&cat, true), Ok(10));
        assert_eq!(board.place(&cat), Ok(10));
        assert_eq!(board.tile_count(), 3);
        assert_eq!(board.placed_word(&cat, false), Ok("cat".to_string()));
    }

    #[test]
    fn test_extending_a_word() {
        let s = word(7, 8, Direction::Right, "s");
        for mut board in [plain_board(15), Board::standard()] {
            for p in word(4, 8, Direction::Right, "cat") {
                board.put(p).unwrap();
            }
            // (7, 8) is a plain square on the standard layout
            assert_eq!(board.score(&s, true), Ok(3 + 1 + 1 + 1));
            assert_eq!(board.placed_word(&s, true), Ok("cats".to_string()));
        }
    }

    #[test]
    fn test_cross_words_score() {
        let mut board = plain_board(15);
        board.place(&word(7, 8, Direction::Right, "at")).unwrap();
        let b = word(7, 7, Direction::Right, "b");
        assert_eq!(board.score(&b, true), Ok(3 + 1));

        // "me" across on top of "at" also forms "ma" and "et"
        let me = word(7, 7, Direction::Right, "me");
        assert_eq!(board.score(&me, true), Ok((3 + 1) + (3 + 1) + (1 + 1)));
    }

    #[test]
    fn test_blanks_score_nothing_but_take_word_multiplier() {
        let mut multipliers = Multipliers::new();
        multipliers.insert(Position::new(2, 2), Multiplier::TripleWord);
        multipliers.insert(Position::new(3, 2), Multiplier::TripleLetter);
        let board = Board::new(3, 3, multipliers, ScoringConfig::default()).unwrap();
        let moves = vec![
            TilePlacement::new(2, 2, Tile::Blank(Some('z'))).unwrap(),
            TilePlacement::new(3, 2, Tile::Letter('a')).unwrap(),
        ];
        assert_eq!(board.score(&moves, true), Ok((0 + 3) * 3));
    }

    #[test]
    fn test_bingo() {
        let board = plain_board(15);
        let seven = word(2, 8, Direction::Right, "abcdefg");
        let sum: u32 = "abcdefg"
            .chars()
            .map(|c| board.scoring().letter_values.value(c))
            .sum();
        assert_eq!(board.score(&seven, true), Ok(sum + 50));
    }

    #[test]
    fn test_huge_letter_values_saturate() {
        let scoring = ScoringConfig {
            letter_values: LetterValues::new([4_000_000_000; 26]),
            bingo_tile_count: 3,
            ..ScoringConfig::default()
        };
        let mut layout = Multipliers::new();
        layout.insert(Position::new(1, 2), Multiplier::TripleWord);
        let mut board = Board::new(3, 3, layout, scoring).unwrap();
        let cat = word(1, 2, Direction::Right, "cat");
        assert_eq!(board.score(&cat, true), Ok(u32::MAX));
        assert_eq!(board.place(&cat), Ok(u32::MAX));
    }

    #[test]
    fn test_single_tile_off_start_rejected() {
        let board = Board::standard();
        assert_eq!(
            board.validate(&word(1, 1, Direction::Right, "a")),
            Err(PlacementError::NotOnStart { x: 1, y: 1 })
        );
        assert_eq!(board.validate(&word(8, 8, Direction::Right, "a")), Ok(()));
        assert_eq!(
            board.validate(&word(1, 1, Direction::Right, "an")),
            Err(PlacementError::StartNotCovered)
        );
    }

    #[test]
    fn test_validation_errors() {
        let mut board = plain_board(15);
        board.place(&word(7, 8, Direction::Right, "cat")).unwrap();

        assert_eq!(board.validate(&[]), Err(PlacementError::Empty));
        assert_eq!(
            board.validate(&word(7, 8, Direction::Down, "a")),
            Err(PlacementError::Occupied { x: 7, y: 8 })
        );
        assert_eq!(
            board.validate(&word(15, 9, Direction::Right, "ab")),
            Err(PlacementError::OutOfBounds { x: 16, y: 9 })
        );
        assert_eq!(
            board.validate(&word(1, 1, Direction::Right, "a")),
            Err(PlacementError::NotConnected { x: 1, y: 1 })
        );
        assert_eq!(
            board.validate(&word(1, 1, Direction::Right, "ab")),
            Err(PlacementError::Disconnected)
        );

        let mut scattered = word(7, 9, Direction::Right, "a");
        scattered.extend(word(8, 10, Direction::Right, "b"));
        assert_eq!(board.validate(&scattered), Err(PlacementError::NotInLine));

        let mut gap = word(6, 9, Direction::Right, "a");
        gap.extend(word(8, 9, Direction::Right, "b"));
        assert_eq!(board.validate(&gap), Err(PlacementError::Gap { x: 7, y: 9 }));

        let dup = vec![
            TilePlacement::new(7, 9, Tile::Letter('a')).unwrap(),
            TilePlacement::new(7, 9, Tile::Letter('b')).unwrap(),
        ];
        assert_eq!(board.validate(&dup), Err(PlacementError::Duplicate { x: 7, y: 9 }));

        let blank = vec![TilePlacement::new(7, 9, Tile::blank()).unwrap()];
        assert_eq!(
            board.validate(&blank),
            Err(PlacementError::UnassignedBlank { x: 7, y: 9 })
        );
    }

    #[test]
    fn test_gaps_filled_by_existing_tiles() {
        let mut board = plain_board(15);
        board.place(&word(8, 8, Direction::Right, "a")).unwrap();
        let mut around = word(7, 8, Direction::Right, "c");
        around.extend(word(9, 8, Direction::Right, "t"));
        assert_eq!(board.validate(&around), Ok(()));
        assert_eq!(board.placed_word(&around, true), Ok("cat".to_string()));
    }

    #[test]
    fn test_failed_place_leaves_board_untouched() {
        let mut board = Board::standard();
        let bad = word(1, 1, Direction::Right, "cat");
        assert!(board.place(&bad).is_err());
        assert!(board.is_empty());
        assert_eq!(board.get(1, 1), None);
    }

    #[test]
    fn test_words_formed() {
        let mut board = plain_board(15);
        board.place(&word(7, 8, Direction::Right, "at")).unwrap();
        assert_eq!(board.words_formed(&word(7, 7, Direction::Right, "me")), vec!["me", "ma", "et"]);
        assert_eq!(board.words_formed(&word(9, 8, Direction::Right, "e")), vec!["ate"]);
        assert!(board.words_formed(&[]).is_empty());
    }

    #[test]
    fn test_all_words_and_anchors() {
        let mut board = plain_board(5);
        assert_eq!(board.anchors(), vec![Position::new(3, 3)]);
        board.place(&word(2, 3, Direction::Right, "cat")).unwrap();
        board.place(&word(4, 1, Direction::Down, "at")).unwrap();
        assert_eq!(board.all_words(), vec!["cat".to_string(), "att".to_string()]);
        assert!(!board.anchors().contains(&Position::new(2, 3)));
        assert!(board.anchors().contains(&Position::new(1, 3)));
        board.clear();
        assert!(board.is_empty());
        assert!(board.all_words().is_empty());
    }

    #[test]
    fn test_display() {
        let mut multipliers = Multipliers::new();
        multipliers.insert(Position::new(1, 1), Multiplier::DoubleWord);
        let mut board = Board::new(3, 2, multipliers, ScoringConfig::default()).unwrap();
        board.put(TilePlacement::new(2, 1, Tile::Letter('q')).unwrap()).unwrap();
        board.put(TilePlacement::new(3, 2, Tile::Blank(Some('i'))).unwrap()).unwrap();
        assert_eq!(board.to_string(), "* Q  \n    i\n");
    }
}
