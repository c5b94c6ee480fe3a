use super::error::BoardParseError;
use super::tile::Tile;
use super::util::TilePlacement;

/// Characters that stand for an empty square
const EMPTY_SQUARES: &str = " .+-*=#'\"";

/// Reads the tiles out of a board drawn as text, one row per line with the
/// squares separated by single spaces. Uppercase letters are tiles, lowercase
/// letters are blanks. Lines containing `---` are borders and a leading row
/// label ending in `:` or `|` (`#01:`, ` 1|`) is ignored. Trailing empty
/// squares and rows may be left out.
pub fn parse_tiles(text: &str) -> Result<Vec<TilePlacement>, BoardParseError> {
    let mut placements = Vec::new();
    let rows = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.contains("---"));

    for (y, (line_no, line)) in rows.enumerate() {
        let error = |message: String| BoardParseError {
            line: line_no + 1,
            message,
        };
        let cells = match line.find(|c: char| c == ':' || c == '|') {
            Some(idx) => &line[idx + 1..],
            None => line,
        };

        for (i, c) in cells.chars().enumerate() {
            if i % 2 == 1 {
                if c != ' ' {
                    return Err(error(format!(
                        "squares must be separated by a single space, found {:?}",
                        c
                    )));
                }
                continue;
            }
            let tile = if c.is_ascii_uppercase() {
                Tile::Letter(c.to_ascii_lowercase())
            } else if c.is_ascii_lowercase() {
                Tile::Blank(Some(c))
            } else if EMPTY_SQUARES.contains(c) {
                continue;
            } else {
                return Err(error(format!("{:?} is not a tile", c)));
            };
            let placement = TilePlacement::new(i / 2 + 1, y + 1, tile)
                .map_err(|e| error(e.to_string()))?;
            placements.push(placement);
        }
    }
    Ok(placements)
}
