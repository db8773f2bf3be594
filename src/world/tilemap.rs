//! Tile-map level: a rectangular grid of wall / floor cells.
//!
//! ### Text format
//! One line per row, `#` = wall, `.` = floor.  Every row must have the same
//! length.  Blank lines before and after the grid and `\r` line endings
//! are tolerated.

use std::{fs, io, path::Path, str::FromStr};

use glam::Vec2;
use thiserror::Error;

/// Edge length of one grid cell in world units.
pub const CELL_SIZE: f32 = 64.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Floor,
}

impl Cell {
    fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Floor),
            _ => None,
        }
    }
}

/// Errors raised while loading a level.  All of them are detected up front so
/// that lookups later on can never index outside the grid.
#[derive(Error, Debug)]
pub enum MapError {
    /// Underlying I/O failure – propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("map has no rows")]
    Empty,

    /// Row `row` is not as wide as the first one.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Unknown cell symbol.
    #[error("unexpected symbol {ch:?} at row {row}, column {col}")]
    BadCell { row: usize, col: usize, ch: char },
}

/// Immutable level grid, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TileMap {
    // ---------------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------------

    /// Build a map from its text rows.
    pub fn parse<I, S>(rows: I) -> Result<Self, MapError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines: Vec<String> = rows
            .into_iter()
            .map(|r| r.as_ref().trim_end_matches('\r').to_owned())
            .collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        let leading = lines.iter().take_while(|l| l.trim().is_empty()).count();
        lines.drain(..leading);

        let width = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(width * lines.len());
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::from_symbol(ch).ok_or(MapError::BadCell { row, col, ch })?;
                cells.push(cell);
            }
        }

        let map = Self {
            width,
            height: lines.len(),
            cells,
        };
        if !map.border_is_closed() {
            log::warn!(
                "map border is not fully walled ({}x{}); outside cells count as walls",
                map.width,
                map.height
            );
        }
        Ok(map)
    }

    /// Read and parse a level file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let text = fs::read_to_string(path)?;
        text.parse()
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at grid coordinates, `None` outside the grid.
    #[inline]
    pub fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        if col < self.width && row < self.height {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// True if the world point lies in a wall cell **or** outside the grid.
    #[inline]
    pub fn is_wall(&self, x: f32, y: f32) -> bool {
        let col = (x / CELL_SIZE).floor();
        let row = (y / CELL_SIZE).floor();
        // the negated comparison also rejects NaN
        if !(col >= 0.0 && row >= 0.0) {
            return true;
        }
        !matches!(self.cell(col as usize, row as usize), Some(Cell::Floor))
    }

    /// World-space centre of a grid cell.
    #[inline]
    pub fn cell_center(col: usize, row: usize) -> Vec2 {
        Vec2::new(
            col as f32 * CELL_SIZE + CELL_SIZE * 0.5,
            row as f32 * CELL_SIZE + CELL_SIZE * 0.5,
        )
    }

    /// Centre of the first floor cell in row-major order.
    pub fn first_floor_center(&self) -> Option<Vec2> {
        self.cells
            .iter()
            .position(|&c| c == Cell::Floor)
            .map(|i| Self::cell_center(i % self.width, i / self.width))
    }

    fn border_is_closed(&self) -> bool {
        let wall = |col, row| self.cell(col, row) == Some(Cell::Wall);
        (0..self.width).all(|c| wall(c, 0) && wall(c, self.height - 1))
            && (0..self.height).all(|r| wall(0, r) && wall(self.width - 1, r))
    }
}

impl FromStr for TileMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.lines())
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::levels::DEFAULT_LEVEL;
    use std::io::Write;

    fn boxed() -> TileMap {
        TileMap::parse(["#####", "#...#", "#.#.#", "#...#", "#####"]).unwrap()
    }

    #[test]
    fn default_level_parses() {
        let map = TileMap::parse(DEFAULT_LEVEL).unwrap();
        assert_eq!(map.width(), 20);
        assert_eq!(map.height(), 17);
        assert!(map.border_is_closed());
    }

    #[test]
    fn wall_lookup_by_world_coords() {
        let map = boxed();
        assert!(map.is_wall(10.0, 10.0)); // corner
        assert!(!map.is_wall(96.0, 96.0)); // (1,1)
        assert!(map.is_wall(2.5 * CELL_SIZE, 2.5 * CELL_SIZE)); // pillar
        assert!(!map.is_wall(CELL_SIZE, CELL_SIZE)); // exact cell boundary
    }

    #[test]
    fn outside_grid_is_blocked() {
        let map = TileMap::parse(["...", "...", "..."]).unwrap();
        assert!(!map.is_wall(1.0, 1.0));
        for (x, y) in [
            (-0.5, 10.0),
            (10.0, -0.5),
            (3.0 * CELL_SIZE, 10.0),
            (10.0, 3.0 * CELL_SIZE),
            (1.0e9, 1.0e9),
            (-1.0e9, 5.0),
            (f32::NAN, 5.0),
            (f32::INFINITY, 5.0),
        ] {
            assert!(map.is_wall(x, y), "({x}, {y}) should be blocked");
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(TileMap::parse(Vec::<&str>::new()), Err(MapError::Empty)));
        assert!(matches!("\n\n".parse::<TileMap>(), Err(MapError::Empty)));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = TileMap::parse(["####", "#..#", "###"]).unwrap_err();
        assert!(matches!(
            err,
            MapError::Ragged {
                row: 2,
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn rejects_unknown_symbols() {
        let err = TileMap::parse(["###", "#x#", "###"]).unwrap_err();
        assert!(matches!(
            err,
            MapError::BadCell {
                row: 1,
                col: 1,
                ch: 'x'
            }
        ));
    }

    #[test]
    fn tolerates_crlf_and_trailing_blank_lines() {
        let map: TileMap = "###\r\n#.#\r\n###\r\n\r\n".parse().unwrap();
        assert_eq!((map.width(), map.height()), (3, 3));
        assert_eq!(map.cell(1, 1), Some(Cell::Floor));
    }

    #[test]
    fn tolerates_leading_blank_lines() {
        let map: TileMap = "\n  \n###\n#.#\n###".parse().unwrap();
        assert_eq!((map.width(), map.height()), (3, 3));
        assert_eq!(map.cell(1, 1), Some(Cell::Floor));
        // row numbers count from the first grid line
        assert!(matches!(
            "\n###\n##".parse::<TileMap>(),
            Err(MapError::Ragged { row: 1, .. })
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(tmp, "####\n#..#\n####").unwrap();
        let map = TileMap::from_file(tmp.path()).unwrap();
        assert_eq!((map.width(), map.height()), (4, 3));

        let missing = tmp.path().with_extension("missing");
        assert!(matches!(TileMap::from_file(missing), Err(MapError::Io(_))));
    }

    #[test]
    fn first_floor_is_row_major() {
        let map = boxed();
        assert_eq!(map.first_floor_center(), Some(TileMap::cell_center(1, 1)));
        let solid = TileMap::parse(["##", "##"]).unwrap();
        assert_eq!(solid.first_floor_center(), None);
    }
}
