//! Rectangular maze grids.
//!
//! A [`Grid`] stores one [`Cell`] per coordinate, row-major, and is always
//! rectangular. Every accessor takes a [`Location`] and returns `None` (or
//! `false`) outside the grid instead of panicking, so callers can query
//! neighbours of border cells freely.
//!
//! Text mazes are one row per line:
//!
//! ```text
//! XXXXX
//! X.G.X
//! X.P.X
//! X.@.X
//! XXXXX
//! ```

use core::str::FromStr;

use pitfall_types::{Cell, Location};
use serde::Serialize;

use crate::error::WorldError;

/// A rectangular maze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    /// Cells, indexed `[y][x]`.
    cells: Vec<Vec<Cell>>,
    /// Number of columns.
    width: i32,
    /// Number of rows.
    height: i32,
}

impl Grid {
    /// Parse a maze from its rows.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the maze is empty, ragged, too large, or
    /// contains a character that is not a maze cell.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, WorldError> {
        let mut cells = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let mut parsed = Vec::new();
            for (x, ch) in row.as_ref().chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or_else(|| WorldError::UnknownCell {
                    ch,
                    location: Location::new(
                        i32::try_from(x).unwrap_or(i32::MAX),
                        i32::try_from(y).unwrap_or(i32::MAX),
                    ),
                })?;
                parsed.push(cell);
            }
            cells.push(parsed);
        }
        Self::from_cells(cells)
    }

    /// Build a grid from rows of cells.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the rows are empty, ragged, or too large
    /// to address.
    pub fn from_cells(cells: Vec<Vec<Cell>>) -> Result<Self, WorldError> {
        let expected = cells.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(WorldError::EmptyMaze);
        }
        for (row, cells) in cells.iter().enumerate() {
            if cells.len() != expected {
                return Err(WorldError::RaggedRow {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        let width = i32::try_from(expected)
            .ok()
            .ok_or(WorldError::TooLarge(expected))?;
        let height = i32::try_from(cells.len())
            .ok()
            .ok_or(WorldError::TooLarge(cells.len()))?;
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Number of columns.
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Whether `location` lies inside the grid.
    pub const fn in_bounds(&self, location: Location) -> bool {
        location.x >= 0 && location.y >= 0 && location.x < self.width && location.y < self.height
    }

    /// Whether `location` is inside the grid and off its outer frame.
    pub const fn is_interior(&self, location: Location) -> bool {
        location.x > 0
            && location.y > 0
            && location.x < self.width.saturating_sub(1)
            && location.y < self.height.saturating_sub(1)
    }

    /// The cell at `location`, or `None` outside the grid.
    pub fn cell(&self, location: Location) -> Option<Cell> {
        let x = usize::try_from(location.x).ok()?;
        let y = usize::try_from(location.y).ok()?;
        self.cells.get(y)?.get(x).copied()
    }

    /// Overwrite the cell at `location`. Returns `false` outside the grid.
    pub fn set(&mut self, location: Location, cell: Cell) -> bool {
        let (Ok(x), Ok(y)) = (usize::try_from(location.x), usize::try_from(location.y)) else {
            return false;
        };
        match self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Whether `location` is an in-grid wall.
    pub fn is_wall(&self, location: Location) -> bool {
        self.cell(location).is_some_and(Cell::is_wall)
    }

    /// Whether `location` is in the grid and can be stood on.
    pub fn is_open(&self, location: Location) -> bool {
        self.cell(location).is_some_and(|c| !c.is_wall())
    }

    /// Every location, row by row.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Location::new(x, y)))
    }

    /// Every interior location, row by row.
    pub fn interior(&self) -> impl Iterator<Item = Location> + '_ {
        self.locations().filter(|&l| self.is_interior(l))
    }

    /// Every location holding `cell`, row by row.
    pub fn find(&self, cell: Cell) -> impl Iterator<Item = Location> + '_ {
        self.locations().filter(move |&l| self.cell(l) == Some(cell))
    }

    /// The single location holding `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Missing`] if there is none and
    /// [`WorldError::Duplicate`] if there is more than one.
    pub fn find_unique(&self, cell: Cell) -> Result<Location, WorldError> {
        let mut found = self.find(cell);
        let first = found.next().ok_or(WorldError::Missing(cell.as_char()))?;
        if let Some(second) = found.next() {
            return Err(WorldError::Duplicate {
                ch: cell.as_char(),
                location: second,
            });
        }
        Ok(first)
    }

    /// A copy with every run tile (pits, safe tiles, warnings) hidden as
    /// [`Cell::Unknown`]. Walls, the goal and the start stay visible.
    #[must_use]
    pub fn masked(&self) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&c| match c {
                        Cell::Pit | Cell::Safe | Cell::Warn1 | Cell::Warn2 => Cell::Unknown,
                        other => other,
                    })
                    .collect()
            })
            .collect();
        Self {
            cells,
            width: self.width,
            height: self.height,
        }
    }
}

impl FromStr for Grid {
    type Err = WorldError;

    /// Parse one row per non-blank line; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        Self::parse(&rows)
    }
}

impl core::fmt::Display for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (y, row) in self.cells.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}
