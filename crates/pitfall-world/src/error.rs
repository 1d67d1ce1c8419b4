//! Error types for the `pitfall-world` crate.

use pitfall_types::Location;

/// Errors that can occur while reading a maze.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The maze has no rows, or its first row is empty.
    #[error("maze is empty")]
    EmptyMaze,

    /// A row's length differs from the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// A character that is not a maze cell.
    #[error("unknown maze character {ch:?} at {location}")]
    UnknownCell {
        /// The character read.
        ch: char,
        /// Where it was read.
        location: Location,
    },

    /// The maze is too large to address with grid coordinates.
    #[error("maze dimension {0} exceeds the coordinate range")]
    TooLarge(usize),

    /// The maze has no cell of the required kind.
    #[error("maze has no {0} cell")]
    Missing(char),

    /// The maze has more than one cell of a kind that must be unique.
    #[error("maze has more than one {ch} cell (second at {location})")]
    Duplicate {
        /// The cell character.
        ch: char,
        /// Location of the second occurrence.
        location: Location,
    },
}
