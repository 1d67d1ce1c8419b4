//! Enumeration types for the Pitfall maze.
//!
//! The maze is drawn with single characters. [`Cell`] covers every character
//! a grid can hold; [`Symbol`] is the subset the knowledge base reasons
//! about (the "run" symbols a traversable cell can carry).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four moves an agent can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move toward row 0.
    Up,
    /// Move toward the last row.
    Down,
    /// Move toward column 0.
    Left,
    /// Move toward the last column.
    Right,
}

impl Direction {
    /// All actions in the order the planner tries them.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Order used when enumerating neighbours of a cell. Rule evaluation
    /// and promise scoring depend on it being fixed.
    pub const NEIGHBOR_ORDER: [Self; 4] = [Self::Right, Self::Left, Self::Down, Self::Up];

    /// Unit `(dx, dy)` offset for this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Single-letter action token (`U`, `D`, `L`, `R`).
    pub const fn as_char(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ---------------------------------------------------------------------------
// Symbol
// ---------------------------------------------------------------------------

/// A run symbol: a property a traversable cell may have.
///
/// Each symbol is a property, not a label, so a pit bordering another pit
/// is both [`Symbol::Pit`] and [`Symbol::Warn1`]. The simulator reports
/// only the highest-priority one (see [`Symbol::PRIORITY`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// The cell holds a pit.
    Pit,
    /// No pit on, next to, or two cells straight out from the cell.
    Safe,
    /// A pit is orthogonally adjacent.
    Warn1,
    /// A pit lies exactly two cells away in a straight line.
    Warn2,
}

impl Symbol {
    /// Every run symbol.
    pub const ALL: [Self; 4] = [Self::Pit, Self::Safe, Self::Warn1, Self::Warn2];

    /// Display priority, highest first. A tile shows the first symbol in
    /// this list that holds for it.
    pub const PRIORITY: [Self; 4] = [Self::Pit, Self::Warn1, Self::Warn2, Self::Safe];

    /// Maze character for this symbol.
    pub const fn as_char(self) -> char {
        match self {
            Self::Pit => 'P',
            Self::Safe => '.',
            Self::Warn1 => '1',
            Self::Warn2 => '2',
        }
    }

    /// Parse a maze character into a run symbol.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'P' => Some(Self::Pit),
            '.' => Some(Self::Safe),
            '1' => Some(Self::Warn1),
            '2' => Some(Self::Warn2),
            _ => None,
        }
    }

    /// Symbols that would have been displayed instead of `self` had they
    /// held. Observing `self` therefore rules all of them out.
    pub const fn outranking(self) -> &'static [Self] {
        match self {
            Self::Pit => &[],
            Self::Warn1 => &[Self::Pit],
            Self::Warn2 => &[Self::Pit, Self::Warn1],
            Self::Safe => &[Self::Pit, Self::Warn1, Self::Warn2],
        }
    }
}

impl core::fmt::Display for Symbol {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// Any character a maze grid can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Impassable wall (`X`).
    Wall,
    /// The goal (`G`).
    Goal,
    /// The player's starting cell (`@`).
    Start,
    /// A pit (`P`).
    Pit,
    /// A safe tile (`.`).
    Safe,
    /// One step from a pit (`1`).
    Warn1,
    /// Two steps from a pit (`2`).
    Warn2,
    /// Not yet known to the agent (`?`).
    Unknown,
}

impl Cell {
    /// Maze character for this cell.
    pub const fn as_char(self) -> char {
        match self {
            Self::Wall => 'X',
            Self::Goal => 'G',
            Self::Start => '@',
            Self::Pit => 'P',
            Self::Safe => '.',
            Self::Warn1 => '1',
            Self::Warn2 => '2',
            Self::Unknown => '?',
        }
    }

    /// Parse a maze character.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'X' => Some(Self::Wall),
            'G' => Some(Self::Goal),
            '@' => Some(Self::Start),
            'P' => Some(Self::Pit),
            '.' => Some(Self::Safe),
            '1' => Some(Self::Warn1),
            '2' => Some(Self::Warn2),
            '?' => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Whether the cell blocks movement.
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

impl From<Symbol> for Cell {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::Pit => Self::Pit,
            Symbol::Safe => Self::Safe,
            Symbol::Warn1 => Self::Warn1,
            Symbol::Warn2 => Self::Warn2,
        }
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            let (dx, dy) = d.delta();
            let (ox, oy) = d.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn symbol_chars_match_cells() {
        for s in Symbol::ALL {
            assert_eq!(Symbol::from_char(s.as_char()), Some(s));
            assert_eq!(Cell::from(s).as_char(), s.as_char());
        }
        assert_eq!(Symbol::from_char('X'), None);
    }

    #[test]
    fn outranking_follows_priority() {
        assert!(Symbol::Pit.outranking().is_empty());
        assert_eq!(Symbol::Warn2.outranking(), &[Symbol::Pit, Symbol::Warn1]);
        assert_eq!(Symbol::Safe.outranking().len(), 3);
    }

    #[test]
    fn unknown_char_is_rejected() {
        assert_eq!(Cell::from_char('Z'), None);
        assert_eq!(Cell::from_char('X'), Some(Cell::Wall));
        assert!(Cell::Wall.is_wall());
        assert!(!Cell::Goal.is_wall());
    }
}
