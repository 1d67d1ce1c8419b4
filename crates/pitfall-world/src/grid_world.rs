//! A reference simulator over a fixed text maze.
//!
//! [`GridWorld`] knows where the pits are and reports, for the cell the
//! agent stands on, the highest-priority run symbol that holds there:
//! [`Symbol::Pit`], then [`Symbol::Warn1`] (a pit is adjacent), then
//! [`Symbol::Warn2`] (a pit is exactly two cells away in a straight line,
//! walls notwithstanding), then [`Symbol::Safe`].

use std::collections::BTreeSet;

use core::str::FromStr;

use pitfall_types::{Cell, Direction, Location, Observation, Symbol};
use tracing::debug;

use crate::environment::Environment;
use crate::error::WorldError;
use crate::grid::Grid;

/// A maze with hidden pits and one player.
#[derive(Debug, Clone)]
pub struct GridWorld {
    /// The true maze.
    grid: Grid,
    /// Every pit location.
    pits: BTreeSet<Location>,
    /// Where the player started.
    start: Location,
    /// The goal cell.
    goal: Location,
    /// Where the player stands now.
    player: Location,
}

impl GridWorld {
    /// Build a world from a true maze holding exactly one start (`@`) and
    /// one goal (`G`).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the start or goal is missing or repeated.
    pub fn new(grid: Grid) -> Result<Self, WorldError> {
        let start = grid.find_unique(Cell::Start)?;
        let goal = grid.find_unique(Cell::Goal)?;
        let pits = grid.find(Cell::Pit).collect();
        Ok(Self {
            grid,
            pits,
            start,
            goal,
            player: start,
        })
    }

    /// Parse a maze from its rows and build a world from it.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the rows are not a valid maze.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, WorldError> {
        Self::new(Grid::parse(rows)?)
    }

    /// The true maze.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Every pit location.
    pub const fn pits(&self) -> &BTreeSet<Location> {
        &self.pits
    }

    /// Where the player started.
    pub const fn start_location(&self) -> Location {
        self.start
    }

    /// The tile shown at `location`.
    pub fn tile_at(&self, location: Location) -> Symbol {
        if self.pits.contains(&location) {
            Symbol::Pit
        } else if location.neighbors().any(|(_, l)| self.pits.contains(&l)) {
            Symbol::Warn1
        } else if location.two_away().any(|(_, l)| self.pits.contains(&l)) {
            Symbol::Warn2
        } else {
            Symbol::Safe
        }
    }
}

impl FromStr for GridWorld {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.parse()?)
    }
}

impl Environment for GridWorld {
    fn agent_grid(&self) -> Grid {
        self.grid.masked()
    }

    fn current_location(&self) -> Location {
        self.player
    }

    fn goal_location(&self) -> Location {
        self.goal
    }

    fn apply(&mut self, action: Option<Direction>) -> Observation {
        let target = action
            .and_then(|d| self.player.step(d))
            .filter(|&l| self.grid.is_open(l));
        match target {
            Some(next) => self.player = next,
            None if action.is_some() => debug!(from = %self.player, ?action, "move blocked"),
            None => {}
        }
        Observation::new(self.player, self.tile_at(self.player))
    }

    fn is_pit(&self, location: Location) -> bool {
        self.pits.contains(&location)
    }

    fn is_goal(&self, location: Location) -> bool {
        location == self.goal
    }
}
