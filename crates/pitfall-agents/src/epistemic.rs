//! The agent's epistemic map.
//!
//! Every traversable cell the agent has reasoned about sits in exactly one
//! of three sets, and only ever moves forward through them:
//!
//! ```text
//! unknown -> warning -> curious -> explored
//! ```
//!
//! - **warning**: next to something explored, but not known to be pit-free.
//! - **curious**: known pit-free, tile not yet pinned down. Carries a
//!   promise score: how many of its neighbours are open, unexplored and not
//!   known pits.
//! - **explored**: tile fully determined.
//!
//! Confirmed pits are tracked separately; a pit may also sit in `warning`
//! or `explored`, and always classifies as a pit.
//!
//! The map enforces the forward-only ordering itself. Deciding *when* a
//! cell moves is the job of the [`inference`](crate::inference) engine.

use std::collections::{BTreeMap, BTreeSet};

use pitfall_types::Location;
use serde::{Deserialize, Serialize};

/// How the planner should see a cell, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellClass {
    /// A confirmed pit.
    Pit,
    /// Tile fully determined.
    Explored,
    /// Pit-free, tile undetermined, with its promise score.
    Curious(u8),
    /// Possibly a pit.
    Warning,
    /// Never reasoned about.
    Unknown,
}

/// Explored, curious, warning and pit sets for one mission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpistemicMap {
    /// Cells whose tile is fully determined.
    explored: BTreeSet<Location>,
    /// Pit-free undetermined cells and their promise scores.
    curious: BTreeMap<Location, u8>,
    /// Cells that may hold a pit.
    warning: BTreeSet<Location>,
    /// Confirmed pits.
    pits: BTreeSet<Location>,
}

impl EpistemicMap {
    /// Create an empty map.
    pub const fn new() -> Self {
        Self {
            explored: BTreeSet::new(),
            curious: BTreeMap::new(),
            warning: BTreeSet::new(),
            pits: BTreeSet::new(),
        }
    }

    /// Explored cells.
    pub const fn explored(&self) -> &BTreeSet<Location> {
        &self.explored
    }

    /// Curious cells and their promise scores.
    pub const fn curious(&self) -> &BTreeMap<Location, u8> {
        &self.curious
    }

    /// Warning cells.
    pub const fn warning(&self) -> &BTreeSet<Location> {
        &self.warning
    }

    /// Confirmed pits.
    pub const fn pits(&self) -> &BTreeSet<Location> {
        &self.pits
    }

    /// Whether `location` is explored.
    pub fn is_explored(&self, location: Location) -> bool {
        self.explored.contains(&location)
    }

    /// Promise score of a curious cell.
    pub fn promise(&self, location: Location) -> Option<u8> {
        self.curious.get(&location).copied()
    }

    /// Whether `location` is a warning cell.
    pub fn is_warning(&self, location: Location) -> bool {
        self.warning.contains(&location)
    }

    /// Whether `location` is a confirmed pit.
    pub fn is_pit(&self, location: Location) -> bool {
        self.pits.contains(&location)
    }

    /// Whether `location` is in any of explored, curious or warning.
    pub fn is_tracked(&self, location: Location) -> bool {
        self.is_explored(location)
            || self.curious.contains_key(&location)
            || self.is_warning(location)
    }

    /// Classify `location` for the cost model.
    pub fn classify(&self, location: Location) -> CellClass {
        if self.is_pit(location) {
            CellClass::Pit
        } else if self.is_explored(location) {
            CellClass::Explored
        } else if let Some(score) = self.promise(location) {
            CellClass::Curious(score)
        } else if self.is_warning(location) {
            CellClass::Warning
        } else {
            CellClass::Unknown
        }
    }

    /// Move `location` to explored. Returns `true` if it was not explored
    /// before.
    pub fn mark_explored(&mut self, location: Location) -> bool {
        self.curious.remove(&location);
        self.warning.remove(&location);
        self.explored.insert(location)
    }

    /// Move `location` to curious with the given score, out of warning.
    /// Explored cells are left alone. Returns `true` if the cell was not
    /// curious before.
    pub fn make_curious(&mut self, location: Location, score: u8) -> bool {
        if self.is_explored(location) || self.curious.contains_key(&location) {
            return false;
        }
        self.warning.remove(&location);
        self.curious.insert(location, score);
        true
    }

    /// Add an untracked cell to warning. Returns `true` if it was added.
    pub fn add_warning(&mut self, location: Location) -> bool {
        if self.is_tracked(location) {
            return false;
        }
        self.warning.insert(location)
    }

    /// Update the promise score of a cell that is already curious.
    pub fn set_promise(&mut self, location: Location, score: u8) {
        if let Some(slot) = self.curious.get_mut(&location) {
            *slot = score;
        }
    }

    /// Record a confirmed pit. A pit is never curious.
    pub fn record_pit(&mut self, location: Location) -> bool {
        self.curious.remove(&location);
        self.pits.insert(location)
    }
}
