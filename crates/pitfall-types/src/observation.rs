//! The observation the simulator returns after every action.

use serde::{Deserialize, Serialize};

use crate::enums::Symbol;
use crate::location::Location;

/// What the agent perceives after an action is applied: where it now
/// stands and the tile shown there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// The agent's location after the action.
    pub location: Location,
    /// The tile at that location, by display priority.
    pub tile: Symbol,
}

impl Observation {
    /// Create an observation.
    pub const fn new(location: Location, tile: Symbol) -> Self {
        Self { location, tile }
    }
}

impl core::fmt::Display for Observation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} at {}", self.tile, self.location)
    }
}
