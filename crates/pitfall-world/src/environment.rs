//! The simulator boundary.
//!
//! The mission loop drives a maze through the [`Environment`] trait and
//! nothing else. The agent sees only the masked grid handed out at the start
//! and the [`Observation`] returned after each action; the scoring hooks
//! ([`Environment::is_pit`], [`Environment::is_goal`]) are for the mission
//! loop, never for the agent.

use pitfall_types::{Direction, Location, Observation};

use crate::grid::Grid;

/// A maze the agent can move through.
pub trait Environment {
    /// The maze as the agent is allowed to see it before moving: walls, the
    /// goal and the start are visible, every run tile is
    /// [`Cell::Unknown`](pitfall_types::Cell::Unknown).
    fn agent_grid(&self) -> Grid;

    /// Where the agent currently stands.
    fn current_location(&self) -> Location;

    /// The goal cell.
    fn goal_location(&self) -> Location;

    /// Apply one action and report what the agent now stands on.
    ///
    /// `None` stays in place. A move into a wall is a no-op that reports
    /// the current tile again.
    fn apply(&mut self, action: Option<Direction>) -> Observation;

    /// Whether `location` holds a pit.
    fn is_pit(&self, location: Location) -> bool;

    /// Whether `location` is the goal.
    fn is_goal(&self, location: Location) -> bool;
}
